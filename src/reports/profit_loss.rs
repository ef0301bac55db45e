//! Profit & loss derivation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{entry_totals, opening_split, LedgerBalance};
use crate::types::{Ledger, LedgerGroup, Voucher};

/// Profit & loss statement for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitLossStatement {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub direct_incomes: Vec<LedgerBalance>,
    pub direct_expenses: Vec<LedgerBalance>,
    pub indirect_incomes: Vec<LedgerBalance>,
    pub indirect_expenses: Vec<LedgerBalance>,
    /// Sum of direct-income balances
    pub total_revenue: BigDecimal,
    /// Sum of direct-expense balances
    pub total_expenses: BigDecimal,
    pub gross_profit: BigDecimal,
    pub net_profit: BigDecimal,
}

/// Derive the profit & loss statement over `[start_date, end_date]`
/// inclusive.
///
/// Per ledger the columns are seeded from the opening balance exactly as in
/// the trial balance, then only in-range entries are added. The reported
/// balance is `credit - debit` (the sign convention is inverted relative to
/// the trial balance, since income ledgers are credit-natured and expense
/// ledgers debit-natured). A ledger appears in its bucket only when that
/// balance is non-zero.
pub fn profit_loss(
    ledgers: &[Ledger],
    vouchers: &[Voucher],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> ProfitLossStatement {
    let zero = BigDecimal::from(0);
    let mut direct_incomes = Vec::new();
    let mut direct_expenses = Vec::new();
    let mut indirect_incomes = Vec::new();
    let mut indirect_expenses = Vec::new();

    for ledger in ledgers {
        let bucket = match ledger.group {
            LedgerGroup::DirectIncomes => &mut direct_incomes,
            LedgerGroup::DirectExpenses => &mut direct_expenses,
            LedgerGroup::IndirectIncomes => &mut indirect_incomes,
            LedgerGroup::IndirectExpenses => &mut indirect_expenses,
            _ => continue,
        };

        let (mut debit_total, mut credit_total) = opening_split(&ledger.opening_balance);
        let (posted_debit, posted_credit) =
            entry_totals(ledger, vouchers, Some((start_date, end_date)));
        debit_total += posted_debit;
        credit_total += posted_credit;

        let balance = credit_total - debit_total;
        if balance == zero {
            continue;
        }

        bucket.push(LedgerBalance {
            ledger_id: ledger.id.clone(),
            ledger_name: ledger.name.clone(),
            balance,
        });
    }

    let total_revenue: BigDecimal = direct_incomes.iter().map(|l| &l.balance).sum();
    let total_expenses: BigDecimal = direct_expenses.iter().map(|l| &l.balance).sum();
    let gross_profit = &total_revenue - &total_expenses;

    let indirect_income_total: BigDecimal = indirect_incomes.iter().map(|l| &l.balance).sum();
    let indirect_expense_total: BigDecimal = indirect_expenses.iter().map(|l| &l.balance).sum();
    let net_profit = &gross_profit + &indirect_income_total - &indirect_expense_total;

    ProfitLossStatement {
        start_date,
        end_date,
        direct_incomes,
        direct_expenses,
        indirect_incomes,
        indirect_expenses,
        total_revenue,
        total_expenses,
        gross_profit,
        net_profit,
    }
}
