//! Balance sheet derivation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{entry_totals, LedgerBalance};
use crate::types::{Ledger, LedgerGroup, Voucher};

/// Balance sheet for a date range
///
/// Buckets follow the group placement rules exactly: sundry debtors fold
/// into current assets, while sundry creditors keep their own bucket and are
/// listed but not added to `total_liabilities`. The `net_profit` field is a
/// placeholder kept at zero; it is not wired to the profit & loss result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub current_assets: Vec<LedgerBalance>,
    pub fixed_assets: Vec<LedgerBalance>,
    pub investments: Vec<LedgerBalance>,
    pub current_liabilities: Vec<LedgerBalance>,
    pub loans: Vec<LedgerBalance>,
    pub sundry_creditors: Vec<LedgerBalance>,
    pub capital: Vec<LedgerBalance>,
    pub total_assets: BigDecimal,
    pub total_liabilities: BigDecimal,
    pub net_profit: BigDecimal,
}

/// Derive the balance sheet over `[start_date, end_date]` inclusive.
///
/// Each ledger's balance is computed with its native sign (opening balance
/// plus debits minus credits, range-filtered). Asset buckets and capital
/// keep the native sign; liability buckets carry absolute values. Groups
/// without a bucket here (cash, bank, stock, duties) do not appear on the
/// sheet.
pub fn balance_sheet(
    ledgers: &[Ledger],
    vouchers: &[Voucher],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> BalanceSheet {
    let mut current_assets = Vec::new();
    let mut fixed_assets = Vec::new();
    let mut investments = Vec::new();
    let mut current_liabilities = Vec::new();
    let mut loans = Vec::new();
    let mut sundry_creditors = Vec::new();
    let mut capital = Vec::new();

    for ledger in ledgers {
        let (debit, credit) = entry_totals(ledger, vouchers, Some((start_date, end_date)));
        let native = &ledger.opening_balance + debit - credit;

        let (bucket, balance): (&mut Vec<LedgerBalance>, BigDecimal) = match ledger.group {
            LedgerGroup::CurrentAssets | LedgerGroup::SundryDebtors => {
                (&mut current_assets, native)
            }
            LedgerGroup::FixedAssets => (&mut fixed_assets, native),
            LedgerGroup::Investments => (&mut investments, native),
            LedgerGroup::CurrentLiabilities => (&mut current_liabilities, native.abs()),
            LedgerGroup::Loans => (&mut loans, native.abs()),
            LedgerGroup::SundryCreditors => (&mut sundry_creditors, native.abs()),
            LedgerGroup::CapitalAccount => (&mut capital, native),
            _ => continue,
        };

        bucket.push(LedgerBalance {
            ledger_id: ledger.id.clone(),
            ledger_name: ledger.name.clone(),
            balance,
        });
    }

    let sum = |bucket: &[LedgerBalance]| -> BigDecimal { bucket.iter().map(|l| &l.balance).sum() };

    let total_assets = sum(&current_assets) + sum(&fixed_assets) + sum(&investments);
    let total_liabilities = sum(&current_liabilities) + sum(&loans) + sum(&capital);

    BalanceSheet {
        start_date,
        end_date,
        current_assets,
        fixed_assets,
        investments,
        current_liabilities,
        loans,
        sundry_creditors,
        capital,
        total_assets,
        total_liabilities,
        net_profit: BigDecimal::from(0),
    }
}
