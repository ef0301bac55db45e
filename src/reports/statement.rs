//! Account statement derivation (running balance for one ledger)

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::in_range;
use crate::types::{EntryType, Ledger, Voucher, VoucherType};

/// One posting against the ledger, carrying the balance after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: NaiveDate,
    pub voucher_type: VoucherType,
    pub voucher_number: String,
    pub description: String,
    pub entry_type: EntryType,
    pub amount: BigDecimal,
    /// Running balance after this posting
    pub balance: BigDecimal,
}

/// Movement history for one ledger over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatement {
    pub ledger_id: String,
    pub ledger_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Always zero: movement before `start_date` is not folded in. The
    /// running balance therefore reflects in-range activity only.
    pub opening_balance: BigDecimal,
    pub transactions: Vec<StatementRow>,
    pub closing_balance: BigDecimal,
}

/// Derive the statement for one ledger over `[start_date, end_date]`
/// inclusive.
///
/// Vouchers are walked in ascending date order (ties keep input order); each
/// entry referencing the ledger moves the running balance (debits add,
/// credits subtract) and lands as a row carrying the post-entry balance.
pub fn account_statement(
    ledger: &Ledger,
    vouchers: &[Voucher],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AccountStatement {
    let mut in_range_vouchers: Vec<&Voucher> = vouchers
        .iter()
        .filter(|v| in_range(v.date, start_date, end_date))
        .collect();
    in_range_vouchers.sort_by_key(|v| v.date);

    let opening_balance = BigDecimal::from(0);
    let mut balance = opening_balance.clone();
    let mut transactions = Vec::new();

    for voucher in in_range_vouchers {
        for entry in &voucher.entries {
            if entry.ledger_id != ledger.id {
                continue;
            }

            match entry.entry_type {
                EntryType::Debit => balance += &entry.amount,
                EntryType::Credit => balance -= &entry.amount,
            }

            transactions.push(StatementRow {
                date: voucher.date,
                voucher_type: voucher.voucher_type,
                voucher_number: voucher.voucher_number.clone(),
                description: entry
                    .description
                    .clone()
                    .unwrap_or_else(|| voucher.narration.clone()),
                entry_type: entry.entry_type.clone(),
                amount: entry.amount.clone(),
                balance: balance.clone(),
            });
        }
    }

    AccountStatement {
        ledger_id: ledger.id.clone(),
        ledger_name: ledger.name.clone(),
        start_date,
        end_date,
        opening_balance,
        transactions,
        closing_balance: balance,
    }
}
