//! Pure report derivation over ledger and voucher snapshots
//!
//! Every function in this module is a deterministic, side-effect-free fold
//! over already-fetched data. Nothing here can fail: a ledger with no
//! matching vouchers contributes zero balances, and entries referencing a
//! deleted ledger simply match nothing.

pub mod balance_sheet;
pub mod day_book;
pub mod profit_loss;
pub mod statement;
pub mod trial_balance;

pub use balance_sheet::{balance_sheet, BalanceSheet};
pub use day_book::{day_book, DayBook, DayBookRow};
pub use profit_loss::{profit_loss, ProfitLossStatement};
pub use statement::{account_statement, AccountStatement, StatementRow};
pub use trial_balance::{trial_balance, BalanceType, TrialBalance, TrialBalanceRow};

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{EntryType, Ledger, Voucher};

/// One ledger's derived balance as placed in a statement bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerBalance {
    pub ledger_id: String,
    pub ledger_name: String,
    pub balance: BigDecimal,
}

/// Split a signed opening balance onto the debit/credit columns:
/// a non-negative opening seeds the debit side, a negative opening seeds the
/// credit side with its magnitude.
pub(crate) fn opening_split(opening: &BigDecimal) -> (BigDecimal, BigDecimal) {
    let zero = BigDecimal::from(0);
    if *opening >= zero {
        (opening.clone(), zero)
    } else {
        (zero, opening.abs())
    }
}

pub(crate) fn in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Sum the debit and credit entries referencing one ledger across vouchers,
/// optionally restricted to an inclusive date range.
pub(crate) fn entry_totals(
    ledger: &Ledger,
    vouchers: &[Voucher],
    range: Option<(NaiveDate, NaiveDate)>,
) -> (BigDecimal, BigDecimal) {
    let mut debit = BigDecimal::from(0);
    let mut credit = BigDecimal::from(0);

    for voucher in vouchers {
        if let Some((start, end)) = range {
            if !in_range(voucher.date, start, end) {
                continue;
            }
        }
        for entry in &voucher.entries {
            if entry.ledger_id != ledger.id {
                continue;
            }
            match entry.entry_type {
                EntryType::Debit => debit += &entry.amount,
                EntryType::Credit => credit += &entry.amount,
            }
        }
    }

    (debit, credit)
}
