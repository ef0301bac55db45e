//! Day book derivation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Voucher, VoucherType};

/// One voucher as listed in the day book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBookRow {
    pub voucher_type: VoucherType,
    pub voucher_number: String,
    pub party_name: Option<String>,
    pub narration: String,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
}

/// Chronological listing of all vouchers posted on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBook {
    pub date: NaiveDate,
    pub transactions: Vec<DayBookRow>,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
}

/// Derive the day book for one calendar day.
///
/// Matching is exact day equality, not a range. A day with no vouchers
/// yields empty transactions and zero totals.
pub fn day_book(vouchers: &[Voucher], on: NaiveDate) -> DayBook {
    let mut transactions = Vec::new();
    let mut total_debit = BigDecimal::from(0);
    let mut total_credit = BigDecimal::from(0);

    for voucher in vouchers {
        if voucher.date != on {
            continue;
        }

        total_debit += &voucher.total_debit;
        total_credit += &voucher.total_credit;

        transactions.push(DayBookRow {
            voucher_type: voucher.voucher_type,
            voucher_number: voucher.voucher_number.clone(),
            party_name: voucher.party_name.clone(),
            narration: voucher.narration.clone(),
            total_debit: voucher.total_debit.clone(),
            total_credit: voucher.total_credit.clone(),
        });
    }

    DayBook {
        date: on,
        transactions,
        total_debit,
        total_credit,
    }
}
