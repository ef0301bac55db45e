//! Trial balance derivation

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::{entry_totals, opening_split};
use crate::types::{Ledger, LedgerGroup, Voucher};

/// Which column a ledger's net position lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceType {
    Debit,
    Credit,
    Zero,
}

/// One ledger's position in the trial balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub ledger_id: String,
    pub ledger_name: String,
    pub group: LedgerGroup,
    /// Opening-seeded total of all debit postings
    pub debit_total: BigDecimal,
    /// Opening-seeded total of all credit postings
    pub credit_total: BigDecimal,
    /// Absolute net position
    pub balance: BigDecimal,
    pub balance_type: BalanceType,
}

/// Snapshot listing every ledger's net debit/credit position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
}

/// Derive the trial balance for every ledger.
///
/// The trial balance always considers full history: no date filter applies
/// here, in contrast to the profit & loss and balance sheet derivations.
/// Each ledger's columns are seeded from its opening balance (debit side if
/// non-negative, credit side otherwise), then every entry referencing it
/// adds to the matching column.
pub fn trial_balance(ledgers: &[Ledger], vouchers: &[Voucher]) -> TrialBalance {
    let zero = BigDecimal::from(0);
    let mut rows = Vec::with_capacity(ledgers.len());
    let mut total_debit = BigDecimal::from(0);
    let mut total_credit = BigDecimal::from(0);

    for ledger in ledgers {
        let (mut debit_total, mut credit_total) = opening_split(&ledger.opening_balance);
        let (posted_debit, posted_credit) = entry_totals(ledger, vouchers, None);
        debit_total += posted_debit;
        credit_total += posted_credit;

        let net = &debit_total - &credit_total;
        let balance_type = if net > zero {
            BalanceType::Debit
        } else if net < zero {
            BalanceType::Credit
        } else {
            BalanceType::Zero
        };

        total_debit += &debit_total;
        total_credit += &credit_total;

        rows.push(TrialBalanceRow {
            ledger_id: ledger.id.clone(),
            ledger_name: ledger.name.clone(),
            group: ledger.group,
            debit_total,
            credit_total,
            balance: net.abs(),
            balance_type,
        });
    }

    TrialBalance {
        rows,
        total_debit,
        total_credit,
    }
}
