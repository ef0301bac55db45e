//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::*;

/// Storage abstraction for the bookkeeping system
///
/// This trait allows the accounting core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these methods.
/// All reads return owned snapshots; the aggregation engine only ever sees
/// already-fetched data.
#[async_trait]
pub trait BooksStorage: Send + Sync {
    /// Save a ledger to storage
    async fn save_ledger(&mut self, ledger: &Ledger) -> BooksResult<()>;

    /// Get a ledger by ID
    async fn get_ledger(&self, ledger_id: &str) -> BooksResult<Option<Ledger>>;

    /// Find a ledger by exact, case-insensitive name
    async fn find_ledger_by_name(&self, name: &str) -> BooksResult<Option<Ledger>>;

    /// List all ledgers, optionally filtered by group
    async fn list_ledgers(&self, group: Option<LedgerGroup>) -> BooksResult<Vec<Ledger>>;

    /// Update a ledger
    async fn update_ledger(&mut self, ledger: &Ledger) -> BooksResult<()>;

    /// Delete a ledger. No referential check is made against vouchers;
    /// dangling entry references degrade to a fallback label at read time.
    async fn delete_ledger(&mut self, ledger_id: &str) -> BooksResult<()>;

    /// Save a voucher to storage
    async fn save_voucher(&mut self, voucher: &Voucher) -> BooksResult<()>;

    /// Get a voucher by ID
    async fn get_voucher(&self, voucher_id: &str) -> BooksResult<Option<Voucher>>;

    /// List all vouchers within an optional date range
    async fn list_vouchers(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Voucher>>;

    /// Number of stored vouchers of the given type, used for number sequencing
    async fn count_vouchers_by_type(&self, voucher_type: VoucherType) -> BooksResult<usize>;

    /// Delete a voucher wholesale. No compensating entry is generated.
    async fn delete_voucher(&mut self, voucher_id: &str) -> BooksResult<()>;

    /// Save a sale record
    async fn save_sale(&mut self, sale: &Sale) -> BooksResult<()>;

    /// List sale records within an optional date range
    async fn list_sales(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Sale>>;

    /// Save a purchase record
    async fn save_purchase(&mut self, purchase: &Purchase) -> BooksResult<()>;

    /// List purchase records within an optional date range
    async fn list_purchases(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Purchase>>;
}

/// Trait for implementing custom ledger validation rules
pub trait LedgerValidator: Send + Sync {
    /// Validate a ledger before saving
    fn validate_ledger(&self, ledger: &Ledger) -> BooksResult<()>;

    /// Validate ledger deletion (e.g., check for referencing vouchers)
    fn validate_ledger_deletion(&self, ledger_id: &str) -> BooksResult<()>;
}

/// Trait for implementing custom voucher validation rules
pub trait VoucherValidator: Send + Sync {
    /// Validate a voucher before it is appended to the journal
    fn validate_voucher(&self, voucher: &Voucher) -> BooksResult<()>;
}

/// Default ledger validator with basic rules
pub struct DefaultLedgerValidator;

impl LedgerValidator for DefaultLedgerValidator {
    fn validate_ledger(&self, ledger: &Ledger) -> BooksResult<()> {
        if ledger.name.trim().is_empty() {
            return Err(BooksError::Validation(
                "Ledger name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_ledger_deletion(&self, _ledger_id: &str) -> BooksResult<()> {
        // Deletion is deliberately permissive; references are resolved to a
        // fallback label when reports are read.
        Ok(())
    }
}

/// Default voucher validator enforcing the double-entry rules
pub struct DefaultVoucherValidator;

impl VoucherValidator for DefaultVoucherValidator {
    fn validate_voucher(&self, voucher: &Voucher) -> BooksResult<()> {
        voucher.validate()
    }
}
