//! # BizBooks Core
//!
//! The accounting core of a small-business ERP: double-entry voucher
//! journal, chart-of-accounts registry, and the derived financial reports.
//!
//! ## Features
//!
//! - **Double-entry vouchers**: eight voucher types with balance validation
//!   and per-type sequential numbering
//! - **Ledger registry**: sixteen-group chart of accounts with a standard
//!   small-business seed
//! - **Pure report engine**: trial balance, profit & loss, balance sheet,
//!   day book, and account statements derived on demand from snapshots
//! - **GST summaries**: rate-wise CGST/SGST input/output tax reporting
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage
//!
//! ## Quick Start
//!
//! ```rust
//! use bizbooks_core::{Books, MemoryStorage, VoucherBuilder, VoucherType};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! # async fn demo() -> bizbooks_core::BooksResult<()> {
//! let mut books = Books::new(MemoryStorage::new());
//! books.seed_default_chart_of_accounts("Acme Traders").await?;
//!
//! let cash = books.find_ledger_by_name("Cash-in-Hand").await?.unwrap();
//! let sales = books.find_ledger_by_name("Sales A/c").await?.unwrap();
//!
//! let voucher = VoucherBuilder::new(
//!     VoucherType::Receipt,
//!     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//! )
//! .narration("Cash sale".to_string())
//! .debit(cash.id.clone(), cash.name.clone(), BigDecimal::from(500))
//! .credit(sales.id.clone(), sales.name.clone(), BigDecimal::from(500))
//! .build()?;
//! books.create_voucher(voucher).await?;
//!
//! let trial_balance = books.trial_balance().await?;
//! assert_eq!(trial_balance.total_debit, trial_balance.total_credit);
//! # Ok(())
//! # }
//! ```

pub mod books;
pub mod reports;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use books::*;
pub use reports::*;
pub use tax::gst::*;
pub use traits::*;
pub use types::*;
pub use utils::MemoryStorage;

// Re-export the invoice entry builders for convenience
pub use books::journal::entries;
