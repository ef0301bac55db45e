//! Core types and data structures for the bookkeeping system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Classification groups for ledgers, following the conventional Indian
/// small-business chart of accounts.
///
/// The set is closed: every ledger carries exactly one of these tags, and
/// each tag places the ledger in exactly one financial-statement section
/// (see [`GroupKind`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerGroup {
    /// Owner's capital contributions
    CapitalAccount,
    /// Short-lived assets not covered by a more specific group
    CurrentAssets,
    /// Short-term obligations (outstanding expenses, advances received, etc.)
    CurrentLiabilities,
    /// Long-lived assets (furniture, machinery, vehicles, etc.)
    FixedAssets,
    /// Deposits and other investments held by the business
    Investments,
    /// Borrowings from banks and other lenders
    Loans,
    /// Suppliers the business owes money to
    SundryCreditors,
    /// Customers who owe the business money
    SundryDebtors,
    /// Bank and overdraft accounts
    BankAccounts,
    /// Physical cash
    CashInHand,
    /// Inventory valuation
    StockInHand,
    /// GST and other statutory dues
    DutiesAndTaxes,
    /// Income from the principal trade (sales)
    DirectIncomes,
    /// Costs directly tied to the principal trade (purchases)
    DirectExpenses,
    /// Income incidental to the trade (commission, interest, etc.)
    IndirectIncomes,
    /// Operating overheads (rent, salaries, utilities, etc.)
    IndirectExpenses,
}

/// Financial-statement section a ledger group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    Assets,
    Liabilities,
    Income,
    Expense,
    Capital,
}

impl LedgerGroup {
    /// All sixteen groups, in display order.
    pub const ALL: [LedgerGroup; 16] = [
        LedgerGroup::CapitalAccount,
        LedgerGroup::CurrentAssets,
        LedgerGroup::CurrentLiabilities,
        LedgerGroup::FixedAssets,
        LedgerGroup::Investments,
        LedgerGroup::Loans,
        LedgerGroup::SundryCreditors,
        LedgerGroup::SundryDebtors,
        LedgerGroup::BankAccounts,
        LedgerGroup::CashInHand,
        LedgerGroup::StockInHand,
        LedgerGroup::DutiesAndTaxes,
        LedgerGroup::DirectIncomes,
        LedgerGroup::DirectExpenses,
        LedgerGroup::IndirectIncomes,
        LedgerGroup::IndirectExpenses,
    ];

    /// Human-readable label as shown on reports.
    pub fn label(&self) -> &'static str {
        match self {
            LedgerGroup::CapitalAccount => "Capital Account",
            LedgerGroup::CurrentAssets => "Current Assets",
            LedgerGroup::CurrentLiabilities => "Current Liabilities",
            LedgerGroup::FixedAssets => "Fixed Assets",
            LedgerGroup::Investments => "Investments",
            LedgerGroup::Loans => "Loans (Liability)",
            LedgerGroup::SundryCreditors => "Sundry Creditors",
            LedgerGroup::SundryDebtors => "Sundry Debtors",
            LedgerGroup::BankAccounts => "Bank Accounts",
            LedgerGroup::CashInHand => "Cash-in-Hand",
            LedgerGroup::StockInHand => "Stock-in-Hand",
            LedgerGroup::DutiesAndTaxes => "Duties & Taxes",
            LedgerGroup::DirectIncomes => "Direct Incomes",
            LedgerGroup::DirectExpenses => "Direct Expenses",
            LedgerGroup::IndirectIncomes => "Indirect Incomes",
            LedgerGroup::IndirectExpenses => "Indirect Expenses",
        }
    }

    /// Statement section this group is placed under.
    pub fn kind(&self) -> GroupKind {
        match self {
            LedgerGroup::CurrentAssets
            | LedgerGroup::FixedAssets
            | LedgerGroup::Investments
            | LedgerGroup::SundryDebtors
            | LedgerGroup::BankAccounts
            | LedgerGroup::CashInHand
            | LedgerGroup::StockInHand => GroupKind::Assets,
            LedgerGroup::CurrentLiabilities
            | LedgerGroup::Loans
            | LedgerGroup::SundryCreditors
            | LedgerGroup::DutiesAndTaxes => GroupKind::Liabilities,
            LedgerGroup::DirectIncomes | LedgerGroup::IndirectIncomes => GroupKind::Income,
            LedgerGroup::DirectExpenses | LedgerGroup::IndirectExpenses => GroupKind::Expense,
            LedgerGroup::CapitalAccount => GroupKind::Capital,
        }
    }
}

/// Types of entries in double-entry bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// Debit entry - increases Assets and Expenses, decreases Liabilities, Capital, and Income
    Debit,
    /// Credit entry - increases Liabilities, Capital, and Income, decreases Assets and Expenses
    Credit,
}

/// An account in the chart of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Opaque, stable identifier
    pub id: String,
    /// Display name, unique within a business (case-insensitive)
    pub name: String,
    /// Classification group, fixed enumeration
    pub group: LedgerGroup,
    /// Signed opening balance; positive means debit-natured
    pub opening_balance: BigDecimal,
    /// Denormalized cached balance. Initialized to the opening balance and
    /// only changed by an explicit update or an explicit recompute; posting
    /// a voucher never touches it. Reports derive true balances from the
    /// journal independently.
    pub current_balance: BigDecimal,
    /// When the ledger was created
    pub created_at: NaiveDateTime,
    /// When the ledger was last updated
    pub updated_at: NaiveDateTime,
}

impl Ledger {
    /// Create a new ledger with a freshly minted id and the current balance
    /// initialized to the opening balance.
    pub fn new(name: String, group: LedgerGroup, opening_balance: BigDecimal) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            group,
            current_balance: opening_balance.clone(),
            opening_balance,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial field set for updating a ledger. `None` leaves the field as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerUpdate {
    pub name: Option<String>,
    pub group: Option<LedgerGroup>,
    pub opening_balance: Option<BigDecimal>,
    pub current_balance: Option<BigDecimal>,
}

/// One debit or credit line within a voucher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Ledger being affected
    pub ledger_id: String,
    /// Denormalized ledger name for display
    pub ledger_name: String,
    /// Type of entry (Debit or Credit)
    pub entry_type: EntryType,
    /// Amount of the entry, always positive
    pub amount: BigDecimal,
    /// Optional description for this specific line
    pub description: Option<String>,
}

impl LedgerEntry {
    /// Create a new entry
    pub fn new(
        ledger_id: String,
        ledger_name: String,
        entry_type: EntryType,
        amount: BigDecimal,
        description: Option<String>,
    ) -> Self {
        Self {
            ledger_id,
            ledger_name,
            entry_type,
            amount,
            description,
        }
    }

    /// Create a debit entry
    pub fn debit(ledger_id: String, ledger_name: String, amount: BigDecimal) -> Self {
        Self::new(ledger_id, ledger_name, EntryType::Debit, amount, None)
    }

    /// Create a credit entry
    pub fn credit(ledger_id: String, ledger_name: String, amount: BigDecimal) -> Self {
        Self::new(ledger_id, ledger_name, EntryType::Credit, amount, None)
    }
}

/// The eight voucher types recognized by the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoucherType {
    Payment,
    Receipt,
    Contra,
    Journal,
    Sales,
    Purchase,
    DebitNote,
    CreditNote,
}

impl VoucherType {
    /// Three-letter prefix used in voucher numbers.
    pub fn prefix(&self) -> &'static str {
        match self {
            VoucherType::Payment => "PYT",
            VoucherType::Receipt => "RCT",
            VoucherType::Contra => "CON",
            VoucherType::Journal => "JNL",
            VoucherType::Sales => "SLS",
            VoucherType::Purchase => "PUR",
            VoucherType::DebitNote => "DBN",
            VoucherType::CreditNote => "CRN",
        }
    }

    /// Human-readable label as shown on reports.
    pub fn label(&self) -> &'static str {
        match self {
            VoucherType::Payment => "Payment",
            VoucherType::Receipt => "Receipt",
            VoucherType::Contra => "Contra",
            VoucherType::Journal => "Journal",
            VoucherType::Sales => "Sales",
            VoucherType::Purchase => "Purchase",
            VoucherType::DebitNote => "Debit Note",
            VoucherType::CreditNote => "Credit Note",
        }
    }
}

/// One balanced journal transaction composed of two or more ledger entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    /// Opaque, stable identifier
    pub id: String,
    /// Which journal the voucher belongs to
    pub voucher_type: VoucherType,
    /// User-visible number, `{PREFIX}-{YYMM}-{NNNN}`, sequence scoped per type
    pub voucher_number: String,
    /// Date the transaction occurred
    pub date: NaiveDate,
    /// Optional external reference (invoice number, cheque number, etc.)
    pub reference: Option<String>,
    /// Free-text narration
    pub narration: String,
    /// Optional party (customer/supplier) the voucher is against
    pub party_name: Option<String>,
    /// The debit and credit lines making up the transaction
    pub entries: Vec<LedgerEntry>,
    /// Sum of all debit lines, fixed at creation
    pub total_debit: BigDecimal,
    /// Sum of all credit lines, fixed at creation
    pub total_credit: BigDecimal,
    /// When the voucher was created
    pub created_at: NaiveDateTime,
}

impl Voucher {
    /// Calculate total debits from the entry lines
    pub fn total_debits(&self) -> BigDecimal {
        self.entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Debit)
            .map(|e| &e.amount)
            .sum()
    }

    /// Calculate total credits from the entry lines
    pub fn total_credits(&self) -> BigDecimal {
        self.entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Credit)
            .map(|e| &e.amount)
            .sum()
    }

    /// Check if the voucher is balanced (debits = credits)
    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }

    /// Validate the double-entry invariants
    pub fn validate(&self) -> BooksResult<()> {
        if self.entries.is_empty() {
            return Err(BooksError::InvalidVoucher(
                "Voucher must have at least one entry".to_string(),
            ));
        }

        if self.entries.len() < 2 {
            return Err(BooksError::InvalidVoucher(
                "Voucher must have at least two entries for double-entry bookkeeping".to_string(),
            ));
        }

        if !self.is_balanced() {
            return Err(BooksError::InvalidVoucher(format!(
                "Voucher is not balanced: debits = {}, credits = {}",
                self.total_debits(),
                self.total_credits()
            )));
        }

        for entry in &self.entries {
            if entry.amount <= BigDecimal::from(0) {
                return Err(BooksError::InvalidVoucher(
                    "Entry amounts must be positive".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// A recorded sale, the input to outward GST reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    pub date: NaiveDate,
    pub quantity: BigDecimal,
    pub rate: BigDecimal,
    /// Taxable value before GST (quantity * rate)
    pub total_value: BigDecimal,
    pub gst_amount: BigDecimal,
    /// Invoice total including GST
    pub grand_total: BigDecimal,
}

/// A recorded purchase, the input to inward GST reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub product_id: String,
    pub date: NaiveDate,
    pub quantity: BigDecimal,
    pub rate: BigDecimal,
    /// Taxable value before GST (quantity * rate)
    pub total_value: BigDecimal,
    pub gst_amount: BigDecimal,
    /// Invoice total including GST
    pub grand_total: BigDecimal,
}

/// Errors that can occur in the bookkeeping system
#[derive(Debug, thiserror::Error)]
pub enum BooksError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid voucher: {0}")]
    InvalidVoucher(String),
    #[error("Ledger not found: {0}")]
    LedgerNotFound(String),
    #[error("Voucher not found: {0}")]
    VoucherNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for bookkeeping operations
pub type BooksResult<T> = Result<T, BooksError>;
