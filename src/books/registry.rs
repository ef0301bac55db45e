//! Chart-of-accounts management

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;

/// Fallback display label for entries whose ledger has been deleted
pub const UNKNOWN_LEDGER: &str = "Unknown";

/// Registry for chart-of-accounts operations
pub struct LedgerRegistry<S: BooksStorage> {
    pub(crate) storage: S,
    validator: Box<dyn LedgerValidator>,
}

impl<S: BooksStorage> LedgerRegistry<S> {
    /// Create a new registry
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultLedgerValidator),
        }
    }

    /// Create a new registry with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn LedgerValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new ledger. The current balance starts at the opening balance.
    pub async fn add_ledger(
        &mut self,
        name: String,
        group: LedgerGroup,
        opening_balance: BigDecimal,
    ) -> BooksResult<Ledger> {
        let ledger = Ledger::new(name, group, opening_balance);

        self.validator.validate_ledger(&ledger)?;

        // Names are unique case-insensitively
        if let Some(existing) = self.storage.find_ledger_by_name(&ledger.name).await? {
            return Err(BooksError::Validation(format!(
                "Ledger named '{}' already exists",
                existing.name
            )));
        }

        self.storage.save_ledger(&ledger).await?;

        Ok(ledger)
    }

    /// Get a ledger by ID
    pub async fn get_ledger(&self, ledger_id: &str) -> BooksResult<Option<Ledger>> {
        self.storage.get_ledger(ledger_id).await
    }

    /// Get a ledger by ID, returning an error if not found
    pub async fn get_ledger_required(&self, ledger_id: &str) -> BooksResult<Ledger> {
        self.storage
            .get_ledger(ledger_id)
            .await?
            .ok_or_else(|| BooksError::LedgerNotFound(ledger_id.to_string()))
    }

    /// Find a ledger by exact, case-insensitive name
    pub async fn find_by_name(&self, name: &str) -> BooksResult<Option<Ledger>> {
        self.storage.find_ledger_by_name(name).await
    }

    /// List all ledgers
    pub async fn list_ledgers(&self) -> BooksResult<Vec<Ledger>> {
        self.storage.list_ledgers(None).await
    }

    /// List ledgers in a group
    pub async fn list_ledgers_by_group(&self, group: LedgerGroup) -> BooksResult<Vec<Ledger>> {
        self.storage.list_ledgers(Some(group)).await
    }

    /// Resolve a ledger id to its display name, falling back to
    /// [`UNKNOWN_LEDGER`] for ids whose ledger no longer exists.
    pub async fn display_name(&self, ledger_id: &str) -> BooksResult<String> {
        Ok(self
            .storage
            .get_ledger(ledger_id)
            .await?
            .map(|ledger| ledger.name)
            .unwrap_or_else(|| UNKNOWN_LEDGER.to_string()))
    }

    /// Merge the given fields into an existing ledger.
    ///
    /// The current balance is never recomputed from the journal here; pass it
    /// explicitly, or use the orchestrator's recompute operation.
    pub async fn update_ledger(
        &mut self,
        ledger_id: &str,
        update: LedgerUpdate,
    ) -> BooksResult<Ledger> {
        let mut ledger = self.get_ledger_required(ledger_id).await?;

        if let Some(name) = update.name {
            // Allow case changes of the ledger's own name, but not collisions
            if let Some(existing) = self.storage.find_ledger_by_name(&name).await? {
                if existing.id != ledger.id {
                    return Err(BooksError::Validation(format!(
                        "Ledger named '{}' already exists",
                        existing.name
                    )));
                }
            }
            ledger.name = name;
        }
        if let Some(group) = update.group {
            ledger.group = group;
        }
        if let Some(opening_balance) = update.opening_balance {
            ledger.opening_balance = opening_balance;
        }
        if let Some(current_balance) = update.current_balance {
            ledger.current_balance = current_balance;
        }
        ledger.updated_at = chrono::Utc::now().naive_utc();

        self.validator.validate_ledger(&ledger)?;
        self.storage.update_ledger(&ledger).await?;

        Ok(ledger)
    }

    /// Delete a ledger.
    ///
    /// Vouchers referencing it are left untouched; their entries resolve to
    /// [`UNKNOWN_LEDGER`] in report output from then on.
    pub async fn delete_ledger(&mut self, ledger_id: &str) -> BooksResult<()> {
        self.validator.validate_ledger_deletion(ledger_id)?;

        if self.storage.get_ledger(ledger_id).await?.is_none() {
            return Err(BooksError::LedgerNotFound(ledger_id.to_string()));
        }

        self.storage.delete_ledger(ledger_id).await
    }

    /// Seed the standard small-business chart of accounts.
    ///
    /// Skipped (returns an empty list) when the registry already holds any
    /// ledger, so repeated calls cannot duplicate the chart.
    pub async fn seed_default_chart(&mut self, business_name: &str) -> BooksResult<Vec<Ledger>> {
        if !self.list_ledgers().await?.is_empty() {
            return Ok(Vec::new());
        }

        let zero = BigDecimal::from(0);
        let chart: [(String, LedgerGroup); 24] = [
            (
                format!("{} Capital", business_name.trim()),
                LedgerGroup::CapitalAccount,
            ),
            ("Cash-in-Hand".to_string(), LedgerGroup::CashInHand),
            ("Bank Account".to_string(), LedgerGroup::BankAccounts),
            ("Stock-in-Hand".to_string(), LedgerGroup::StockInHand),
            ("Sundry Debtors".to_string(), LedgerGroup::SundryDebtors),
            ("Sundry Creditors".to_string(), LedgerGroup::SundryCreditors),
            ("Bank Loan".to_string(), LedgerGroup::Loans),
            ("Furniture & Fixtures".to_string(), LedgerGroup::FixedAssets),
            ("GST Payable".to_string(), LedgerGroup::DutiesAndTaxes),
            ("CGST Payable".to_string(), LedgerGroup::DutiesAndTaxes),
            ("SGST Payable".to_string(), LedgerGroup::DutiesAndTaxes),
            ("IGST Payable".to_string(), LedgerGroup::DutiesAndTaxes),
            ("GST Input Credit".to_string(), LedgerGroup::DutiesAndTaxes),
            ("Sales A/c".to_string(), LedgerGroup::DirectIncomes),
            ("Purchase A/c".to_string(), LedgerGroup::DirectExpenses),
            ("Rent Expense".to_string(), LedgerGroup::IndirectExpenses),
            ("Salaries & Wages".to_string(), LedgerGroup::IndirectExpenses),
            ("Electricity Charges".to_string(), LedgerGroup::IndirectExpenses),
            ("Telephone & Internet".to_string(), LedgerGroup::IndirectExpenses),
            ("Printing & Stationery".to_string(), LedgerGroup::IndirectExpenses),
            ("Travelling Expenses".to_string(), LedgerGroup::IndirectExpenses),
            ("Repairs & Maintenance".to_string(), LedgerGroup::IndirectExpenses),
            ("Bank Charges".to_string(), LedgerGroup::IndirectExpenses),
            ("Miscellaneous Expenses".to_string(), LedgerGroup::IndirectExpenses),
        ];

        let mut created = Vec::with_capacity(chart.len());
        for (name, group) in chart {
            created.push(self.add_ledger(name, group, zero.clone()).await?);
        }

        Ok(created)
    }
}
