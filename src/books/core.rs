//! Main orchestrator that coordinates the registry, journal, and reports

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::books::journal::{entries, VoucherBuilder, VoucherJournal};
use crate::books::registry::LedgerRegistry;
use crate::reports::{
    self, AccountStatement, BalanceSheet, DayBook, ProfitLossStatement, TrialBalance,
};
use crate::tax::gst::{gst_summary, GstReport};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_positive_quantity;

/// The books of one business: chart of accounts, voucher journal, and the
/// derived reports.
///
/// Storage is injected explicitly and report reads take an immutable
/// snapshot once, up front; the aggregation functions themselves are pure.
pub struct Books<S: BooksStorage> {
    registry: LedgerRegistry<S>,
    journal: VoucherJournal<S>,
    storage: S,
}

impl<S: BooksStorage + Clone> Books<S> {
    /// Create books over the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            registry: LedgerRegistry::new(storage.clone()),
            journal: VoucherJournal::new(storage.clone()),
            storage,
        }
    }

    /// Create books with custom validators
    pub fn with_validators(
        storage: S,
        ledger_validator: Box<dyn LedgerValidator>,
        voucher_validator: Box<dyn VoucherValidator>,
    ) -> Self {
        Self {
            registry: LedgerRegistry::with_validator(storage.clone(), ledger_validator),
            journal: VoucherJournal::with_validator(storage.clone(), voucher_validator),
            storage,
        }
    }

    // Ledger operations
    /// Create a new ledger
    pub async fn add_ledger(
        &mut self,
        name: String,
        group: LedgerGroup,
        opening_balance: BigDecimal,
    ) -> BooksResult<Ledger> {
        self.registry.add_ledger(name, group, opening_balance).await
    }

    /// Get a ledger by ID
    pub async fn get_ledger(&self, ledger_id: &str) -> BooksResult<Option<Ledger>> {
        self.registry.get_ledger(ledger_id).await
    }

    /// Find a ledger by exact, case-insensitive name
    pub async fn find_ledger_by_name(&self, name: &str) -> BooksResult<Option<Ledger>> {
        self.registry.find_by_name(name).await
    }

    /// List all ledgers
    pub async fn list_ledgers(&self) -> BooksResult<Vec<Ledger>> {
        self.registry.list_ledgers().await
    }

    /// List ledgers in a group
    pub async fn list_ledgers_by_group(&self, group: LedgerGroup) -> BooksResult<Vec<Ledger>> {
        self.registry.list_ledgers_by_group(group).await
    }

    /// Merge fields into a ledger
    pub async fn update_ledger(
        &mut self,
        ledger_id: &str,
        update: LedgerUpdate,
    ) -> BooksResult<Ledger> {
        self.registry.update_ledger(ledger_id, update).await
    }

    /// Delete a ledger (permissive; see [`LedgerRegistry::delete_ledger`])
    pub async fn delete_ledger(&mut self, ledger_id: &str) -> BooksResult<()> {
        self.registry.delete_ledger(ledger_id).await
    }

    /// Seed the standard chart of accounts; skipped when ledgers exist
    pub async fn seed_default_chart_of_accounts(
        &mut self,
        business_name: &str,
    ) -> BooksResult<Vec<Ledger>> {
        self.registry.seed_default_chart(business_name).await
    }

    /// Recompute a ledger's cached balance from the journal and store it.
    ///
    /// This is the only path that derives `current_balance` from vouchers;
    /// posting never updates it implicitly.
    pub async fn recompute_balance(&mut self, ledger_id: &str) -> BooksResult<BigDecimal> {
        let ledger = self.registry.get_ledger_required(ledger_id).await?;
        let vouchers = self.journal.list_vouchers(None, None).await?;

        let mut balance = ledger.opening_balance.clone();
        for voucher in &vouchers {
            for entry in &voucher.entries {
                if entry.ledger_id != ledger.id {
                    continue;
                }
                match entry.entry_type {
                    EntryType::Debit => balance += &entry.amount,
                    EntryType::Credit => balance -= &entry.amount,
                }
            }
        }

        self.registry
            .update_ledger(
                ledger_id,
                LedgerUpdate {
                    current_balance: Some(balance.clone()),
                    ..Default::default()
                },
            )
            .await?;

        Ok(balance)
    }

    // Voucher operations
    /// Append a voucher to the journal
    pub async fn create_voucher(&mut self, voucher: Voucher) -> BooksResult<Voucher> {
        self.journal.create_voucher(voucher).await
    }

    /// Get a voucher by ID
    pub async fn get_voucher(&self, voucher_id: &str) -> BooksResult<Option<Voucher>> {
        self.journal.get_voucher(voucher_id).await
    }

    /// List vouchers within an optional date range
    pub async fn list_vouchers(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Voucher>> {
        self.journal.list_vouchers(start_date, end_date).await
    }

    /// Delete a voucher wholesale (hard deletion, no reversal)
    pub async fn delete_voucher(&mut self, voucher_id: &str) -> BooksResult<()> {
        self.journal.delete_voucher(voucher_id).await
    }

    /// Create a sales invoice voucher: debit the customer for the grand
    /// total, credit "Sales A/c" for the subtotal, credit "GST Payable" for
    /// the tax. Entry lines are resolved to ledger ids by name; names with
    /// no matching ledger stay dangling and degrade at read time.
    pub async fn create_sales_voucher(
        &mut self,
        date: NaiveDate,
        customer: &str,
        product: &str,
        quantity: BigDecimal,
        rate: BigDecimal,
        gst_percent: BigDecimal,
    ) -> BooksResult<Voucher> {
        validate_positive_quantity(&quantity, "Quantity")?;
        validate_positive_quantity(&rate, "Rate")?;

        let lines = entries::sales_voucher_entries(
            customer,
            product,
            quantity.clone(),
            rate,
            gst_percent,
            "Sales A/c",
        );
        let lines = self.resolve_entry_ledgers(lines).await?;

        let mut builder = VoucherBuilder::new(VoucherType::Sales, date)
            .party(customer.to_string())
            .narration(format!("Sale of {quantity} x {product}"));
        for line in lines {
            builder = builder.entry(line);
        }

        self.journal.create_voucher(builder.build()?).await
    }

    /// Create a purchase invoice voucher, the mirror of
    /// [`Books::create_sales_voucher`]: debit "Purchase A/c" and
    /// "GST Input Credit", credit the supplier.
    pub async fn create_purchase_voucher(
        &mut self,
        date: NaiveDate,
        supplier: &str,
        product: &str,
        quantity: BigDecimal,
        rate: BigDecimal,
        gst_percent: BigDecimal,
    ) -> BooksResult<Voucher> {
        validate_positive_quantity(&quantity, "Quantity")?;
        validate_positive_quantity(&rate, "Rate")?;

        let lines = entries::purchase_voucher_entries(
            supplier,
            product,
            quantity.clone(),
            rate,
            gst_percent,
            "Purchase A/c",
        );
        let lines = self.resolve_entry_ledgers(lines).await?;

        let mut builder = VoucherBuilder::new(VoucherType::Purchase, date)
            .party(supplier.to_string())
            .narration(format!("Purchase of {quantity} x {product}"));
        for line in lines {
            builder = builder.entry(line);
        }

        self.journal.create_voucher(builder.build()?).await
    }

    async fn resolve_entry_ledgers(
        &self,
        mut lines: Vec<LedgerEntry>,
    ) -> BooksResult<Vec<LedgerEntry>> {
        for line in &mut lines {
            if let Some(ledger) = self.registry.find_by_name(&line.ledger_name).await? {
                line.ledger_id = ledger.id;
            }
        }
        Ok(lines)
    }

    // Sales / purchase records (GST report inputs)
    /// Record a sale. Totals are derived: taxable value = quantity * rate,
    /// GST = taxable * percent / 100, grand total = taxable + GST.
    pub async fn record_sale(
        &mut self,
        product_id: &str,
        date: NaiveDate,
        quantity: BigDecimal,
        rate: BigDecimal,
        gst_percent: BigDecimal,
    ) -> BooksResult<Sale> {
        validate_positive_quantity(&quantity, "Quantity")?;
        validate_positive_quantity(&rate, "Rate")?;

        let total_value = &quantity * &rate;
        let gst_amount = (&total_value * &gst_percent) / BigDecimal::from(100);
        let grand_total = &total_value + &gst_amount;

        let sale = Sale {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            date,
            quantity,
            rate,
            total_value,
            gst_amount,
            grand_total,
        };
        self.storage.save_sale(&sale).await?;
        Ok(sale)
    }

    /// Record a purchase, the mirror of [`Books::record_sale`]
    pub async fn record_purchase(
        &mut self,
        product_id: &str,
        date: NaiveDate,
        quantity: BigDecimal,
        rate: BigDecimal,
        gst_percent: BigDecimal,
    ) -> BooksResult<Purchase> {
        validate_positive_quantity(&quantity, "Quantity")?;
        validate_positive_quantity(&rate, "Rate")?;

        let total_value = &quantity * &rate;
        let gst_amount = (&total_value * &gst_percent) / BigDecimal::from(100);
        let grand_total = &total_value + &gst_amount;

        let purchase = Purchase {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            date,
            quantity,
            rate,
            total_value,
            gst_amount,
            grand_total,
        };
        self.storage.save_purchase(&purchase).await?;
        Ok(purchase)
    }

    // Reports: fetch a snapshot once, then fold it with the pure engine
    /// Trial balance over full history (never date-filtered)
    pub async fn trial_balance(&self) -> BooksResult<TrialBalance> {
        let ledgers = self.registry.list_ledgers().await?;
        let vouchers = self.journal.list_vouchers(None, None).await?;
        Ok(reports::trial_balance(&ledgers, &vouchers))
    }

    /// Profit & loss statement over a date range
    pub async fn profit_loss(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> BooksResult<ProfitLossStatement> {
        let ledgers = self.registry.list_ledgers().await?;
        let vouchers = self.journal.list_vouchers(None, None).await?;
        Ok(reports::profit_loss(&ledgers, &vouchers, start_date, end_date))
    }

    /// Balance sheet over a date range
    pub async fn balance_sheet(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> BooksResult<BalanceSheet> {
        let ledgers = self.registry.list_ledgers().await?;
        let vouchers = self.journal.list_vouchers(None, None).await?;
        Ok(reports::balance_sheet(&ledgers, &vouchers, start_date, end_date))
    }

    /// Day book for one calendar day
    pub async fn day_book(&self, on: NaiveDate) -> BooksResult<DayBook> {
        let vouchers = self.journal.list_vouchers(None, None).await?;
        Ok(reports::day_book(&vouchers, on))
    }

    /// Account statement (running balance) for one ledger
    pub async fn account_statement(
        &self,
        ledger_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> BooksResult<AccountStatement> {
        let ledger = self.registry.get_ledger_required(ledger_id).await?;
        let vouchers = self.journal.list_vouchers(None, None).await?;
        Ok(reports::account_statement(&ledger, &vouchers, start_date, end_date))
    }

    /// GST input/output summary over a date range
    pub async fn gst_report(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> BooksResult<GstReport> {
        let sales = self.storage.list_sales(None, None).await?;
        let purchases = self.storage.list_purchases(None, None).await?;
        Ok(gst_summary(&sales, &purchases, start_date, end_date))
    }
}
