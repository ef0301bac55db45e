//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
///
/// List reads come back in a stable order (ledgers by name, vouchers and
/// sales/purchases by date) so repeated report runs over the same data are
/// identical.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    ledgers: Arc<RwLock<HashMap<String, Ledger>>>,
    vouchers: Arc<RwLock<HashMap<String, Voucher>>>,
    sales: Arc<RwLock<HashMap<String, Sale>>>,
    purchases: Arc<RwLock<HashMap<String, Purchase>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            ledgers: Arc::new(RwLock::new(HashMap::new())),
            vouchers: Arc::new(RwLock::new(HashMap::new())),
            sales: Arc::new(RwLock::new(HashMap::new())),
            purchases: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.ledgers.write().unwrap().clear();
        self.vouchers.write().unwrap().clear();
        self.sales.write().unwrap().clear();
        self.purchases.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn within(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    if let Some(start) = start {
        if date < start {
            return false;
        }
    }
    if let Some(end) = end {
        if date > end {
            return false;
        }
    }
    true
}

#[async_trait]
impl BooksStorage for MemoryStorage {
    async fn save_ledger(&mut self, ledger: &Ledger) -> BooksResult<()> {
        self.ledgers
            .write()
            .unwrap()
            .insert(ledger.id.clone(), ledger.clone());
        Ok(())
    }

    async fn get_ledger(&self, ledger_id: &str) -> BooksResult<Option<Ledger>> {
        Ok(self.ledgers.read().unwrap().get(ledger_id).cloned())
    }

    async fn find_ledger_by_name(&self, name: &str) -> BooksResult<Option<Ledger>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .ledgers
            .read()
            .unwrap()
            .values()
            .find(|ledger| ledger.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn list_ledgers(&self, group: Option<LedgerGroup>) -> BooksResult<Vec<Ledger>> {
        let ledgers = self.ledgers.read().unwrap();
        let mut filtered: Vec<Ledger> = ledgers
            .values()
            .filter(|ledger| group.is_none_or(|g| ledger.group == g))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(filtered)
    }

    async fn update_ledger(&mut self, ledger: &Ledger) -> BooksResult<()> {
        if self.ledgers.read().unwrap().contains_key(&ledger.id) {
            self.ledgers
                .write()
                .unwrap()
                .insert(ledger.id.clone(), ledger.clone());
            Ok(())
        } else {
            Err(BooksError::LedgerNotFound(ledger.id.clone()))
        }
    }

    async fn delete_ledger(&mut self, ledger_id: &str) -> BooksResult<()> {
        if self.ledgers.write().unwrap().remove(ledger_id).is_some() {
            Ok(())
        } else {
            Err(BooksError::LedgerNotFound(ledger_id.to_string()))
        }
    }

    async fn save_voucher(&mut self, voucher: &Voucher) -> BooksResult<()> {
        self.vouchers
            .write()
            .unwrap()
            .insert(voucher.id.clone(), voucher.clone());
        Ok(())
    }

    async fn get_voucher(&self, voucher_id: &str) -> BooksResult<Option<Voucher>> {
        Ok(self.vouchers.read().unwrap().get(voucher_id).cloned())
    }

    async fn list_vouchers(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Voucher>> {
        let vouchers = self.vouchers.read().unwrap();
        let mut filtered: Vec<Voucher> = vouchers
            .values()
            .filter(|voucher| within(voucher.date, start_date, end_date))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.voucher_number.cmp(&b.voucher_number))
        });
        Ok(filtered)
    }

    async fn count_vouchers_by_type(&self, voucher_type: VoucherType) -> BooksResult<usize> {
        Ok(self
            .vouchers
            .read()
            .unwrap()
            .values()
            .filter(|voucher| voucher.voucher_type == voucher_type)
            .count())
    }

    async fn delete_voucher(&mut self, voucher_id: &str) -> BooksResult<()> {
        if self.vouchers.write().unwrap().remove(voucher_id).is_some() {
            Ok(())
        } else {
            Err(BooksError::VoucherNotFound(voucher_id.to_string()))
        }
    }

    async fn save_sale(&mut self, sale: &Sale) -> BooksResult<()> {
        self.sales
            .write()
            .unwrap()
            .insert(sale.id.clone(), sale.clone());
        Ok(())
    }

    async fn list_sales(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Sale>> {
        let sales = self.sales.read().unwrap();
        let mut filtered: Vec<Sale> = sales
            .values()
            .filter(|sale| within(sale.date, start_date, end_date))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(filtered)
    }

    async fn save_purchase(&mut self, purchase: &Purchase) -> BooksResult<()> {
        self.purchases
            .write()
            .unwrap()
            .insert(purchase.id.clone(), purchase.clone());
        Ok(())
    }

    async fn list_purchases(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Purchase>> {
        let purchases = self.purchases.read().unwrap();
        let mut filtered: Vec<Purchase> = purchases
            .values()
            .filter(|purchase| within(purchase.date, start_date, end_date))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(filtered)
    }
}
