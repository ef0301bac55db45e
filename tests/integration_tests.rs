//! Integration tests for bizbooks-core

use bigdecimal::BigDecimal;
use bizbooks_core::{
    entries,
    utils::{EnhancedLedgerValidator, EnhancedVoucherValidator, MemoryStorage},
    BalanceType, Books, BooksError, EntryType, LedgerGroup, LedgerUpdate, VoucherBuilder,
    VoucherType,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_complete_bookkeeping_workflow() {
    let mut books = Books::new(MemoryStorage::new());

    // Set up the chart of accounts
    let chart = books
        .seed_default_chart_of_accounts("Acme Traders")
        .await
        .unwrap();
    assert_eq!(chart.len(), 24);

    let cash = books.find_ledger_by_name("Cash-in-Hand").await.unwrap().unwrap();
    let capital = books
        .find_ledger_by_name("Acme Traders Capital")
        .await
        .unwrap()
        .unwrap();

    // Owner brings in capital
    let investment = VoucherBuilder::new(VoucherType::Receipt, date(2024, 3, 1))
        .narration("Initial capital introduced".to_string())
        .debit(cash.id.clone(), cash.name.clone(), BigDecimal::from(100000))
        .credit(capital.id.clone(), capital.name.clone(), BigDecimal::from(100000))
        .build()
        .unwrap();
    books.create_voucher(investment).await.unwrap();

    // Sell on credit through the invoice helper
    books
        .add_ledger("Acme".to_string(), LedgerGroup::SundryDebtors, BigDecimal::from(0))
        .await
        .unwrap();
    let sale = books
        .create_sales_voucher(
            date(2024, 3, 15),
            "Acme",
            "Widget",
            BigDecimal::from(10),
            BigDecimal::from(100),
            BigDecimal::from(18),
        )
        .await
        .unwrap();
    assert_eq!(sale.voucher_number, "SLS-2403-0001");
    assert_eq!(sale.total_debit, BigDecimal::from(1180));

    // Trial balance covers full history and reconciles
    let trial_balance = books.trial_balance().await.unwrap();
    assert_eq!(trial_balance.total_debit, trial_balance.total_credit);
    assert_eq!(trial_balance.total_debit, BigDecimal::from(101180));

    // The sales ledger shows up in the P&L revenue bucket
    let statement = books
        .profit_loss(date(2024, 3, 1), date(2024, 3, 31))
        .await
        .unwrap();
    assert_eq!(statement.total_revenue, BigDecimal::from(1000));
    assert_eq!(statement.direct_incomes.len(), 1);
    assert_eq!(statement.direct_incomes[0].ledger_name, "Sales A/c");

    // The debtor shows up under current assets on the balance sheet
    let sheet = books
        .balance_sheet(date(2024, 3, 1), date(2024, 3, 31))
        .await
        .unwrap();
    assert!(sheet
        .current_assets
        .iter()
        .any(|l| l.ledger_name == "Acme" && l.balance == BigDecimal::from(1180)));
    // capital keeps its native credit-heavy sign
    assert!(sheet
        .capital
        .iter()
        .any(|l| l.balance == BigDecimal::from(-100000)));

    // Day book lists both March vouchers on their own days
    let opening_day = books.day_book(date(2024, 3, 1)).await.unwrap();
    assert_eq!(opening_day.transactions.len(), 1);
    assert_eq!(opening_day.total_debit, BigDecimal::from(100000));

    let sale_day = books.day_book(date(2024, 3, 15)).await.unwrap();
    assert_eq!(sale_day.transactions.len(), 1);
    assert_eq!(sale_day.transactions[0].voucher_type, VoucherType::Sales);
}

#[tokio::test]
async fn test_voucher_numbering_per_type_sequences() {
    let mut books = Books::new(MemoryStorage::new());
    books
        .seed_default_chart_of_accounts("Acme Traders")
        .await
        .unwrap();
    books
        .add_ledger("Acme".to_string(), LedgerGroup::SundryDebtors, BigDecimal::from(0))
        .await
        .unwrap();
    books
        .add_ledger("Bulk Supplies Co".to_string(), LedgerGroup::SundryCreditors, BigDecimal::from(0))
        .await
        .unwrap();

    let first = books
        .create_sales_voucher(
            date(2024, 3, 5),
            "Acme",
            "Widget",
            BigDecimal::from(1),
            BigDecimal::from(100),
            BigDecimal::from(18),
        )
        .await
        .unwrap();
    assert_eq!(first.voucher_number, "SLS-2403-0001");

    let second = books
        .create_sales_voucher(
            date(2024, 3, 20),
            "Acme",
            "Widget",
            BigDecimal::from(2),
            BigDecimal::from(100),
            BigDecimal::from(18),
        )
        .await
        .unwrap();
    assert_eq!(second.voucher_number, "SLS-2403-0002");

    // Purchases run their own sequence
    let purchase = books
        .create_purchase_voucher(
            date(2024, 3, 21),
            "Bulk Supplies Co",
            "Widget",
            BigDecimal::from(5),
            BigDecimal::from(60),
            BigDecimal::from(18),
        )
        .await
        .unwrap();
    assert_eq!(purchase.voucher_number, "PUR-2403-0001");
}

#[test]
fn test_sales_entry_builder_shape() {
    let lines = entries::sales_voucher_entries(
        "Acme",
        "Widget",
        BigDecimal::from(10),
        BigDecimal::from(100),
        BigDecimal::from(18),
        "Sales A/c",
    );

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].ledger_name, "Acme");
    assert_eq!(lines[0].amount, BigDecimal::from(1180));
    assert_eq!(lines[1].ledger_name, "Sales A/c");
    assert_eq!(lines[1].amount, BigDecimal::from(1000));
    assert_eq!(lines[2].ledger_name, "GST Payable");
    assert_eq!(lines[2].amount, BigDecimal::from(180));

    let debits: BigDecimal = lines
        .iter()
        .filter(|e| e.entry_type == EntryType::Debit)
        .map(|e| &e.amount)
        .sum();
    let credits: BigDecimal = lines
        .iter()
        .filter(|e| e.entry_type == EntryType::Credit)
        .map(|e| &e.amount)
        .sum();
    assert_eq!(debits, BigDecimal::from(1180));
    assert_eq!(debits, credits);
}

#[tokio::test]
async fn test_unbalanced_voucher_rejected_before_persistence() {
    let mut books = Books::with_validators(
        MemoryStorage::new(),
        Box::new(EnhancedLedgerValidator),
        Box::new(EnhancedVoucherValidator),
    );

    // the builder refuses to produce an unbalanced voucher
    let draft = VoucherBuilder::new(VoucherType::Journal, date(2024, 3, 1))
        .debit("d1".to_string(), "Cash-in-Hand".to_string(), BigDecimal::from(1000))
        .credit("c1".to_string(), "Sales A/c".to_string(), BigDecimal::from(500))
        .build();
    assert!(draft.is_err());

    // and a hand-built unbalanced voucher is rejected by the journal
    let mut voucher = VoucherBuilder::new(VoucherType::Journal, date(2024, 3, 1))
        .debit("d1".to_string(), "Cash-in-Hand".to_string(), BigDecimal::from(500))
        .credit("c1".to_string(), "Sales A/c".to_string(), BigDecimal::from(500))
        .build()
        .unwrap();
    voucher.entries[0].amount = BigDecimal::from(750);

    let result = books.create_voucher(voucher).await;
    assert!(matches!(result, Err(BooksError::InvalidVoucher(_))));
    assert!(books.list_vouchers(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_day_book_empty_day() {
    let books = Books::new(MemoryStorage::new());
    let book = books.day_book(date(2024, 7, 1)).await.unwrap();

    assert!(book.transactions.is_empty());
    assert_eq!(book.total_debit, BigDecimal::from(0));
    assert_eq!(book.total_credit, BigDecimal::from(0));
}

#[tokio::test]
async fn test_account_statement_running_balance() {
    let mut books = Books::new(MemoryStorage::new());
    let party = books
        .add_ledger("Acme".to_string(), LedgerGroup::SundryDebtors, BigDecimal::from(0))
        .await
        .unwrap();
    let sales = books
        .add_ledger("Sales A/c".to_string(), LedgerGroup::DirectIncomes, BigDecimal::from(0))
        .await
        .unwrap();

    let invoice = VoucherBuilder::new(VoucherType::Sales, date(2024, 3, 2))
        .narration("Invoice".to_string())
        .debit(party.id.clone(), party.name.clone(), BigDecimal::from(500))
        .credit(sales.id.clone(), sales.name.clone(), BigDecimal::from(500))
        .build()
        .unwrap();
    books.create_voucher(invoice).await.unwrap();

    let receipt = VoucherBuilder::new(VoucherType::Receipt, date(2024, 3, 9))
        .narration("Part payment received".to_string())
        .debit(sales.id.clone(), sales.name.clone(), BigDecimal::from(200))
        .credit(party.id.clone(), party.name.clone(), BigDecimal::from(200))
        .build()
        .unwrap();
    books.create_voucher(receipt).await.unwrap();

    let statement = books
        .account_statement(&party.id, date(2024, 3, 1), date(2024, 3, 31))
        .await
        .unwrap();

    assert_eq!(statement.opening_balance, BigDecimal::from(0));
    assert_eq!(statement.transactions.len(), 2);
    assert_eq!(statement.transactions[0].balance, BigDecimal::from(500));
    assert_eq!(statement.transactions[1].balance, BigDecimal::from(300));
    assert_eq!(statement.closing_balance, BigDecimal::from(300));
}

#[tokio::test]
async fn test_gst_report_workflow() {
    let mut books = Books::new(MemoryStorage::new());

    books
        .record_sale(
            "widget",
            date(2024, 3, 5),
            BigDecimal::from(10),
            BigDecimal::from(100),
            BigDecimal::from(18),
        )
        .await
        .unwrap();
    books
        .record_sale(
            "gadget",
            date(2024, 3, 9),
            BigDecimal::from(4),
            BigDecimal::from(500),
            BigDecimal::from(5),
        )
        .await
        .unwrap();
    books
        .record_purchase(
            "widget",
            date(2024, 3, 12),
            BigDecimal::from(20),
            BigDecimal::from(50),
            BigDecimal::from(18),
        )
        .await
        .unwrap();

    let report = books
        .gst_report(date(2024, 3, 1), date(2024, 3, 31))
        .await
        .unwrap();

    // 18% on 1000 and 5% on 2000 sold; 18% on 1000 purchased
    assert_eq!(report.outward.intra_state.len(), 2);
    assert_eq!(report.total_tax_payable, BigDecimal::from(280));
    assert_eq!(report.total_tax_paid, BigDecimal::from(180));
    assert_eq!(report.net_tax_liability, BigDecimal::from(100));
    assert!(report.outward.inter_state.is_empty());
    assert!(report.inward.inter_state.is_empty());
}

#[tokio::test]
async fn test_ledger_deletion_degrades_but_never_fails() {
    let mut books = Books::new(MemoryStorage::new());
    let cash = books
        .add_ledger("Cash-in-Hand".to_string(), LedgerGroup::CashInHand, BigDecimal::from(0))
        .await
        .unwrap();
    let sales = books
        .add_ledger("Sales A/c".to_string(), LedgerGroup::DirectIncomes, BigDecimal::from(0))
        .await
        .unwrap();

    let voucher = VoucherBuilder::new(VoucherType::Receipt, date(2024, 3, 2))
        .debit(cash.id.clone(), cash.name.clone(), BigDecimal::from(400))
        .credit(sales.id.clone(), sales.name.clone(), BigDecimal::from(400))
        .build()
        .unwrap();
    books.create_voucher(voucher).await.unwrap();

    // deleting a referenced ledger is allowed, with no cascade
    books.delete_ledger(&sales.id).await.unwrap();
    assert_eq!(books.list_vouchers(None, None).await.unwrap().len(), 1);

    // reports still work; the dangling side simply no longer contributes
    let trial_balance = books.trial_balance().await.unwrap();
    assert_eq!(trial_balance.rows.len(), 1);
    assert_eq!(trial_balance.total_debit, BigDecimal::from(400));
    assert_eq!(trial_balance.total_credit, BigDecimal::from(0));

    let statement = books
        .profit_loss(date(2024, 3, 1), date(2024, 3, 31))
        .await
        .unwrap();
    assert!(statement.direct_incomes.is_empty());
}

#[tokio::test]
async fn test_voucher_deletion_is_hard() {
    let mut books = Books::new(MemoryStorage::new());
    let cash = books
        .add_ledger("Cash-in-Hand".to_string(), LedgerGroup::CashInHand, BigDecimal::from(0))
        .await
        .unwrap();
    let sales = books
        .add_ledger("Sales A/c".to_string(), LedgerGroup::DirectIncomes, BigDecimal::from(0))
        .await
        .unwrap();

    let voucher = VoucherBuilder::new(VoucherType::Receipt, date(2024, 3, 2))
        .debit(cash.id.clone(), cash.name.clone(), BigDecimal::from(400))
        .credit(sales.id.clone(), sales.name.clone(), BigDecimal::from(400))
        .build()
        .unwrap();
    let voucher = books.create_voucher(voucher).await.unwrap();

    books.delete_voucher(&voucher.id).await.unwrap();

    // no compensating entry appears; the journal is simply empty again
    assert!(books.list_vouchers(None, None).await.unwrap().is_empty());
    let trial_balance = books.trial_balance().await.unwrap();
    assert_eq!(trial_balance.total_debit, BigDecimal::from(0));
}

#[tokio::test]
async fn test_aggregations_are_idempotent() {
    let mut books = Books::new(MemoryStorage::new());
    books
        .seed_default_chart_of_accounts("Acme Traders")
        .await
        .unwrap();
    books
        .add_ledger("Acme".to_string(), LedgerGroup::SundryDebtors, BigDecimal::from(0))
        .await
        .unwrap();
    books
        .create_sales_voucher(
            date(2024, 3, 15),
            "Acme",
            "Widget",
            BigDecimal::from(3),
            BigDecimal::from(250),
            BigDecimal::from(12),
        )
        .await
        .unwrap();

    assert_eq!(
        books.trial_balance().await.unwrap(),
        books.trial_balance().await.unwrap()
    );
    assert_eq!(
        books.profit_loss(date(2024, 3, 1), date(2024, 3, 31)).await.unwrap(),
        books.profit_loss(date(2024, 3, 1), date(2024, 3, 31)).await.unwrap()
    );
    assert_eq!(
        books.balance_sheet(date(2024, 3, 1), date(2024, 3, 31)).await.unwrap(),
        books.balance_sheet(date(2024, 3, 1), date(2024, 3, 31)).await.unwrap()
    );
    assert_eq!(
        books.day_book(date(2024, 3, 15)).await.unwrap(),
        books.day_book(date(2024, 3, 15)).await.unwrap()
    );
}

#[tokio::test]
async fn test_current_balance_is_explicitly_managed() {
    let mut books = Books::new(MemoryStorage::new());
    let cash = books
        .add_ledger("Cash-in-Hand".to_string(), LedgerGroup::CashInHand, BigDecimal::from(1000))
        .await
        .unwrap();
    let sales = books
        .add_ledger("Sales A/c".to_string(), LedgerGroup::DirectIncomes, BigDecimal::from(0))
        .await
        .unwrap();
    assert_eq!(cash.current_balance, BigDecimal::from(1000));

    let voucher = VoucherBuilder::new(VoucherType::Receipt, date(2024, 3, 2))
        .debit(cash.id.clone(), cash.name.clone(), BigDecimal::from(400))
        .credit(sales.id.clone(), sales.name.clone(), BigDecimal::from(400))
        .build()
        .unwrap();
    books.create_voucher(voucher).await.unwrap();

    // posting left the cache alone
    let cached = books.get_ledger(&cash.id).await.unwrap().unwrap();
    assert_eq!(cached.current_balance, BigDecimal::from(1000));

    // an explicit edit overwrites it
    books
        .update_ledger(
            &cash.id,
            LedgerUpdate {
                current_balance: Some(BigDecimal::from(9999)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let edited = books.get_ledger(&cash.id).await.unwrap().unwrap();
    assert_eq!(edited.current_balance, BigDecimal::from(9999));

    // an explicit recompute derives opening + movement from the journal
    let recomputed = books.recompute_balance(&cash.id).await.unwrap();
    assert_eq!(recomputed, BigDecimal::from(1400));
}

#[tokio::test]
async fn test_trial_balance_seeds_from_opening_balances() {
    let mut books = Books::new(MemoryStorage::new());
    books
        .add_ledger("Cash-in-Hand".to_string(), LedgerGroup::CashInHand, BigDecimal::from(750))
        .await
        .unwrap();
    books
        .add_ledger(
            "Sundry Creditors".to_string(),
            LedgerGroup::SundryCreditors,
            BigDecimal::from(-750),
        )
        .await
        .unwrap();

    let trial_balance = books.trial_balance().await.unwrap();
    assert_eq!(trial_balance.total_debit, BigDecimal::from(750));
    assert_eq!(trial_balance.total_credit, BigDecimal::from(750));

    let creditor_row = trial_balance
        .rows
        .iter()
        .find(|r| r.ledger_name == "Sundry Creditors")
        .unwrap();
    assert_eq!(creditor_row.balance_type, BalanceType::Credit);
    assert_eq!(creditor_row.balance, BigDecimal::from(750));
}

#[tokio::test]
async fn test_reports_serialize_to_json() {
    let mut books = Books::new(MemoryStorage::new());
    books
        .seed_default_chart_of_accounts("Acme Traders")
        .await
        .unwrap();

    let trial_balance = books.trial_balance().await.unwrap();
    let json = serde_json::to_string(&trial_balance).unwrap();
    assert!(json.contains("total_debit"));

    let report = books
        .gst_report(date(2024, 3, 1), date(2024, 3, 31))
        .await
        .unwrap();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("net_tax_liability"));
}
