//! Basic bookkeeping usage example

use bigdecimal::BigDecimal;
use bizbooks_core::utils::MemoryStorage;
use bizbooks_core::{Books, LedgerGroup, VoucherBuilder, VoucherType};
use chrono::NaiveDate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 BizBooks Core - Basic Bookkeeping Example\n");

    // Create the books with in-memory storage
    let storage = MemoryStorage::new();
    let mut books = Books::new(storage);

    // 1. Seed the standard chart of accounts
    println!("📊 Seeding Chart of Accounts...");
    let chart = books.seed_default_chart_of_accounts("Acme Traders").await?;

    for ledger in &chart {
        println!("  ✓ Created ledger: {} ({})", ledger.name, ledger.group.label());
    }
    println!();

    // 2. Record some business transactions
    println!("💰 Recording Vouchers...\n");

    let cash = books.find_ledger_by_name("Cash-in-Hand").await?.unwrap();
    let capital = books.find_ledger_by_name("Acme Traders Capital").await?.unwrap();

    // Owner brings in capital
    let investment = VoucherBuilder::new(
        VoucherType::Receipt,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    )
    .narration("Initial capital introduced".to_string())
    .debit(cash.id.clone(), cash.name.clone(), BigDecimal::from(50000))
    .credit(capital.id.clone(), capital.name.clone(), BigDecimal::from(50000))
    .build()?;
    let investment = books.create_voucher(investment).await?;
    println!("  ✓ {} Capital introduced: ₹50,000", investment.voucher_number);

    // Sell widgets on credit through the invoice helper
    books
        .add_ledger(
            "Sharma Retail".to_string(),
            LedgerGroup::SundryDebtors,
            BigDecimal::from(0),
        )
        .await?;
    let sale = books
        .create_sales_voucher(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            "Sharma Retail",
            "Widget",
            BigDecimal::from(10),
            BigDecimal::from(100),
            BigDecimal::from(18),
        )
        .await?;
    println!("  ✓ {} Credit sale: ₹{}", sale.voucher_number, sale.total_debit);

    // Pay the month's rent
    let rent = books.find_ledger_by_name("Rent Expense").await?.unwrap();
    let rent_payment = VoucherBuilder::new(
        VoucherType::Payment,
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
    )
    .narration("Shop rent for March".to_string())
    .debit(rent.id.clone(), rent.name.clone(), BigDecimal::from(8000))
    .credit(cash.id.clone(), cash.name.clone(), BigDecimal::from(8000))
    .build()?;
    let rent_payment = books.create_voucher(rent_payment).await?;
    println!("  ✓ {} Rent paid: ₹8,000\n", rent_payment.voucher_number);

    // 3. Derive the reports
    println!("📈 Trial Balance:");
    let trial_balance = books.trial_balance().await?;
    for row in trial_balance
        .rows
        .iter()
        .filter(|r| r.balance != BigDecimal::from(0))
    {
        println!(
            "  {:<24} {:?} ₹{}",
            row.ledger_name, row.balance_type, row.balance
        );
    }
    println!(
        "  Totals: ₹{} Dr / ₹{} Cr\n",
        trial_balance.total_debit, trial_balance.total_credit
    );

    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

    println!("📈 Profit & Loss (March):");
    let statement = books.profit_loss(start, end).await?;
    println!("  Revenue:      ₹{}", statement.total_revenue);
    println!("  Gross Profit: ₹{}", statement.gross_profit);
    println!("  Net Profit:   ₹{}\n", statement.net_profit);

    println!("📈 Balance Sheet (March):");
    let sheet = books.balance_sheet(start, end).await?;
    println!("  Total Assets:      ₹{}", sheet.total_assets);
    println!("  Total Liabilities: ₹{}\n", sheet.total_liabilities);

    println!("📅 Day Book (15 March):");
    let day = books
        .day_book(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        .await?;
    for row in &day.transactions {
        println!(
            "  {} {} {} ₹{}",
            row.voucher_number,
            row.voucher_type.label(),
            row.party_name.as_deref().unwrap_or("-"),
            row.total_debit
        );
    }
    println!();

    println!("📜 Account Statement (Sharma Retail, March):");
    let party = books.find_ledger_by_name("Sharma Retail").await?.unwrap();
    let account = books.account_statement(&party.id, start, end).await?;
    for row in &account.transactions {
        println!(
            "  {} {} {:?} ₹{} → ₹{}",
            row.date, row.voucher_number, row.entry_type, row.amount, row.balance
        );
    }
    println!("  Closing Balance: ₹{}", account.closing_balance);

    Ok(())
}
