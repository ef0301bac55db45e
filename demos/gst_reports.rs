//! GST reporting examples

use bigdecimal::BigDecimal;
use bizbooks_core::utils::MemoryStorage;
use bizbooks_core::{Books, GstRate};
use chrono::NaiveDate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 BizBooks Core - GST Reporting Examples\n");

    // 1. Rate structures
    println!("📊 Intra-state Rate Structure (CGST + SGST):");
    let intra = GstRate::intra_state(BigDecimal::from(18));
    println!("  Total: {}%", intra.total_rate);
    println!("  CGST:  {}%", intra.cgst_rate);
    println!("  SGST:  {}%", intra.sgst_rate);
    println!("  IGST:  {}%\n", intra.igst_rate);

    println!("🌍 Inter-state Rate Structure (IGST only):");
    let inter = GstRate::inter_state(BigDecimal::from(18));
    println!("  Total: {}%", inter.total_rate);
    println!("  IGST:  {}%\n", inter.igst_rate);

    let split = intra.split_amount(&BigDecimal::from(1800));
    println!("💱 Splitting ₹1,800 of tax at the 18% intra-state rate:");
    println!("  CGST: ₹{}", split.cgst);
    println!("  SGST: ₹{}\n", split.sgst);

    // 2. Record a month of trade and summarize it
    println!("💰 Recording March Trade...");
    let mut books = Books::new(MemoryStorage::new());

    books
        .record_sale(
            "widget",
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            BigDecimal::from(10),
            BigDecimal::from(100),
            BigDecimal::from(18),
        )
        .await?;
    books
        .record_sale(
            "rice-bag",
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            BigDecimal::from(40),
            BigDecimal::from(50),
            BigDecimal::from(5),
        )
        .await?;
    books
        .record_purchase(
            "widget",
            NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
            BigDecimal::from(20),
            BigDecimal::from(50),
            BigDecimal::from(18),
        )
        .await?;
    println!("  ✓ 2 sales, 1 purchase recorded\n");

    // 3. The GSTR-style summary
    let report = books
        .gst_report(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .await?;

    println!("📈 Outward Supplies (rate-wise):");
    for line in &report.outward.intra_state {
        println!(
            "  {}% on ₹{}: CGST ₹{} + SGST ₹{} = ₹{}",
            line.rate, line.taxable_value, line.cgst, line.sgst, line.total_tax
        );
    }
    println!();

    println!("📈 Inward Supplies / Input Credit (rate-wise):");
    for line in &report.inward.intra_state {
        println!(
            "  {}% on ₹{}: CGST ₹{} + SGST ₹{} = ₹{}",
            line.rate, line.taxable_value, line.cgst, line.sgst, line.total_tax
        );
    }
    println!();

    println!("🧮 Summary:");
    println!("  Output tax payable: ₹{}", report.total_tax_payable);
    println!("  Input tax credit:   ₹{}", report.total_tax_paid);
    println!("  Net tax liability:  ₹{}", report.net_tax_liability);

    Ok(())
}
