//! `billscan show`: fetch the inventory from a running instance and print
//! each bill to the terminal.

use anyhow::{Context, Result};
use serde::Deserialize;

use billscan_core::BillRecord;
use billscan_render::{format_amount, render, DisplayModel};

#[derive(Deserialize)]
struct InventoryResponse {
    #[serde(default)]
    inventory: Vec<BillRecord>,
}

pub async fn run(api_url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{api_url}/inventory/view"))
        .send()
        .await
        .with_context(|| format!("failed to reach billscan at {api_url}"))?;
    let body: InventoryResponse = resp
        .json()
        .await
        .context("invalid inventory response")?;

    if body.inventory.is_empty() {
        println!("No inventory records found. Upload some bills to get started.");
        return Ok(());
    }
    for record in &body.inventory {
        print_bill(record);
        println!();
    }
    Ok(())
}

fn print_bill(record: &BillRecord) {
    match render(record) {
        DisplayModel::Bill(bill) => {
            println!(
                "Bill #{}",
                bill.header.bill_no.as_deref().unwrap_or("Unknown")
            );
            println!("  Date:     {}", bill.header.date.as_deref().unwrap_or(""));
            println!(
                "  Customer: {}  Phone: {}",
                bill.header.customer.as_deref().unwrap_or(""),
                bill.header.phone.as_deref().unwrap_or("")
            );
            println!(
                "  Vendor:   {}  {}",
                bill.vendor.name.as_deref().unwrap_or(""),
                bill.vendor.address.as_deref().unwrap_or("")
            );
            if !bill.items.is_empty() {
                println!("  Items:");
                for item in &bill.items {
                    println!(
                        "    {:<8} {:<28} qty {:>8.2}  rate {:>10}  amount {:>10}",
                        item.hsn.as_deref().unwrap_or(""),
                        item.description.as_deref().unwrap_or(""),
                        item.quantity,
                        format_amount(item.rate),
                        format_amount(item.amount),
                    );
                }
            }
            println!("  Sub Total:   {}", format_amount(bill.totals.sub_total));
            println!("  CGST:        {}", format_amount(bill.totals.cgst));
            println!("  SGST:        {}", format_amount(bill.totals.sgst));
            println!("  IGST:        {}", format_amount(bill.totals.igst));
            println!("  Grand Total: {}", format_amount(bill.totals.grand_total));
            match bill.bank {
                Some(bank) => {
                    println!(
                        "  Bank: {}  Branch: {}  A/C: {}  IFSC: {}",
                        bank.bank_name, bank.branch, bank.account_no, bank.ifsc
                    );
                }
                None => println!("  No bank details available"),
            }
        }
        DisplayModel::Opaque { record } => {
            println!(
                "{}",
                serde_json::to_string_pretty(&record).unwrap_or_default()
            );
        }
    }
}
