use serde::Serialize;
use serde_json::Value;

use billscan_core::{recover_structured, BillRecord};

/// What the dashboard shows for one record: either a structured bill view
/// or, when nothing usable could be recovered, an opaque key/value dump of
/// the record as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayModel {
    Bill(BillDisplay),
    Opaque { record: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillDisplay {
    pub header: HeaderBlock,
    pub vendor: VendorBlock,
    pub items: Vec<ItemRow>,
    pub totals: TotalsBlock,
    /// `None` when no bank field is populated; the dashboard shows
    /// "No bank details available" in that case.
    pub bank: Option<BankBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub bill_no: Option<String>,
    pub date: Option<String>,
    pub customer: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorBlock {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// One normalized item row. Numeric columns are always concrete floats;
/// unparseable or missing values have already been coerced to 0.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub hsn: Option<String>,
    pub description: Option<String>,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsBlock {
    pub sub_total: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
    pub grand_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankBlock {
    pub bank_name: String,
    pub branch: String,
    pub account_no: String,
    pub ifsc: String,
}

/// Render one record into a display model.
///
/// Pure and idempotent. A record with no usable structured fields gets one
/// more recovery attempt against its raw response text (the fenced-JSON
/// case); when that fails too the record is dumped as-is.
pub fn render(record: &BillRecord) -> DisplayModel {
    if record.has_structured_fields() {
        return DisplayModel::Bill(bill_view(record));
    }
    if let Some(raw) = record.raw_text.as_deref() {
        if let Some(recovered) = recover_structured(raw) {
            return DisplayModel::Bill(bill_view(&recovered));
        }
    }
    DisplayModel::Opaque {
        record: serde_json::to_value(record).unwrap_or(Value::Null),
    }
}

/// Format an amount the way the dashboard prints money.
pub fn format_amount(value: f64) -> String {
    format!("\u{20b9}{value:.2}")
}

fn bill_view(record: &BillRecord) -> BillDisplay {
    let items = record
        .items
        .iter()
        .map(|item| ItemRow {
            hsn: item.hsn.clone(),
            description: item.description.clone(),
            quantity: as_number(item.quantity.as_ref()),
            rate: as_number(item.rate.as_ref()),
            amount: as_number(item.amount.as_ref()),
        })
        .collect();

    let bank = record
        .bank_details
        .as_ref()
        .filter(|bank| bank.is_populated())
        .map(|bank| BankBlock {
            bank_name: bank.bank_name.clone().unwrap_or_else(|| "N/A".into()),
            branch: bank.branch.clone().unwrap_or_else(|| "N/A".into()),
            account_no: bank.account_no.clone().unwrap_or_else(|| "N/A".into()),
            ifsc: bank.ifsc.clone().unwrap_or_else(|| "N/A".into()),
        });

    BillDisplay {
        header: HeaderBlock {
            bill_no: record.bill_no.clone(),
            date: record.date.clone(),
            customer: record.customer.clone(),
            phone: record.customer_phone.clone(),
        },
        vendor: VendorBlock {
            name: record.vendor.clone(),
            address: record.vendor_address.clone(),
        },
        items,
        totals: TotalsBlock {
            sub_total: as_number(record.total.as_ref()),
            cgst: as_number(record.cgst.as_ref()),
            sgst: as_number(record.sgst.as_ref()),
            igst: as_number(record.igst.as_ref()),
            grand_total: as_number(record.grand_total.as_ref()),
        },
        bank,
    }
}

/// Coerce a raw JSON value to a float; unparseable and missing both map to 0.0.
fn as_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> BillRecord {
        serde_json::from_value(json!({
            "bill_no": "INV-12",
            "date": "2024-03-01",
            "customer": "Asha Traders",
            "customer_phone": "98765 43210",
            "vendor": "VMart Wholesale",
            "vendor_address": "12 Market Road",
            "items": [
                {"hsn": "4817", "description": "pen", "quantity": "3", "rate": "10", "amount": "30"},
                {"description": "notebook", "quantity": "abc", "rate": 45.5}
            ],
            "total": "75.5",
            "cgst": 3.4,
            "grand_total": "82.3"
        }))
        .unwrap()
    }

    #[test]
    fn structured_record_renders_bill_view() {
        let model = render(&sample_record());
        let DisplayModel::Bill(bill) = model else {
            panic!("expected structured bill view");
        };
        assert_eq!(bill.header.bill_no.as_deref(), Some("INV-12"));
        assert_eq!(bill.vendor.name.as_deref(), Some("VMart Wholesale"));
        assert_eq!(bill.items.len(), 2);
        assert!(bill.bank.is_none());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(as_number(Some(&json!("3"))), 3.0);
        assert_eq!(as_number(Some(&json!(3))), 3.0);
        assert_eq!(as_number(Some(&json!("abc"))), 0.0);
        assert_eq!(as_number(Some(&json!(" 12.5 "))), 12.5);
        assert_eq!(as_number(Some(&json!(null))), 0.0);
        assert_eq!(as_number(None), 0.0);
    }

    #[test]
    fn unparseable_item_fields_coerce_to_zero() {
        let DisplayModel::Bill(bill) = render(&sample_record()) else {
            panic!("expected bill view");
        };
        let notebook = &bill.items[1];
        assert_eq!(notebook.quantity, 0.0);
        assert_eq!(notebook.rate, 45.5);
        assert_eq!(notebook.amount, 0.0);
    }

    #[test]
    fn missing_totals_default_to_zero() {
        let DisplayModel::Bill(bill) = render(&sample_record()) else {
            panic!("expected bill view");
        };
        assert_eq!(bill.totals.sub_total, 75.5);
        assert_eq!(bill.totals.sgst, 0.0);
        assert_eq!(bill.totals.igst, 0.0);
        assert_eq!(bill.totals.grand_total, 82.3);
    }

    #[test]
    fn rendering_is_idempotent() {
        let record = sample_record();
        assert_eq!(render(&record), render(&record));

        let mut placeholder = BillRecord::unparsed();
        placeholder.raw_text = Some("no json here".into());
        assert_eq!(render(&placeholder), render(&placeholder));
    }

    #[test]
    fn placeholder_with_fenced_raw_text_is_re_recovered() {
        let mut placeholder = BillRecord::unparsed();
        placeholder.raw_text =
            Some("Model said:\n```json\n{\"bill_no\": \"R9\", \"total\": \"10\"}\n```".into());
        let DisplayModel::Bill(bill) = render(&placeholder) else {
            panic!("expected recovered bill view");
        };
        assert_eq!(bill.header.bill_no.as_deref(), Some("R9"));
        assert_eq!(bill.totals.sub_total, 10.0);
    }

    #[test]
    fn unrecoverable_placeholder_renders_opaque_dump() {
        let mut placeholder = BillRecord::unparsed();
        placeholder.raw_text = Some("completely unstructured reply".into());
        placeholder.bill_image = Some("bill.jpg".into());
        let DisplayModel::Opaque { record } = render(&placeholder) else {
            panic!("expected opaque dump");
        };
        assert_eq!(record["item"], "Could not parse");
        assert_eq!(record["bill_image"], "bill.jpg");
    }

    #[test]
    fn bank_block_only_when_populated() {
        let mut record = sample_record();
        record.bank_details = serde_json::from_value(json!({})).ok();
        let DisplayModel::Bill(bill) = render(&record) else {
            panic!("expected bill view");
        };
        assert!(bill.bank.is_none());

        record.bank_details =
            serde_json::from_value(json!({"bank_name": "HDFC", "ifsc": "HDFC0001"})).ok();
        let DisplayModel::Bill(bill) = render(&record) else {
            panic!("expected bill view");
        };
        let bank = bill.bank.expect("bank block");
        assert_eq!(bank.bank_name, "HDFC");
        assert_eq!(bank.branch, "N/A");
    }

    #[test]
    fn amount_formatting() {
        assert_eq!(format_amount(82.3), "\u{20b9}82.30");
        assert_eq!(format_amount(0.0), "\u{20b9}0.00");
    }
}
