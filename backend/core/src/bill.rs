use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Sentinel written into a placeholder record when structure recovery fails.
pub const PARSE_FAILURE_MARKER: &str = "Could not parse";

/// One item row within a bill.
///
/// `quantity`/`rate`/`amount` are kept as raw JSON values because the
/// inference service emits them inconsistently (numbers, numeric strings,
/// or garbage); normalization to `f64` happens at render time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub hsn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bank block occasionally present on printed bills.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BankDetails {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub account_no: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub ifsc: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BankDetails {
    /// Whether any bank field carries a value.
    pub fn is_populated(&self) -> bool {
        self.bank_name.is_some()
            || self.branch.is_some()
            || self.account_no.is_some()
            || self.ifsc.is_some()
            || self.extra.values().any(|v| !v.is_null())
    }
}

/// The structured representation of one processed bill.
///
/// Every field is optional: the record is recovered from free-form model
/// output and absence is the expected case, not an error. Keys the model
/// emits beyond the known schema are preserved in `extra` so the stored
/// record equals the decoded object plus the augmentation fields
/// (`bill_image`, `raw_text`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BillRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub bill_no: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub vendor_address: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgst: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sgst: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub igst: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetails>,
    /// Full unparsed response text from the inference service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    /// Name of the uploaded file this record was extracted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BillRecord {
    /// Degraded record produced when structure recovery fails.
    ///
    /// Mirrors the wire shape the dashboard already understands:
    /// a sentinel `item` marker with `quantity` and `price` explicitly null.
    pub fn unparsed() -> Self {
        let mut extra = Map::new();
        extra.insert("item".into(), Value::String(PARSE_FAILURE_MARKER.into()));
        extra.insert("quantity".into(), Value::Null);
        extra.insert("price".into(), Value::Null);
        Self {
            extra,
            ..Self::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.extra.get("item"), Some(Value::String(s)) if s == PARSE_FAILURE_MARKER)
    }

    /// Whether the record carries any directly usable structured fields,
    /// as opposed to only the augmentation fields and a sentinel.
    pub fn has_structured_fields(&self) -> bool {
        self.bill_no.is_some()
            || self.date.is_some()
            || self.customer.is_some()
            || self.customer_phone.is_some()
            || self.vendor.is_some()
            || self.vendor_address.is_some()
            || !self.items.is_empty()
            || self.total.is_some()
            || self.cgst.is_some()
            || self.sgst.is_some()
            || self.igst.is_some()
            || self.grand_total.is_some()
            || self.bank_details.is_some()
    }
}

/// Accept strings, numbers, and booleans where the schema expects a string.
/// The inference service does not reliably quote values like bill numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }))
}
