//! Best-effort structure recovery from free-form model output.
//!
//! The inference service is asked for bare JSON but routinely wraps it in
//! prose or a markdown fence. Recovery is a two-stage policy, first success
//! wins: decode the whole text as a JSON object, then decode the contents of
//! a single fenced ```json block. Pure and independent of the network call.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::bill::BillRecord;

/// Matches one non-greedy ```json { ... } ``` fence.
static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").unwrap());

/// Recover a structured record from response text, or `None` when neither
/// the whole text nor a fenced block decodes as a JSON object.
pub fn recover_structured(text: &str) -> Option<BillRecord> {
    if let Ok(record) = serde_json::from_str::<BillRecord>(text) {
        return Some(record);
    }
    let caps = FENCED_JSON.captures(text)?;
    serde_json::from_str::<BillRecord>(&caps[1]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_text_json_decodes() {
        let record = recover_structured(r#"{"bill_no": "INV-7", "total": 120.5}"#).unwrap();
        assert_eq!(record.bill_no.as_deref(), Some("INV-7"));
    }

    #[test]
    fn fenced_block_amid_prose_decodes() {
        let text = "Here is the extracted data:\n```json\n{\"bill_no\": \"INV-7\", \"vendor\": \"VMart\"}\n```\nLet me know if you need more.";
        let record = recover_structured(text).unwrap();
        assert_eq!(record.vendor.as_deref(), Some("VMart"));
    }

    #[test]
    fn plain_prose_yields_none() {
        assert!(recover_structured("This bill appears to be handwritten.").is_none());
    }

    #[test]
    fn invalid_json_inside_fence_yields_none() {
        let text = "```json\n{\"bill_no\": }\n```";
        assert!(recover_structured(text).is_none());
    }

    #[test]
    fn non_object_json_yields_none() {
        assert!(recover_structured("[1, 2, 3]").is_none());
        assert!(recover_structured("42").is_none());
    }

    #[test]
    fn first_fence_wins() {
        let text = "```json\n{\"bill_no\": \"A\"}\n```\n```json\n{\"bill_no\": \"B\"}\n```";
        let record = recover_structured(text).unwrap();
        assert_eq!(record.bill_no.as_deref(), Some("A"));
    }
}
