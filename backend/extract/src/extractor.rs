use std::sync::Arc;

use tracing::warn;

use billscan_core::{recover_structured, BillRecord};

use crate::vision::VisionModel;

/// Fixed instruction sent alongside every bill image.
const EXTRACTION_PROMPT: &str = "Extract all relevant bill details (items, quantity, price, \
     date, vendor, total, etc) from this purchase bill image. Return as JSON.";

/// Declared content type for uploads. The actual bytes are not validated
/// against it; the vision model copes with mislabeled formats.
const IMAGE_MIME: &str = "image/jpeg";

/// Turns uploaded image bytes into a `BillRecord` via the vision model.
///
/// Infallible at its boundary: provider failures and unparseable responses
/// both degrade to the placeholder record rather than an error. Exactly one
/// outbound call per invocation, no retry.
pub struct BillExtractor {
    vision: Arc<dyn VisionModel>,
}

impl BillExtractor {
    pub fn new(vision: Arc<dyn VisionModel>) -> Self {
        Self { vision }
    }

    /// Extract structured bill details from raw image bytes.
    ///
    /// The returned record is always annotated with the source file name and,
    /// when the call succeeded, the full response text so the renderer can
    /// re-attempt recovery later if the structured fields are incomplete.
    pub async fn extract(&self, image: &[u8], source_name: &str) -> BillRecord {
        let text = match self
            .vision
            .describe(image, IMAGE_MIME, EXTRACTION_PROMPT)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, source = source_name, "vision call failed; storing placeholder");
                let mut record = BillRecord::unparsed();
                record.bill_image = Some(source_name.to_string());
                return record;
            }
        };

        let mut record = recover_structured(&text).unwrap_or_else(|| {
            warn!(source = source_name, "no structured bill data in response");
            BillRecord::unparsed()
        });
        record.bill_image = Some(source_name.to_string());
        record.raw_text = Some(text);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    /// Canned provider: replays a fixed response (or failure).
    struct StubVision(Result<String, String>);

    #[async_trait]
    impl VisionModel for StubVision {
        async fn describe(&self, _image: &[u8], _mime: &str, _prompt: &str) -> Result<String> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(anyhow!(msg.clone())),
            }
        }
    }

    fn extractor_replying(text: &str) -> BillExtractor {
        BillExtractor::new(Arc::new(StubVision(Ok(text.to_string()))))
    }

    #[tokio::test]
    async fn direct_json_response_becomes_record() {
        let reply = r#"{"bill_no":"A1","items":[{"description":"pen","quantity":"2","rate":"10"}],"total":"20"}"#;
        let record = extractor_replying(reply).extract(b"jpegbytes", "bill.jpg").await;
        assert_eq!(record.bill_no.as_deref(), Some("A1"));
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.bill_image.as_deref(), Some("bill.jpg"));
        assert_eq!(record.raw_text.as_deref(), Some(reply));
        assert!(!record.is_placeholder());
    }

    #[tokio::test]
    async fn fenced_json_response_becomes_record() {
        let reply = "Sure! Here are the bill details:\n```json\n{\"bill_no\": \"B2\", \"vendor\": \"VMart\"}\n```";
        let record = extractor_replying(reply).extract(b"jpegbytes", "bill.jpg").await;
        assert_eq!(record.bill_no.as_deref(), Some("B2"));
        assert_eq!(record.raw_text.as_deref(), Some(reply));
    }

    #[tokio::test]
    async fn prose_response_degrades_to_placeholder() {
        let reply = "I am unable to read this image clearly.";
        let record = extractor_replying(reply).extract(b"jpegbytes", "bill.jpg").await;
        assert!(record.is_placeholder());
        assert_eq!(record.bill_image.as_deref(), Some("bill.jpg"));
        assert_eq!(record.raw_text.as_deref(), Some(reply));
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_placeholder() {
        let extractor =
            BillExtractor::new(Arc::new(StubVision(Err("connection refused".to_string()))));
        let record = extractor.extract(b"jpegbytes", "bill.jpg").await;
        assert!(record.is_placeholder());
        assert_eq!(record.bill_image.as_deref(), Some("bill.jpg"));
        assert!(record.raw_text.is_none());
    }
}
