use std::sync::Arc;

use tracing::info;

use billscan_core::BillRecord;
use billscan_extract::BillExtractor;

use crate::store::InventoryStore;

/// Composes the extractor and the store behind the two inventory
/// operations the HTTP surface exposes.
///
/// `upload` never fails: extraction problems surface as placeholder records,
/// so the caller always gets a record back and the store always grows by
/// exactly one entry per upload. The uploaded bytes are handed to the
/// extractor in memory; nothing touches the filesystem.
pub struct InventoryService {
    extractor: BillExtractor,
    store: Arc<InventoryStore>,
}

impl InventoryService {
    pub fn new(extractor: BillExtractor, store: Arc<InventoryStore>) -> Self {
        Self { extractor, store }
    }

    /// Extract a record from the uploaded file and append it to the inventory.
    pub async fn upload(&self, filename: &str, bytes: &[u8]) -> BillRecord {
        let record = self.extractor.extract(bytes, filename).await;
        info!(
            filename,
            bill_no = record.bill_no.as_deref().unwrap_or(""),
            placeholder = record.is_placeholder(),
            "bill processed"
        );
        self.store.append(record.clone()).await;
        record
    }

    /// All records in append order.
    pub async fn view(&self) -> Vec<BillRecord> {
        self.store.list().await
    }
}
