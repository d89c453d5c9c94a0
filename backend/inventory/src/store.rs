use tokio::sync::Mutex;

use billscan_core::BillRecord;

/// Append-only, process-lifetime inventory of extracted bill records.
///
/// Records are immutable once appended; there is no update, delete, or
/// lookup by bill number, and duplicates are permitted. Volatile by design:
/// the inventory empties on restart. Shared across handlers behind an `Arc`.
#[derive(Default)]
pub struct InventoryStore {
    records: Mutex<Vec<BillRecord>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, record: BillRecord) {
        self.records.lock().await.push(record);
    }

    /// Snapshot of all records in append order.
    pub async fn list(&self) -> Vec<BillRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}
