//! In-memory inventory: the append-only record store and the upload/view
//! service that ties it to the extractor.

pub mod service;
pub mod store;

pub use service::InventoryService;
pub use store::InventoryStore;
