//! Core types for the billscan inventory service: the bill data model,
//! the runtime error type, and pure structure recovery from model output.

pub mod bill;
pub mod error;
pub mod recover;

pub use bill::{BankDetails, BillRecord, LineItem, PARSE_FAILURE_MARKER};
pub use error::BillscanError;
pub use recover::recover_structured;
