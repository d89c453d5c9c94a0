//! Bill detail extraction: one outbound vision-model call per uploaded
//! image, followed by best-effort structure recovery.

pub mod extractor;
pub mod vision;

pub use extractor::BillExtractor;
pub use vision::{GeminiVision, VisionModel};
