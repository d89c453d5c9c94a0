use thiserror::Error;

/// Top-level error type for the billscan runtime.
///
/// Note that structure recovery is deliberately not represented here:
/// a response the extractor cannot parse degrades to a placeholder record,
/// it does not produce an error.
#[derive(Debug, Error)]
pub enum BillscanError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("vision provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
