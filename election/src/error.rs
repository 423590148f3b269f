use roster_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("block {height} is not an epoch boundary (broadcast interval {interval})")]
    NotEpochBoundary { height: u64, interval: u64 },

    #[error("broadcast block {0} is missing; cannot derive baseline roster")]
    MissingBaselineBlock(u64),

    #[error("invalid scan range: start {start} > end {end}")]
    InvalidRange { start: u64, end: u64 },

    #[error("roster mismatch at height {height}: expected {expected}, got {actual}")]
    Mismatch {
        height: u64,
        expected: String,
        actual: String,
    },

    #[error("invalid bootnode {url}: {reason}")]
    InvalidBootnode { url: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Types(#[from] TypesError),
}
