use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
