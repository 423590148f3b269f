//! Error type for constructing and parsing the shared types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid node id: {0}")]
    InvalidNodeId(String),

    #[error("unknown election action code {0}")]
    UnknownElectionAction(u32),

    #[error("serialization error: {0}")]
    Serialization(String),
}
