use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("invalid signature on transaction {tx_hash}")]
    InvalidSignature { tx_hash: String },

    #[error("transaction hash {claimed} does not match contents ({computed})")]
    HashMismatch { claimed: String, computed: String },

    #[error("malformed election payload: {0}")]
    MalformedPayload(String),

    #[error("unsupported election payload version {0}")]
    UnsupportedPayloadVersion(u8),

    #[error("serialization error: {0}")]
    Serialization(String),
}
