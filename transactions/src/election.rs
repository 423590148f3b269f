//! Election payload codec.
//!
//! An election transaction's data field is `ELEC` ‖ version ‖ body, where the
//! body is the bincode encoding of [`ElectionPayload`] (varint integers,
//! bounded length, no trailing bytes).

use crate::TransactionError;
use bincode::Options;
use roster_types::{ElectionAction, ElectionRecord, NodeId, NodeInfo};
use serde::{Deserialize, Serialize};

/// Marks a transaction's data field as an election payload.
pub const ELECTION_MAGIC: &[u8; 4] = b"ELEC";

/// Current payload layout version.
pub const ELECTION_PAYLOAD_VERSION: u8 = 1;

/// Upper bound on the encoded body; anything larger is rejected before allocation.
pub const MAX_PAYLOAD_BODY_LEN: u64 = 4096;

/// The declaration a node makes in an election transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionPayload {
    pub id: String,
    pub ip: String,
    pub wealth: u64,
    pub online_time: u64,
    pub value: u64,
    pub tps: u64,
    /// [`ElectionAction`] wire code.
    pub action: u32,
}

impl ElectionPayload {
    fn into_record(self) -> Result<ElectionRecord, TransactionError> {
        let id = NodeId::new(self.id).map_err(|e| TransactionError::MalformedPayload(e.to_string()))?;
        let action = ElectionAction::from_code(self.action)
            .map_err(|e| TransactionError::MalformedPayload(e.to_string()))?;
        let info = NodeInfo {
            ip: self.ip,
            online_time: self.online_time,
            value: self.value,
            tps: self.tps,
            ..NodeInfo::new(id, String::new(), self.wealth)
        };
        Ok(ElectionRecord::new(info, action))
    }
}

impl From<&ElectionRecord> for ElectionPayload {
    fn from(record: &ElectionRecord) -> Self {
        Self {
            id: record.info.id.as_str().to_string(),
            ip: record.info.ip.clone(),
            wealth: record.info.wealth,
            online_time: record.info.online_time,
            value: record.info.value,
            tps: record.info.tps,
            action: record.action.code(),
        }
    }
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_PAYLOAD_BODY_LEN)
        .reject_trailing_bytes()
}

/// Encode a declaration into a transaction data field.
///
/// The record's `tx_hash` and `account` are not encoded: both are properties
/// of the carrying transaction, filled in when it is scanned.
pub fn encode_election_payload(record: &ElectionRecord) -> Result<Vec<u8>, TransactionError> {
    let body = codec()
        .serialize(&ElectionPayload::from(record))
        .map_err(|e| TransactionError::Serialization(e.to_string()))?;
    let mut data = Vec::with_capacity(ELECTION_MAGIC.len() + 1 + body.len());
    data.extend_from_slice(ELECTION_MAGIC);
    data.push(ELECTION_PAYLOAD_VERSION);
    data.extend_from_slice(&body);
    Ok(data)
}

/// Decode a transaction data field.
///
/// Returns `Ok(None)` when the data does not carry an election payload at
/// all, and an error when it claims to but cannot be decoded.
pub fn decode_election_payload(data: &[u8]) -> Result<Option<ElectionRecord>, TransactionError> {
    let Some(rest) = data.strip_prefix(ELECTION_MAGIC.as_slice()) else {
        return Ok(None);
    };
    let Some((&version, body)) = rest.split_first() else {
        return Err(TransactionError::MalformedPayload("missing version byte".into()));
    };
    if version != ELECTION_PAYLOAD_VERSION {
        return Err(TransactionError::UnsupportedPayloadVersion(version));
    }
    let payload: ElectionPayload = codec()
        .deserialize(body)
        .map_err(|e| TransactionError::MalformedPayload(e.to_string()))?;
    payload.into_record().map(Some)
}
