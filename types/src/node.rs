//! Node identity, node records, and election actions.

use crate::{AccountAddress, TxHash, TypesError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable node identity: the string-encoded public key of the node.
///
/// Ordered lexicographically; roster lists are emitted in this order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(TypesError::InvalidNodeId(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate or active roster participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: NodeId,
    pub ip: String,
    /// Declared stake/deposit.
    pub wealth: u64,
    pub online_time: u64,
    /// Hash of the transaction that declared this entry.
    pub tx_hash: TxHash,
    pub value: u64,
    /// Declared throughput. Carried through the merge untouched.
    #[serde(default)]
    pub tps: u64,
    /// Signer of the declaring transaction. Only the scanner fills this in;
    /// entries synthesized from bootstrap nodes never have one.
    #[serde(default)]
    pub account: Option<AccountAddress>,
}

impl NodeInfo {
    /// A bare entry with only identity, address and wealth set.
    pub fn new(id: NodeId, ip: impl Into<String>, wealth: u64) -> Self {
        Self {
            id,
            ip: ip.into(),
            wealth,
            online_time: 0,
            tx_hash: TxHash::ZERO,
            value: 0,
            tps: 0,
            account: None,
        }
    }
}

/// The role a node declares for the next epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectionAction {
    Miner,
    Committee,
    /// Both miner and committee member.
    Both,
    /// Leave the roster.
    Exit,
}

impl ElectionAction {
    /// Wire code carried in election payloads.
    pub fn code(&self) -> u32 {
        match self {
            Self::Miner => 1,
            Self::Committee => 2,
            Self::Both => 3,
            Self::Exit => 4,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, TypesError> {
        match code {
            1 => Ok(Self::Miner),
            2 => Ok(Self::Committee),
            3 => Ok(Self::Both),
            4 => Ok(Self::Exit),
            other => Err(TypesError::UnknownElectionAction(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Miner => "miner",
            Self::Committee => "committee",
            Self::Both => "both",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for ElectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node record tagged with its declared action.
///
/// Produced by decoding an election transaction (and by lifting baseline
/// roster entries during the merge); consumed when the roster is partitioned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRecord {
    pub info: NodeInfo,
    pub action: ElectionAction,
}

impl ElectionRecord {
    pub fn new(info: NodeInfo, action: ElectionAction) -> Self {
        Self { info, action }
    }
}
