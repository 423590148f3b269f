//! Blocks and block headers.

use crate::ChainError;
use roster_transactions::Transaction;
use roster_types::{BlockHash, EpochRoster, NodeInfo};
use serde::{Deserialize, Serialize};

/// A block header.
///
/// Broadcast blocks record the roster in force for the following epoch; the
/// roster lists are empty on every other block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: u64,
    pub parent_hash: BlockHash,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub miner_list: Vec<NodeInfo>,
    #[serde(default)]
    pub committee_list: Vec<NodeInfo>,
    #[serde(default)]
    pub both: Vec<NodeInfo>,
    #[serde(default)]
    pub offline_list: Vec<NodeInfo>,
}

impl BlockHeader {
    pub fn new(number: u64, parent_hash: BlockHash) -> Self {
        Self {
            number,
            parent_hash,
            ..Self::default()
        }
    }

    /// Record `roster` in this header.
    pub fn with_roster(mut self, roster: EpochRoster) -> Self {
        self.miner_list = roster.miner_list;
        self.committee_list = roster.committee_list;
        self.both = roster.both;
        self.offline_list = roster.offline_list;
        self
    }

    /// The roster recorded in this header.
    pub fn roster(&self) -> EpochRoster {
        EpochRoster {
            miner_list: self.miner_list.clone(),
            committee_list: self.committee_list.clone(),
            both: self.both.clone(),
            offline_list: self.offline_list.clone(),
        }
    }

    /// Blake2b-256 of the bincode-encoded header.
    pub fn hash(&self) -> Result<BlockHash, ChainError> {
        let bytes = bincode::serialize(self).map_err(|e| ChainError::Serialization(e.to_string()))?;
        Ok(roster_crypto::hash_block(&bytes))
    }
}

/// A block: header plus ordered transactions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }

    pub fn hash(&self) -> Result<BlockHash, ChainError> {
        self.header.hash()
    }
}
