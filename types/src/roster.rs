//! The four-category roster governing an epoch.

use crate::{ElectionAction, NodeId, NodeInfo, TypesError};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};

/// Miners, committee members, dual-role nodes and exited nodes for one epoch.
///
/// Every list is ordered by node id, so two nodes deriving the roster from
/// the same chain produce byte-identical encodings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochRoster {
    pub miner_list: Vec<NodeInfo>,
    pub committee_list: Vec<NodeInfo>,
    pub both: Vec<NodeInfo>,
    pub offline_list: Vec<NodeInfo>,
}

impl EpochRoster {
    /// Append `info` to the list for `action`.
    ///
    /// Callers are responsible for ordering; the builder feeds entries in id order.
    pub fn push(&mut self, info: NodeInfo, action: ElectionAction) {
        match action {
            ElectionAction::Miner => self.miner_list.push(info),
            ElectionAction::Committee => self.committee_list.push(info),
            ElectionAction::Both => self.both.push(info),
            ElectionAction::Exit => self.offline_list.push(info),
        }
    }

    /// Total entries across all four lists.
    pub fn len(&self) -> usize {
        self.miner_list.len() + self.committee_list.len() + self.both.len() + self.offline_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The list a node was placed in, if any.
    pub fn role_of(&self, id: &NodeId) -> Option<ElectionAction> {
        let lists = [
            (&self.miner_list, ElectionAction::Miner),
            (&self.committee_list, ElectionAction::Committee),
            (&self.both, ElectionAction::Both),
            (&self.offline_list, ElectionAction::Exit),
        ];
        lists
            .into_iter()
            .find(|(list, _)| list.iter().any(|n| &n.id == id))
            .map(|(_, action)| action)
    }

    /// Iterate every entry with the role it was placed under.
    pub fn entries(&self) -> impl Iterator<Item = (&NodeInfo, ElectionAction)> {
        self.miner_list
            .iter()
            .map(|n| (n, ElectionAction::Miner))
            .chain(self.committee_list.iter().map(|n| (n, ElectionAction::Committee)))
            .chain(self.both.iter().map(|n| (n, ElectionAction::Both)))
            .chain(self.offline_list.iter().map(|n| (n, ElectionAction::Exit)))
    }

    /// Canonical bincode encoding.
    pub fn encode(&self) -> Result<Vec<u8>, TypesError> {
        bincode::serialize(self).map_err(|e| TypesError::Serialization(e.to_string()))
    }

    /// Blake2b-256 of the canonical encoding. Equal digests mean equal rosters.
    pub fn digest(&self) -> Result<[u8; 32], TypesError> {
        let bytes = self.encode()?;
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(&bytes);
        let mut output = [0u8; 32];
        output.copy_from_slice(&hasher.finalize());
        Ok(output)
    }
}
