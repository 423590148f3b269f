//! Baseline roster, merge, and partitioning.

use roster_chain::BlockHeader;
use roster_types::{ElectionAction, ElectionRecord, EpochRoster, NodeId, NodeInfo};
use std::collections::BTreeMap;

/// The roster inherited from the previous epoch.
///
/// Exited nodes are not part of it: a node that left is simply absent from
/// then on, rather than re-listed as offline every epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Baseline {
    pub miners: Vec<NodeInfo>,
    pub committee: Vec<NodeInfo>,
    pub both: Vec<NodeInfo>,
}

impl Baseline {
    /// The baseline recorded in a broadcast block header.
    pub fn from_header(header: &BlockHeader) -> Self {
        Self {
            miners: header.miner_list.clone(),
            committee: header.committee_list.clone(),
            both: header.both.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.miners.len() + self.committee.len() + self.both.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill in every baseline node that has no record of its own in `records`.
    ///
    /// Records already present came from declarations inside the election
    /// window and always win. Among baseline lists, miners are considered
    /// first, then committee, then both. Returns how many entries were added.
    pub fn merge_into(self, records: &mut BTreeMap<NodeId, ElectionRecord>) -> usize {
        let tagged = self
            .miners
            .into_iter()
            .map(|n| (n, ElectionAction::Miner))
            .chain(self.committee.into_iter().map(|n| (n, ElectionAction::Committee)))
            .chain(self.both.into_iter().map(|n| (n, ElectionAction::Both)));

        let mut added = 0;
        for (info, action) in tagged {
            if records.contains_key(&info.id) {
                continue;
            }
            records.insert(info.id.clone(), ElectionRecord::new(info, action));
            added += 1;
        }
        added
    }
}

/// Split merged records into the four roster lists.
///
/// `records` iterates in node id order, so each list comes out sorted by id.
pub fn partition(records: BTreeMap<NodeId, ElectionRecord>) -> EpochRoster {
    let mut roster = EpochRoster::default();
    for (_, record) in records {
        roster.push(record.info, record.action);
    }
    roster
}
