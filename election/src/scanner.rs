//! Election-window scanner.
//!
//! Walks a block range in height order, then in-block order, and keeps the
//! most recent election declaration per node. Repeated declarations replace
//! each other outright; nothing (wealth included) is accumulated across them.

use crate::RosterError;
use roster_chain::ChainReader;
use roster_transactions::{make_signer, sender, Transaction, TransactionError};
use roster_types::{ElectionRecord, NodeId};
use roster_utils::StatsCounter;
use std::collections::BTreeMap;

/// Latest election record per node, ordered by node id.
pub type ScanRecords = BTreeMap<NodeId, ElectionRecord>;

pub const BLOCKS_SCANNED: &str = "blocks_scanned";
pub const BLOCKS_MISSING: &str = "blocks_missing";
pub const RECORDS_ACCEPTED: &str = "records_accepted";
pub const RECORDS_SUPERSEDED: &str = "records_superseded";
pub const DECODE_FAILURES: &str = "decode_failures";
pub const HASH_MISMATCHES: &str = "hash_mismatches";
pub const SIGNER_FAILURES: &str = "signer_failures";

const COUNTERS: &[&str] = &[
    BLOCKS_SCANNED,
    BLOCKS_MISSING,
    RECORDS_ACCEPTED,
    RECORDS_SUPERSEDED,
    DECODE_FAILURES,
    HASH_MISMATCHES,
    SIGNER_FAILURES,
];

/// Scans block ranges for election declarations.
///
/// Holds no per-scan state: each [`scan`](Self::scan) builds its own map, so
/// one scanner can serve concurrent callers. Only the counters are shared.
pub struct ElectionScanner<C> {
    chain: C,
    stats: StatsCounter,
}

impl<C: ChainReader> ElectionScanner<C> {
    pub fn new(chain: C) -> Self {
        Self {
            chain,
            stats: StatsCounter::new(COUNTERS),
        }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Cumulative counters across every scan made by this scanner.
    pub fn stats(&self) -> &StatsCounter {
        &self.stats
    }

    /// Collect the latest declaration per node over `start..=end`.
    ///
    /// Missing heights are skipped. Transactions whose payload cannot be
    /// decoded or whose signer cannot be recovered are logged and dropped.
    pub fn scan(&self, start: u64, end: u64) -> Result<ScanRecords, RosterError> {
        if start > end {
            return Err(RosterError::InvalidRange { start, end });
        }

        let mut records = ScanRecords::new();
        for height in start..=end {
            let Some(block) = self.chain.block_by_number(height) else {
                tracing::debug!(height, "no block at height, skipping");
                self.stats.increment(BLOCKS_MISSING);
                continue;
            };
            self.stats.increment(BLOCKS_SCANNED);

            for tx in &block.transactions {
                let Some(record) = self.resolve(height, tx) else {
                    continue;
                };
                self.stats.increment(RECORDS_ACCEPTED);
                if let Some(previous) = records.insert(record.info.id.clone(), record) {
                    self.stats.increment(RECORDS_SUPERSEDED);
                    tracing::trace!(
                        node = %previous.info.id,
                        superseded = %previous.info.tx_hash,
                        "later declaration replaces earlier one"
                    );
                }
            }
        }

        tracing::debug!(start, end, records = records.len(), "election window scanned");
        Ok(records)
    }

    /// Decode `tx` and attach its recovered signer.
    ///
    /// The signer is chosen for the current head height, not for `height`:
    /// a declaration is judged by the signing rules in force now.
    fn resolve(&self, height: u64, tx: &Transaction) -> Option<ElectionRecord> {
        let mut record = match tx.parse_election_payload() {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e @ TransactionError::HashMismatch { .. }) => {
                self.stats.increment(HASH_MISMATCHES);
                tracing::warn!(height, error = %e, "dropping election transaction with rewritten hash");
                return None;
            }
            Err(e) => {
                self.stats.increment(DECODE_FAILURES);
                tracing::warn!(height, tx = %tx.hash, error = %e, "dropping undecodable election transaction");
                return None;
            }
        };

        let signer = make_signer(self.chain.config(), self.chain.current_height());
        match sender(&signer, tx) {
            Ok(account) => {
                record.info.account = Some(account);
                Some(record)
            }
            Err(e) => {
                self.stats.increment(SIGNER_FAILURES);
                tracing::warn!(height, tx = %tx.hash, error = %e, "dropping election transaction with unrecoverable signer");
                None
            }
        }
    }
}
