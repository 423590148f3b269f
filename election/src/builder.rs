//! Roster building and verification at epoch boundaries.

use crate::{genesis_baseline, partition, Baseline, ElectionScanner, EpochParams, RosterError};
use roster_chain::{Block, ChainReader};
use roster_types::EpochRoster;

/// Derives the roster for the next epoch from chain history.
///
/// Stateless between calls apart from scan counters, so a single builder can
/// be shared across threads whenever its chain reader can.
pub struct RosterBuilder<C> {
    scanner: ElectionScanner<C>,
    params: EpochParams,
}

impl<C: ChainReader> RosterBuilder<C> {
    pub fn new(chain: C, params: EpochParams) -> Self {
        Self {
            scanner: ElectionScanner::new(chain),
            params,
        }
    }

    pub fn params(&self) -> &EpochParams {
        &self.params
    }

    pub fn scanner(&self) -> &ElectionScanner<C> {
        &self.scanner
    }

    /// Compute the roster at `height`, which must be an epoch boundary.
    ///
    /// Declarations in the election window override the baseline; baseline
    /// nodes with no declaration keep their previous role.
    pub fn build_roster(&self, height: u64) -> Result<EpochRoster, RosterError> {
        let last_broadcast = self.params.last_broadcast_height(height)?;
        let baseline = self.baseline(last_broadcast)?;

        let (start, end) = self.params.scan_window(height);
        let mut records = self.scanner.scan(start, end)?;
        let scanned = records.len();
        let inherited = baseline.merge_into(&mut records);

        let roster = partition(records);
        tracing::info!(
            height,
            last_broadcast,
            start,
            end,
            scanned,
            inherited,
            miners = roster.miner_list.len(),
            committee = roster.committee_list.len(),
            both = roster.both.len(),
            offline = roster.offline_list.len(),
            "epoch roster built"
        );
        Ok(roster)
    }

    /// Recompute the roster at `height` and compare it with `proposed`.
    pub fn verify_roster(&self, height: u64, proposed: &EpochRoster) -> Result<(), RosterError> {
        let expected = hex::encode(self.build_roster(height)?.digest()?);
        let actual = hex::encode(proposed.digest()?);
        if expected != actual {
            tracing::warn!(height, %expected, %actual, "proposed roster does not match chain history");
            return Err(RosterError::Mismatch {
                height,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Check the roster recorded in a broadcast block.
    ///
    /// A broadcast block at `n` carries the roster computed at `n - 2`.
    pub fn verify_broadcast_block(&self, block: &Block) -> Result<(), RosterError> {
        let number = block.number();
        let height = number.checked_sub(2).ok_or(RosterError::NotEpochBoundary {
            height: number,
            interval: self.params.broadcast_interval(),
        })?;
        self.verify_roster(height, &block.header.roster())
    }

    fn baseline(&self, last_broadcast: u64) -> Result<Baseline, RosterError> {
        if last_broadcast == 0 {
            return Ok(genesis_baseline(
                self.params.bootstrap_nodes(),
                self.params.bootstrap_wealth(),
            ));
        }
        let block = self
            .scanner
            .chain()
            .block_by_number(last_broadcast)
            .ok_or(RosterError::MissingBaselineBlock(last_broadcast))?;
        Ok(Baseline::from_header(&block.header))
    }
}
