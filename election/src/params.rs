//! Epoch parameters and the height arithmetic built on them.

use crate::{BootstrapNode, RosterError};

/// Wealth assigned to every bootstrap node in the genesis baseline.
pub const DEFAULT_BOOTSTRAP_WEALTH: u64 = 10_000;

/// Parameters fixed for the life of a network.
///
/// Passed explicitly to the builder; nothing here is read from globals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpochParams {
    broadcast_interval: u64,
    bootstrap_nodes: Vec<BootstrapNode>,
    bootstrap_wealth: u64,
}

impl EpochParams {
    /// `broadcast_interval` must be positive.
    pub fn new(
        broadcast_interval: u64,
        bootstrap_nodes: Vec<BootstrapNode>,
    ) -> Result<Self, RosterError> {
        if broadcast_interval == 0 {
            return Err(RosterError::Config(
                "broadcast_interval must be greater than zero".into(),
            ));
        }
        Ok(Self {
            broadcast_interval,
            bootstrap_nodes,
            bootstrap_wealth: DEFAULT_BOOTSTRAP_WEALTH,
        })
    }

    pub fn with_bootstrap_wealth(mut self, wealth: u64) -> Self {
        self.bootstrap_wealth = wealth;
        self
    }

    pub fn broadcast_interval(&self) -> u64 {
        self.broadcast_interval
    }

    pub fn bootstrap_nodes(&self) -> &[BootstrapNode] {
        &self.bootstrap_nodes
    }

    pub fn bootstrap_wealth(&self) -> u64 {
        self.bootstrap_wealth
    }

    /// Whether the roster may be computed at `height`: `(height + 2) % interval == 0`.
    pub fn is_boundary(&self, height: u64) -> bool {
        height
            .checked_add(2)
            .is_some_and(|next| next % self.broadcast_interval == 0)
    }

    /// Height of the previous broadcast block for a roster computed at `height`.
    ///
    /// Zero means the genesis epoch. Fails when `height` is not a boundary.
    pub fn last_broadcast_height(&self, height: u64) -> Result<u64, RosterError> {
        let interval = self.broadcast_interval;
        height
            .checked_add(2)
            .filter(|next| next % interval == 0)
            // A positive multiple of the interval, so this cannot underflow.
            .map(|next| next - interval)
            .ok_or(RosterError::NotEpochBoundary { height, interval })
    }

    /// The highest epoch boundary at or below `height`, if any.
    pub fn boundary_at_or_below(&self, height: u64) -> Option<u64> {
        let next = height.checked_add(2)?;
        (next - next % self.broadcast_interval).checked_sub(2)
    }

    /// Inclusive block range scanned for a roster computed at `height`:
    /// `[max(0, height - interval - 1), height]`.
    pub fn scan_window(&self, height: u64) -> (u64, u64) {
        let start = height.saturating_sub(self.broadcast_interval.saturating_add(1));
        (start, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(interval: u64) -> EpochParams {
        EpochParams::new(interval, Vec::new()).unwrap()
    }

    #[test]
    fn zero_interval_rejected() {
        assert!(matches!(
            EpochParams::new(0, Vec::new()),
            Err(RosterError::Config(_))
        ));
    }

    #[test]
    fn first_epoch_boundary_is_genesis() {
        let p = params(100);
        assert!(p.is_boundary(98));
        assert_eq!(p.last_broadcast_height(98).unwrap(), 0);
        assert_eq!(p.scan_window(98), (0, 98));
    }

    #[test]
    fn later_boundaries_point_at_previous_broadcast_block() {
        let p = params(100);
        assert_eq!(p.last_broadcast_height(198).unwrap(), 100);
        assert_eq!(p.scan_window(198), (97, 198));
        assert_eq!(p.last_broadcast_height(998).unwrap(), 900);
        assert_eq!(p.scan_window(998), (897, 998));
    }

    #[test]
    fn non_boundary_heights_rejected() {
        let p = params(100);
        for height in [0, 1, 97, 99, 100, 197] {
            assert!(!p.is_boundary(height));
            assert!(matches!(
                p.last_broadcast_height(height),
                Err(RosterError::NotEpochBoundary { interval: 100, .. })
            ));
        }
    }

    #[test]
    fn window_start_clamps_at_zero() {
        let p = params(100);
        assert_eq!(p.scan_window(0), (0, 0));
        assert_eq!(p.scan_window(101), (0, 101));
        assert_eq!(p.scan_window(102), (1, 102));
    }

    #[test]
    fn overflowing_height_is_not_a_boundary() {
        let p = params(1);
        assert!(!p.is_boundary(u64::MAX));
        assert!(p.last_broadcast_height(u64::MAX - 1).is_err());
    }

    #[test]
    fn interval_of_two_makes_height_zero_genesis() {
        let p = params(2);
        assert_eq!(p.last_broadcast_height(0).unwrap(), 0);
        assert_eq!(p.last_broadcast_height(2).unwrap(), 2);
        assert_eq!(p.scan_window(2), (0, 2));
    }

    #[test]
    fn boundary_at_or_below_rounds_down() {
        let p = params(100);
        assert_eq!(p.boundary_at_or_below(0), None);
        assert_eq!(p.boundary_at_or_below(97), None);
        assert_eq!(p.boundary_at_or_below(98), Some(98));
        assert_eq!(p.boundary_at_or_below(197), Some(98));
        assert_eq!(p.boundary_at_or_below(250), Some(198));
        assert_eq!(p.boundary_at_or_below(u64::MAX), None);
    }

    #[test]
    fn bootstrap_wealth_defaults_and_overrides() {
        assert_eq!(params(10).bootstrap_wealth(), DEFAULT_BOOTSTRAP_WEALTH);
        assert_eq!(params(10).with_bootstrap_wealth(5).bootstrap_wealth(), 5);
    }
}
