//! Epoch roster derivation.
//!
//! At every epoch boundary the network recomputes who mines, who sits on the
//! committee, who does both, and who has left. Two cooperating pieces do it:
//!
//! 1. **Scanning**: walk the election window, decode election transactions,
//!    recover their signers, and keep each node's latest declaration.
//! 2. **Building**: pick the baseline (genesis bootstrap nodes, or the roster
//!    recorded in the previous broadcast block), let scanned declarations
//!    override it, and partition the result into the four roster lists.
//!
//! Every node must derive the same roster from the same chain, so all
//! intermediate maps are ordered by node id and output lists are canonical.
//!
//! ## Module overview
//!
//! - [`scanner`]: election-window scan with last-write-wins per node.
//! - [`baseline`]: baseline roster, merge, and partitioning.
//! - [`bootstrap`]: bootstrap nodes and the genesis baseline.
//! - [`builder`]: roster building and verification at epoch boundaries.
//! - [`params`]: epoch parameters and window arithmetic.
//! - [`config`]: TOML configuration.
//! - [`error`]: roster error types.

pub mod baseline;
pub mod bootstrap;
pub mod builder;
pub mod config;
pub mod error;
pub mod params;
pub mod scanner;

pub use baseline::{partition, Baseline};
pub use bootstrap::{genesis_baseline, BootstrapNode};
pub use builder::RosterBuilder;
pub use config::RosterConfig;
pub use error::RosterError;
pub use params::{EpochParams, DEFAULT_BOOTSTRAP_WEALTH};
pub use scanner::{ElectionScanner, ScanRecords};
