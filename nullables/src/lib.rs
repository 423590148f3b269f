//! Nullable infrastructure for deterministic testing.
//!
//! Roster derivation only reads the chain, so the one external dependency to
//! null out is chain access. This crate provides:
//! - [`NullChain`]: a thread-safe in-memory chain that can be loaded from a
//!   JSON snapshot, with programmable head and sparse heights
//! - [`ElectionTxFactory`]: deterministic keys and signed election transactions
//!
//! Usage: hand a `NullChain` to anything generic over `ChainReader`.

pub mod chain;
pub mod tx_factory;

pub use chain::{ChainSnapshot, NullChain, SnapshotError};
pub use tx_factory::ElectionTxFactory;
