//! Fundamental types for epoch roster derivation.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! node identities, account addresses, hashes, keys, election records, the
//! epoch roster itself, and the chain configuration consumed by signer recovery.

pub mod address;
pub mod block;
pub mod error;
pub mod hash;
pub mod keys;
pub mod network;
pub mod node;
pub mod params;
pub mod roster;

pub use address::AccountAddress;
pub use block::BlockHash;
pub use error::TypesError;
pub use hash::TxHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use node::{ElectionAction, ElectionRecord, NodeId, NodeInfo};
pub use params::ChainConfig;
pub use roster::EpochRoster;
