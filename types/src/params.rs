//! Chain configuration consumed by signer selection.

use crate::network::NetworkId;
use serde::{Deserialize, Serialize};

/// The signer-relevant slice of a chain's configuration.
///
/// Signer selection depends on the height a transaction is checked at: from
/// `replay_protection_height` onwards signatures must commit to `chain_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub network: NetworkId,
    pub chain_id: u64,
    /// First height at which replay-protected signatures are required.
    /// `None` means the chain never switched and legacy signatures remain valid.
    #[serde(default)]
    pub replay_protection_height: Option<u64>,
}

impl ChainConfig {
    /// Default configuration for a network: replay protection from genesis.
    pub fn for_network(network: NetworkId) -> Self {
        Self {
            network,
            chain_id: network.chain_id(),
            replay_protection_height: Some(0),
        }
    }

    /// Whether replay-protected signing applies at `height`.
    pub fn is_replay_protected(&self, height: u64) -> bool {
        self.replay_protection_height
            .is_some_and(|activation| height >= activation)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::for_network(NetworkId::Dev)
    }
}
