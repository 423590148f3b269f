//! Roster configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use roster_types::{ChainConfig, NetworkId};

use crate::{BootstrapNode, EpochParams, RosterError, DEFAULT_BOOTSTRAP_WEALTH};

/// Configuration for roster derivation.
///
/// Can be loaded from a TOML file via [`RosterConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty file is a valid dev configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Network whose chain id signatures are checked against. Unset means
    /// whatever the chain itself declares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkId>,

    /// Blocks between broadcast blocks.
    #[serde(default = "default_broadcast_interval")]
    pub broadcast_interval: u64,

    /// Wealth given to each bootstrap node in the genesis epoch.
    #[serde(default = "default_bootstrap_wealth")]
    pub bootstrap_wealth: u64,

    /// Bootstrap nodes as `enode://<id>@<ip>:<port>` URLs. Order matters:
    /// the first one seeds the genesis committee.
    #[serde(default)]
    pub bootnodes: Vec<String>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_broadcast_interval() -> u64 {
    100
}

fn default_bootstrap_wealth() -> u64 {
    DEFAULT_BOOTSTRAP_WEALTH
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RosterConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RosterError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RosterError> {
        toml::from_str(s).map_err(|e| RosterError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, RosterError> {
        toml::to_string_pretty(self).map_err(|e| RosterError::Config(e.to_string()))
    }

    /// The signer configuration to read a chain under.
    ///
    /// A configured network replaces the chain's network and chain id; the
    /// replay-protection height always comes from the chain.
    pub fn chain_config(&self, chain: &ChainConfig) -> ChainConfig {
        match self.network {
            Some(network) => ChainConfig {
                network,
                chain_id: network.chain_id(),
                replay_protection_height: chain.replay_protection_height,
            },
            None => chain.clone(),
        }
    }

    /// Parse the bootnode list, in order.
    pub fn bootstrap_nodes(&self) -> Result<Vec<BootstrapNode>, RosterError> {
        self.bootnodes
            .iter()
            .map(|url| BootstrapNode::parse_enode(url))
            .collect()
    }

    /// Validate and convert into the parameters the builder runs on.
    pub fn epoch_params(&self) -> Result<EpochParams, RosterError> {
        Ok(EpochParams::new(self.broadcast_interval, self.bootstrap_nodes()?)?
            .with_bootstrap_wealth(self.bootstrap_wealth))
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            network: None,
            broadcast_interval: default_broadcast_interval(),
            bootstrap_wealth: default_bootstrap_wealth(),
            bootnodes: Vec::new(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
