//! Network identifier.

use serde::{Deserialize, Serialize};

/// Identifies which network a chain belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Live,
    /// The public test network.
    Test,
    /// Local development network.
    Dev,
}

impl NetworkId {
    /// Chain id bound into replay-protected signatures.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Live => 1,
            Self::Test => 3,
            Self::Dev => 1337,
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }

    /// Parse a network name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "live" => Some(Self::Live),
            "test" => Some(Self::Test),
            "dev" => Some(Self::Dev),
            _ => None,
        }
    }
}
