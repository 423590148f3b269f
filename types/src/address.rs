//! Account address type with `rost_` prefix.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The address of the account that signed an election transaction.
///
/// Derived from the signer's public key via Blake2b hashing + base32 encoding
/// (see `roster_crypto::derive_address`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all account addresses.
    pub const PREFIX: &'static str = "rost_";

    /// Create an account address from a raw string.
    ///
    /// Only the prefix is checked here; checksum validation lives in the
    /// crypto crate, which knows how addresses are derived.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if !s.starts_with(Self::PREFIX) || s.len() == Self::PREFIX.len() {
            return Err(TypesError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Build an address from its encoded body, adding the prefix.
    ///
    /// Used by address derivation, which always produces a non-empty body.
    pub fn from_body(body: &str) -> Self {
        Self(format!("{}{}", Self::PREFIX, body))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AccountAddress> for String {
    fn from(addr: AccountAddress) -> Self {
        addr.0
    }
}
