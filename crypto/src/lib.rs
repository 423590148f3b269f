//! Cryptographic primitives for roster derivation.
//!
//! - **Ed25519** for transaction signatures
//! - **Blake2b** for transaction, block and signing hashes
//! - Account address derivation with `rost_` prefix and base32 encoding

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use hash::{blake2b_256, blake2b_256_multi, hash_block, hash_transaction};
pub use keys::keypair_from_seed;
pub use sign::{sign_message, verify_signature};
