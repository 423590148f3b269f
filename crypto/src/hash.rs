//! Blake2b hashing for blocks and transactions.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use roster_types::{BlockHash, TxHash};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash a serialized block header to produce its `BlockHash`.
pub fn hash_block(header_bytes: &[u8]) -> BlockHash {
    BlockHash::new(blake2b_256(header_bytes))
}

/// Hash a serialized transaction to produce its `TxHash`.
pub fn hash_transaction(tx_bytes: &[u8]) -> TxHash {
    TxHash::new(blake2b_256(tx_bytes))
}
