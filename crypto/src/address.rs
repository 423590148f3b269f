//! Account address derivation from public keys.
//!
//! Address format: `rost_` + base32(public_key, 52 chars) + base32(checksum, 8 chars)
//!
//! Checksum: first 5 bytes of Blake2b-256(public_key).
//! Base32 alphabet: `13456789abcdefghijkmnopqrstuwxyz` (Nano-style, avoids ambiguous chars).
//! Total address length: 5 (prefix) + 52 + 8 = 65 characters.

use roster_types::{AccountAddress, PublicKey};

/// Base32 alphabet (32 chars, avoids visually ambiguous 0/O, 2/Z, l/I, v).
const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Encode a byte slice as base32 using the address alphabet.
fn encode_base32(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    let num_chars = total_bits.div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    // Remaining bits (padded with zeros on the right).
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }

    result
}

/// Derive a `rost_`-prefixed account address from a public key.
///
/// checksum = Blake2b-256(public_key)[0..5]; address = prefix + base32(public_key)
/// + base32(checksum).
pub fn derive_address(public_key: &PublicKey) -> AccountAddress {
    let pubkey_encoded = encode_base32(public_key.as_bytes());
    let hash = crate::blake2b_256(public_key.as_bytes());
    let checksum_encoded = encode_base32(&hash[..5]);
    AccountAddress::from_body(&format!("{}{}", pubkey_encoded, checksum_encoded))
}
