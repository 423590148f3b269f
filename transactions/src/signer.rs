//! Signer selection and sender recovery.
//!
//! Which signing scheme a transaction is checked against depends on the chain
//! configuration and a reference height: from the replay-protection height
//! onwards the signing hash commits to the chain id. Callers choose the
//! reference height; the election scanner deliberately uses the current chain
//! head rather than the height of the block that included the transaction.

use crate::{Transaction, TransactionError};
use roster_crypto::{blake2b_256_multi, derive_address, sign_message, verify_signature};
use roster_types::{AccountAddress, ChainConfig, KeyPair};

const LEGACY_DOMAIN: &[u8] = b"roster/tx/legacy";
const REPLAY_PROTECTED_DOMAIN: &[u8] = b"roster/tx/chain";

/// A signing scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signer {
    /// Signatures that do not commit to any chain.
    Legacy,
    /// Signatures bound to one chain id.
    ReplayProtected { chain_id: u64 },
}

/// Pick the signer in force at `height` under `config`.
pub fn make_signer(config: &ChainConfig, height: u64) -> Signer {
    if config.is_replay_protected(height) {
        Signer::ReplayProtected {
            chain_id: config.chain_id,
        }
    } else {
        Signer::Legacy
    }
}

impl Signer {
    /// The 32-byte message a transaction's signature covers under this scheme.
    pub fn signing_hash(&self, tx: &Transaction) -> Result<[u8; 32], TransactionError> {
        let body = tx.body_bytes()?;
        Ok(match self {
            Self::Legacy => blake2b_256_multi(&[LEGACY_DOMAIN, body.as_slice()]),
            Self::ReplayProtected { chain_id } => {
                let chain = chain_id.to_be_bytes();
                blake2b_256_multi(&[REPLAY_PROTECTED_DOMAIN, &chain[..], body.as_slice()])
            }
        })
    }
}

/// Recover the sender of `tx` under `signer`.
///
/// The signature must verify against the embedded public key; the sender is
/// the account address derived from that key.
pub fn sender(signer: &Signer, tx: &Transaction) -> Result<AccountAddress, TransactionError> {
    let message = signer.signing_hash(tx)?;
    if !verify_signature(&message, &tx.signature, &tx.public_key) {
        return Err(TransactionError::InvalidSignature {
            tx_hash: tx.hash.to_string(),
        });
    }
    Ok(derive_address(&tx.public_key))
}

/// Sign `tx` with `keys` under `signer`, setting its public key, signature and hash.
pub fn sign_transaction(
    signer: &Signer,
    mut tx: Transaction,
    keys: &KeyPair,
) -> Result<Transaction, TransactionError> {
    tx.public_key = keys.public.clone();
    let message = signer.signing_hash(&tx)?;
    tx.signature = sign_message(&message, &keys.private);
    tx.hash = tx.compute_hash()?;
    Ok(tx)
}
