//! Deterministic signed transactions for tests.

use roster_crypto::{derive_address, keypair_from_seed};
use roster_transactions::{
    encode_election_payload, make_signer, sign_transaction, Signer, Transaction,
    TransactionError,
};
use roster_types::{AccountAddress, ChainConfig, ElectionAction, ElectionRecord, KeyPair, NodeId, NodeInfo};
use std::sync::atomic::{AtomicU64, Ordering};

/// Builds signed transactions from seeded keys.
///
/// Account `n` signs with the key derived from `[n; 32]`, so the same seed
/// always recovers to the same [`AccountAddress`].
pub struct ElectionTxFactory {
    signer: Signer,
    nonce: AtomicU64,
}

impl ElectionTxFactory {
    pub fn new(signer: Signer) -> Self {
        Self {
            signer,
            nonce: AtomicU64::new(0),
        }
    }

    /// Sign with whatever scheme `config` requires at `height`.
    pub fn for_chain(config: &ChainConfig, height: u64) -> Self {
        Self::new(make_signer(config, height))
    }

    pub fn keys(seed: u8) -> KeyPair {
        keypair_from_seed(&[seed; 32])
    }

    /// The address a transaction signed by account `seed` recovers to.
    pub fn account(seed: u8) -> AccountAddress {
        derive_address(&Self::keys(seed).public)
    }

    /// An election transaction signed by account `seed`.
    pub fn declare(
        &self,
        seed: u8,
        id: &NodeId,
        action: ElectionAction,
        wealth: u64,
    ) -> Result<Transaction, TransactionError> {
        let info = NodeInfo::new(id.clone(), format!("10.0.0.{seed}"), wealth);
        self.declare_record(seed, &ElectionRecord::new(info, action))
    }

    /// An election transaction carrying `record`, signed by account `seed`.
    pub fn declare_record(
        &self,
        seed: u8,
        record: &ElectionRecord,
    ) -> Result<Transaction, TransactionError> {
        self.sign(seed, 0, encode_election_payload(record)?)
    }

    /// A plain value transfer with no election payload.
    pub fn transfer(&self, seed: u8, value: u64) -> Result<Transaction, TransactionError> {
        self.sign(seed, value, Vec::new())
    }

    fn sign(&self, seed: u8, value: u64, data: Vec<u8>) -> Result<Transaction, TransactionError> {
        let keys = Self::keys(seed);
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let tx = Transaction::unsigned(nonce, None, value, data, keys.public.clone());
        sign_transaction(&self.signer, tx, &keys)
    }
}
