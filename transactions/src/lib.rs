//! Transactions as they appear in blocks, plus the two pieces of them the
//! roster cares about:
//!
//! - [`election`]: the election payload carried in a transaction's data field
//! - [`signer`]: height-dependent signer selection and sender recovery

pub mod election;
pub mod error;
pub mod signer;

pub use election::{decode_election_payload, encode_election_payload, ElectionPayload};
pub use error::TransactionError;
pub use signer::{make_signer, sender, sign_transaction, Signer};

use roster_types::{AccountAddress, ElectionRecord, PublicKey, Signature, TxHash};
use serde::{Deserialize, Serialize};

/// A signed transaction.
///
/// Most transactions are plain transfers or calls; election transactions are
/// ordinary transactions whose `data` starts with the election payload magic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: TxHash,
    pub nonce: u64,
    pub recipient: Option<AccountAddress>,
    pub value: u64,
    #[serde(default)]
    pub data: Vec<u8>,
    /// Key the sender claims to have signed with.
    pub public_key: PublicKey,
    pub signature: Signature,
}

/// The signed portion of a transaction.
#[derive(Serialize)]
pub(crate) struct TxBody<'a> {
    nonce: u64,
    recipient: &'a Option<AccountAddress>,
    value: u64,
    data: &'a [u8],
    public_key: &'a PublicKey,
}

impl Transaction {
    /// An unsigned transaction; see [`sign_transaction`].
    pub fn unsigned(
        nonce: u64,
        recipient: Option<AccountAddress>,
        value: u64,
        data: Vec<u8>,
        public_key: PublicKey,
    ) -> Self {
        Self {
            hash: TxHash::ZERO,
            nonce,
            recipient,
            value,
            data,
            public_key,
            signature: Signature::EMPTY,
        }
    }

    pub(crate) fn body(&self) -> TxBody<'_> {
        TxBody {
            nonce: self.nonce,
            recipient: &self.recipient,
            value: self.value,
            data: &self.data,
            public_key: &self.public_key,
        }
    }

    pub(crate) fn body_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::serialize(&self.body()).map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    /// Hash over the signed body and the signature.
    pub fn compute_hash(&self) -> Result<TxHash, TransactionError> {
        let mut bytes = self.body_bytes()?;
        bytes.extend_from_slice(self.signature.as_bytes());
        Ok(roster_crypto::hash_transaction(&bytes))
    }

    /// Decode the election payload carried in `data`, if there is one.
    ///
    /// `Ok(None)` means this is not an election transaction. The returned
    /// record has `tx_hash` set to this transaction's hash and no account;
    /// the account is only known after sender recovery. The stored `hash`
    /// is outside the signed body, so it must match the recomputed one.
    pub fn parse_election_payload(&self) -> Result<Option<ElectionRecord>, TransactionError> {
        let Some(mut record) = decode_election_payload(&self.data)? else {
            return Ok(None);
        };
        let computed = self.compute_hash()?;
        if computed != self.hash {
            return Err(TransactionError::HashMismatch {
                claimed: self.hash.to_string(),
                computed: computed.to_string(),
            });
        }
        record.info.tx_hash = computed;
        Ok(Some(record))
    }
}
