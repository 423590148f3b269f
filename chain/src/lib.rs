//! Chain access for roster derivation.
//!
//! Block storage lives elsewhere; roster derivation only needs to read blocks
//! by height, see the head, and know the signer configuration. Every storage
//! backend (and the in-memory chain used by tests) implements [`ChainReader`].

pub mod block;
pub mod error;
pub mod reader;

pub use block::{Block, BlockHeader};
pub use error::ChainError;
pub use reader::ChainReader;
