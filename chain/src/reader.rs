//! Read-only chain access trait.

use crate::Block;
use roster_types::ChainConfig;
use std::sync::Arc;

/// Read access to a chain.
///
/// Implementations must tolerate any height (below, at or beyond the head)
/// and answer `None` for heights they do not hold.
pub trait ChainReader {
    /// The block at `height`, if present.
    fn block_by_number(&self, height: u64) -> Option<Block>;

    /// The current head block.
    fn current_block(&self) -> Block;

    /// Signer-relevant chain configuration.
    fn config(&self) -> &ChainConfig;

    /// Height of the current head.
    fn current_height(&self) -> u64 {
        self.current_block().header.number
    }
}

impl<T: ChainReader + ?Sized> ChainReader for Arc<T> {
    fn block_by_number(&self, height: u64) -> Option<Block> {
        (**self).block_by_number(height)
    }

    fn current_block(&self) -> Block {
        (**self).current_block()
    }

    fn config(&self) -> &ChainConfig {
        (**self).config()
    }

    fn current_height(&self) -> u64 {
        (**self).current_height()
    }
}

impl<T: ChainReader + ?Sized> ChainReader for &T {
    fn block_by_number(&self, height: u64) -> Option<Block> {
        (**self).block_by_number(height)
    }

    fn current_block(&self) -> Block {
        (**self).current_block()
    }

    fn config(&self) -> &ChainConfig {
        (**self).config()
    }

    fn current_height(&self) -> u64 {
        (**self).current_height()
    }
}
