//! Nullable chain: in-memory block storage keyed by height.

use roster_chain::{Block, BlockHeader, ChainError, ChainReader};
use roster_types::{BlockHash, ChainConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A serialisable copy of a chain: configuration plus every stored block.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChainSnapshot {
    #[serde(default)]
    pub config: ChainConfig,
    /// Head height; defaults to the highest stored block.
    #[serde(default)]
    pub head: Option<u64>,
    pub blocks: Vec<Block>,
}

impl ChainSnapshot {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// An in-memory chain.
///
/// Heights may be sparse. The head is the highest stored block unless it has
/// been set explicitly with [`NullChain::set_head`].
pub struct NullChain {
    config: ChainConfig,
    blocks: Mutex<BTreeMap<u64, Block>>,
    head: Mutex<Option<u64>>,
}

impl NullChain {
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            blocks: Mutex::new(BTreeMap::new()),
            head: Mutex::new(None),
        }
    }

    /// Build a chain from a snapshot. Later blocks replace earlier ones at the same height.
    pub fn from_snapshot(snapshot: ChainSnapshot) -> Self {
        let chain = Self::new(snapshot.config);
        for block in snapshot.blocks {
            chain.insert_block(block);
        }
        *lock(&chain.head) = snapshot.head;
        chain
    }

    /// Load a JSON snapshot file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Ok(Self::from_snapshot(ChainSnapshot::from_json_file(path)?))
    }

    pub fn from_json_str(s: &str) -> Result<Self, SnapshotError> {
        Ok(Self::from_snapshot(ChainSnapshot::from_json_str(s)?))
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            config: self.config.clone(),
            head: *lock(&self.head),
            blocks: lock(&self.blocks).values().cloned().collect(),
        }
    }

    /// Store `block` at its own height, replacing any block already there.
    pub fn insert_block(&self, block: Block) {
        lock(&self.blocks).insert(block.number(), block);
    }

    /// Remove the block at `height`, leaving a gap.
    pub fn remove_block(&self, height: u64) -> Option<Block> {
        lock(&self.blocks).remove(&height)
    }

    /// Append a block with `header` fields defaulted, one above the highest stored block.
    ///
    /// The first block pushed onto an empty chain is height 0. Returns its height.
    pub fn push_block(
        &self,
        transactions: Vec<roster_transactions::Transaction>,
    ) -> Result<u64, ChainError> {
        self.push_header(BlockHeader::default(), transactions)
    }

    /// Append a block built from `header`, overriding its number and parent hash.
    pub fn push_header(
        &self,
        mut header: BlockHeader,
        transactions: Vec<roster_transactions::Transaction>,
    ) -> Result<u64, ChainError> {
        let mut blocks = lock(&self.blocks);
        let (number, parent_hash) = match blocks.last_key_value() {
            Some((&height, parent)) => (height + 1, parent.hash()?),
            None => (0, BlockHash::ZERO),
        };
        header.number = number;
        header.parent_hash = parent_hash;
        blocks.insert(number, Block::new(header, transactions));
        Ok(number)
    }

    /// Append empty blocks until the highest stored height is `height`.
    pub fn extend_to(&self, height: u64) -> Result<(), ChainError> {
        loop {
            let top = lock(&self.blocks).last_key_value().map(|(&h, _)| h);
            if top.is_some_and(|h| h >= height) {
                return Ok(());
            }
            self.push_block(Vec::new())?;
        }
    }

    /// Pin the head to `height`, whether or not a block is stored there.
    pub fn set_head(&self, height: u64) {
        *lock(&self.head) = Some(height);
    }

    pub fn block_count(&self) -> usize {
        lock(&self.blocks).len()
    }
}

impl ChainReader for NullChain {
    fn block_by_number(&self, height: u64) -> Option<Block> {
        lock(&self.blocks).get(&height).cloned()
    }

    fn current_block(&self) -> Block {
        let pinned = *lock(&self.head);
        let blocks = lock(&self.blocks);
        match pinned {
            Some(height) => blocks.get(&height).cloned().unwrap_or_else(|| {
                Block::new(BlockHeader::new(height, BlockHash::ZERO), Vec::new())
            }),
            None => blocks
                .last_key_value()
                .map(|(_, block)| block.clone())
                .unwrap_or_default(),
        }
    }

    fn config(&self) -> &ChainConfig {
        &self.config
    }

    fn current_height(&self) -> u64 {
        if let Some(height) = *lock(&self.head) {
            return height;
        }
        lock(&self.blocks)
            .last_key_value()
            .map(|(&height, _)| height)
            .unwrap_or(0)
    }
}

// A panic while holding the lock cannot leave the map half-written, so a
// poisoned lock is still safe to read.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
