/*!
 * Arena
 * Ordered block store: split-on-allocate, free, and global compaction
 */

use super::types::{ArenaStats, Block, BlockStatus, Compaction, MemoryError, MemoryResult};
use crate::core::types::{BlockId, Size};
use std::collections::HashSet;
use tracing::debug;

/// The simulated address space
///
/// Blocks are kept in address order; that order defines "first" for every
/// placement scan. Mutation goes through `&mut self`, so a host that shares an
/// arena across threads must wrap it in its own mutex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    blocks: Vec<Block>,
}

impl Arena {
    /// Build an arena from seed sizes, assigning ids `1..=n` in order
    pub fn from_sizes(sizes: &[Size]) -> MemoryResult<Self> {
        let blocks = sizes
            .iter()
            .enumerate()
            .map(|(idx, &size)| Block::new(idx as BlockId + 1, size))
            .collect();
        Self::from_blocks(blocks)
    }

    /// Build an arena from explicit blocks, rejecting zero sizes and duplicate ids
    pub fn from_blocks(blocks: Vec<Block>) -> MemoryResult<Self> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for (index, block) in blocks.iter().enumerate() {
            if block.size == 0 {
                return Err(MemoryError::ZeroSizedBlock { index });
            }
            if !seen.insert(block.id) {
                return Err(MemoryError::DuplicateBlockId { id: block.id });
            }
        }
        debug!(block_count = blocks.len(), "arena initialized");
        Ok(Self { blocks })
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// Current position of a block in arena order
    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    /// Allocate the free block at `index`, splitting off any remainder
    ///
    /// When the block is larger than `exact_size` it shrinks to `exact_size`
    /// and a new free block carrying the remainder is inserted directly after
    /// it. Returns the id of the allocated block.
    pub fn allocate(&mut self, index: usize, exact_size: Size) -> MemoryResult<BlockId> {
        let fresh_id = self.fresh_id();
        let len = self.blocks.len();
        let block = self
            .blocks
            .get_mut(index)
            .ok_or(MemoryError::BlockIndexOutOfRange { index, len })?;

        if block.allocated {
            return Err(MemoryError::BlockAlreadyAllocated { id: block.id });
        }
        if exact_size == 0 || block.size < exact_size {
            return Err(MemoryError::BlockTooSmall {
                id: block.id,
                size: block.size,
                requested: exact_size,
            });
        }

        let id = block.id;
        let remainder = block.size - exact_size;
        block.size = exact_size;
        block.allocated = true;

        if remainder > 0 {
            self.blocks.insert(index + 1, Block::new(fresh_id, remainder));
            debug!(
                block_id = id,
                size = exact_size,
                remainder_id = fresh_id,
                remainder,
                "split block"
            );
        }

        debug!(block_id = id, size = exact_size, "allocated block");
        Ok(id)
    }

    /// Mark the block with `id` free; neighbours are not merged
    pub fn free(&mut self, id: BlockId) -> MemoryResult<()> {
        let index = self.position(id).ok_or(MemoryError::UnknownBlock { id })?;
        let block = &mut self.blocks[index];

        if !block.allocated {
            return Err(MemoryError::BlockNotAllocated { id });
        }
        block.allocated = false;
        debug!(block_id = id, size = block.size, "freed block");
        Ok(())
    }

    /// Collapse all free space into one trailing block and renumber
    ///
    /// Allocated blocks keep their relative order; every block's id becomes
    /// its 1-based position. The returned remap lists old -> new ids for the
    /// allocated blocks so bindings can be refreshed.
    pub fn compact(&mut self) -> Compaction {
        let free_size = self.free_size();
        let mut compacted: Vec<Block> = self
            .blocks
            .iter()
            .filter(|block| block.allocated)
            .copied()
            .collect();
        if free_size > 0 {
            compacted.push(Block::new(0, free_size));
        }

        let mut remap = Vec::with_capacity(compacted.len());
        for (idx, block) in compacted.iter_mut().enumerate() {
            let new_id = idx as BlockId + 1;
            if block.allocated {
                remap.push((block.id, new_id));
            }
            block.id = new_id;
        }

        let merged_block = (free_size > 0).then(|| compacted.len() as BlockId);
        debug!(
            before = self.blocks.len(),
            after = compacted.len(),
            merged_size = free_size,
            "compacted arena"
        );
        self.blocks = compacted;

        Compaction {
            merged_block,
            merged_size: free_size,
            remap,
        }
    }

    /// Status snapshot in arena order
    pub fn status(&self) -> Vec<BlockStatus> {
        self.blocks.iter().map(BlockStatus::from).collect()
    }

    pub fn total_size(&self) -> Size {
        self.blocks.iter().map(|block| block.size).sum()
    }

    pub fn allocated_size(&self) -> Size {
        self.blocks
            .iter()
            .filter(|block| block.allocated)
            .map(|block| block.size)
            .sum()
    }

    pub fn free_size(&self) -> Size {
        self.blocks
            .iter()
            .filter(|block| !block.allocated)
            .map(|block| block.size)
            .sum()
    }

    pub fn largest_free_block(&self) -> Size {
        self.blocks
            .iter()
            .filter(|block| !block.allocated)
            .map(|block| block.size)
            .max()
            .unwrap_or(0)
    }

    pub fn stats(&self) -> ArenaStats {
        let free_size = self.free_size();
        let largest_free_block = self.largest_free_block();
        let fragmentation = if free_size == 0 {
            0.0
        } else {
            1.0 - largest_free_block as f64 / free_size as f64
        };

        ArenaStats {
            block_count: self.blocks.len(),
            free_block_count: self.blocks.iter().filter(|block| !block.allocated).count(),
            total_size: self.total_size(),
            allocated_size: self.allocated_size(),
            free_size,
            largest_free_block,
            fragmentation,
        }
    }

    /// Block count + 1, bumped past any larger id supplied via `from_blocks`
    fn fresh_id(&self) -> BlockId {
        let count = self.blocks.len() as BlockId;
        let highest = self.blocks.iter().map(|block| block.id).max().unwrap_or(0);
        count.max(highest) + 1
    }
}

impl std::fmt::Display for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Memory Blocks Status:")?;
        for block in &self.blocks {
            writeln!(f, "{}", BlockStatus::from(block))?;
        }
        Ok(())
    }
}
