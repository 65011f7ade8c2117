/*!
 * Memory Types
 * Blocks, processes, snapshots and the failure taxonomy of the simulator
 */

use crate::core::types::{BlockId, Pid, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Misuse of the arena or process table
///
/// These are programmer errors: construction rejects them outright and
/// mutators refuse to act on them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Block at index {index} has zero size")]
    #[diagnostic(code(memory::zero_sized_block), help("Every block must hold at least one unit."))]
    ZeroSizedBlock { index: usize },

    #[error("Duplicate block id {id}")]
    #[diagnostic(code(memory::duplicate_block_id))]
    DuplicateBlockId { id: BlockId },

    #[error("Process {pid} requests zero units")]
    #[diagnostic(code(memory::zero_sized_request))]
    ZeroSizedRequest { pid: Pid },

    #[error("Process {pid} already exists")]
    #[diagnostic(code(memory::duplicate_process), help("Process ids are caller-assigned and must be unique."))]
    DuplicateProcess { pid: Pid },

    #[error("Process {pid} not found")]
    #[diagnostic(code(memory::unknown_process))]
    UnknownProcess { pid: Pid },

    #[error("Block index {index} out of range (arena holds {len} blocks)")]
    #[diagnostic(code(memory::index_out_of_range))]
    BlockIndexOutOfRange { index: usize, len: usize },

    #[error("Block {id} is already allocated")]
    #[diagnostic(code(memory::block_already_allocated))]
    BlockAlreadyAllocated { id: BlockId },

    #[error("Block {id} holds {size} units, {requested} requested")]
    #[diagnostic(code(memory::block_too_small))]
    BlockTooSmall {
        id: BlockId,
        size: Size,
        requested: Size,
    },

    #[error("No block with id {id}")]
    #[diagnostic(code(memory::unknown_block))]
    UnknownBlock { id: BlockId },

    #[error("Block {id} is not allocated")]
    #[diagnostic(code(memory::block_not_allocated))]
    BlockNotAllocated { id: BlockId },
}

/// Expected outcome of an allocation that could not be satisfied
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum AllocationFailure {
    #[error("no free block can hold {requested} units (largest free block: {largest_free})")]
    #[diagnostic(
        code(allocation::no_fit),
        help("Free memory is exhausted or fragmented. Release blocks or compact the arena.")
    )]
    NoFit { requested: Size, largest_free: Size },

    #[error("process already holds block {block_id}")]
    #[diagnostic(code(allocation::already_allocated))]
    AlreadyAllocated { block_id: BlockId },

    #[error("policy chose block index {index} but the arena rejected it: {reason}")]
    #[diagnostic(
        code(allocation::invalid_candidate),
        help("Placement policies must return a free block at least as large as the request.")
    )]
    InvalidCandidate { index: usize, reason: MemoryError },
}

/// Expected outcome of a release that could not be performed
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum DeallocationFailure {
    #[error("process is not currently allocated")]
    #[diagnostic(code(deallocation::not_allocated))]
    NotAllocated,

    #[error("bound block {block_id} is no longer allocated")]
    #[diagnostic(
        code(deallocation::stale_binding),
        help("The binding outlived its block. Bindings must be refreshed after compaction.")
    )]
    StaleBinding { block_id: BlockId },
}

/// A contiguous region of the simulated address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub size: Size,
    pub allocated: bool,
}

impl Block {
    pub fn new(id: BlockId, size: Size) -> Self {
        Self {
            id,
            size,
            allocated: false,
        }
    }

    /// True when this block is free and large enough for `size`
    #[inline]
    pub fn fits(&self, size: Size) -> bool {
        !self.allocated && self.size >= size
    }
}

/// A synthetic process requesting memory
///
/// `bound_block` is a weak back-reference by id; the arena owns the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub requested: Size,
    pub bound_block: Option<BlockId>,
}

impl Process {
    pub fn new(pid: Pid, requested: Size) -> MemoryResult<Self> {
        if requested == 0 {
            return Err(MemoryError::ZeroSizedRequest { pid });
        }
        Ok(Self {
            pid,
            requested,
            bound_block: None,
        })
    }

    pub fn is_bound(&self) -> bool {
        self.bound_block.is_some()
    }
}

/// One row of an arena status snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStatus {
    pub id: BlockId,
    pub size: Size,
    pub allocated: bool,
}

impl From<&Block> for BlockStatus {
    fn from(block: &Block) -> Self {
        Self {
            id: block.id,
            size: block.size,
            allocated: block.allocated,
        }
    }
}

impl std::fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Block {}: Size = {}, {}",
            self.id,
            self.size,
            if self.allocated {
                "Allocated"
            } else {
                "Not Allocated"
            }
        )
    }
}

/// Arena statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaStats {
    pub block_count: usize,
    pub free_block_count: usize,
    pub total_size: Size,
    pub allocated_size: Size,
    pub free_size: Size,
    pub largest_free_block: Size,
    /// `1 - largest_free_block / free_size`; 0.0 with no free space
    pub fragmentation: f64,
}

impl std::fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} blocks ({} free), {} / {} units allocated, largest free block {}, fragmentation {:.1}%",
            self.block_count,
            self.free_block_count,
            self.allocated_size,
            self.total_size,
            self.largest_free_block,
            self.fragmentation * 100.0
        )
    }
}

/// Result of compacting an arena
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compaction {
    /// Id of the synthesized free block, if any free space existed
    pub merged_block: Option<BlockId>,
    /// Total free size collapsed into the merged block
    pub merged_size: Size,
    /// Old id -> new id for every allocated block, in arena order
    pub remap: Vec<(BlockId, BlockId)>,
}

impl Compaction {
    /// New id of a block that was allocated before compaction
    pub fn new_id(&self, old: BlockId) -> Option<BlockId> {
        self.remap
            .iter()
            .find(|(from, _)| *from == old)
            .map(|(_, to)| *to)
    }
}

/// How much of a selected block a process receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// Carve exactly the requested size, leaving a free remainder
    Split,
    /// Bind the whole selected block, no splitting
    #[default]
    Whole,
}

impl AllocationMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Whole => "whole",
        }
    }
}
