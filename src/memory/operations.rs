/*!
 * Allocation Operations
 * Bind processes to blocks through a placement policy, and release them
 */

use super::arena::Arena;
use super::traits::PlacementPolicy;
use super::types::{AllocationFailure, AllocationMode, DeallocationFailure, Process};
use crate::core::types::{BlockId, Size};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A satisfied allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub block_id: BlockId,
    /// Size of the bound block
    pub size: Size,
}

/// Allocate with splitting: the process gets exactly what it asked for
pub fn try_allocate<P>(
    arena: &mut Arena,
    process: &mut Process,
    policy: &P,
) -> Result<Allocation, AllocationFailure>
where
    P: PlacementPolicy + ?Sized,
{
    try_allocate_with(arena, process, policy, AllocationMode::Split)
}

/// Allocate under an explicit [`AllocationMode`]
///
/// On a miss the process stays unbound and the arena is untouched.
pub fn try_allocate_with<P>(
    arena: &mut Arena,
    process: &mut Process,
    policy: &P,
    mode: AllocationMode,
) -> Result<Allocation, AllocationFailure>
where
    P: PlacementPolicy + ?Sized,
{
    if let Some(block_id) = process.bound_block {
        return Err(AllocationFailure::AlreadyAllocated { block_id });
    }

    let Some(index) = policy.select(arena.blocks(), process.requested) else {
        return Err(AllocationFailure::NoFit {
            requested: process.requested,
            largest_free: arena.largest_free_block(),
        });
    };

    let size = match mode {
        AllocationMode::Split => process.requested,
        AllocationMode::Whole => arena
            .blocks()
            .get(index)
            .map_or(process.requested, |block| block.size),
    };

    let block_id = arena
        .allocate(index, size)
        .map_err(|reason| AllocationFailure::InvalidCandidate { index, reason })?;
    process.bound_block = Some(block_id);

    debug!(
        pid = process.pid,
        block_id,
        size,
        policy = policy.name(),
        "process bound to block"
    );
    Ok(Allocation { block_id, size })
}

/// Release the block bound to `process`
///
/// A second release of the same process reports `NotAllocated`.
pub fn release(arena: &mut Arena, process: &mut Process) -> Result<BlockId, DeallocationFailure> {
    let block_id = process
        .bound_block
        .ok_or(DeallocationFailure::NotAllocated)?;

    arena
        .free(block_id)
        .map_err(|_| DeallocationFailure::StaleBinding { block_id })?;
    process.bound_block = None;

    debug!(pid = process.pid, block_id, "process released block");
    Ok(block_id)
}
