/*!
 * Event System
 * Strongly-typed simulation events, rendered as text or JSON and mirrored to tracing
 */

use crate::core::types::{BlockId, Pid, Size};
use crate::memory::{AllocationFailure, DeallocationFailure};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One outcome of a simulation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Allocated {
        pid: Pid,
        block_id: BlockId,
        size: Size,
    },
    AllocationFailed {
        pid: Pid,
        reason: AllocationFailure,
    },
    Deallocated {
        pid: Pid,
        block_id: BlockId,
    },
    DeallocationFailed {
        pid: Pid,
        reason: DeallocationFailure,
    },
    Compacted {
        merged_block: Option<BlockId>,
        merged_size: Size,
    },
}

impl Event {
    /// Whether this event reports an expected failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::AllocationFailed { .. } | Self::DeallocationFailed { .. }
        )
    }

    /// Mirror the event into the tracing pipeline
    pub fn emit(&self, policy: &str) {
        match self {
            Self::Allocated {
                pid,
                block_id,
                size,
            } => info!(policy, pid, block_id, size, "allocated"),
            Self::AllocationFailed { pid, reason } => {
                warn!(policy, pid, reason = %reason, "allocation failed")
            }
            Self::Deallocated { pid, block_id } => info!(policy, pid, block_id, "deallocated"),
            Self::DeallocationFailed { pid, reason } => {
                warn!(policy, pid, reason = %reason, "deallocation failed")
            }
            Self::Compacted {
                merged_block,
                merged_size,
            } => info!(policy, merged_block = ?merged_block, merged_size, "compacted"),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Allocated {
                pid,
                block_id,
                size,
            } => write!(
                f,
                "Process {} allocated to block {} of size {}",
                pid, block_id, size
            ),
            Self::AllocationFailed { pid, reason } => {
                write!(f, "Process {} cannot be allocated: {}", pid, reason)
            }
            Self::Deallocated { pid, block_id } => {
                write!(f, "Process {} deallocated from block {}", pid, block_id)
            }
            Self::DeallocationFailed { pid, reason } => {
                write!(f, "Process {} cannot be deallocated: {}", pid, reason)
            }
            Self::Compacted {
                merged_block: Some(id),
                merged_size,
            } => write!(
                f,
                "Compacted free space into block {} of size {}",
                id, merged_size
            ),
            Self::Compacted {
                merged_block: None, ..
            } => write!(f, "Compacted arena, no free space to merge"),
        }
    }
}
