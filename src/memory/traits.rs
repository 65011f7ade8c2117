/*!
 * Memory Traits
 * Placement policy abstraction
 */

use super::types::Block;
use crate::core::types::Size;

/// Placement policy interface
///
/// Implementations are pure: they inspect the arena's blocks in order and
/// return the index of a free block with `size >= requested`, or `None`.
pub trait PlacementPolicy {
    /// Stable policy name used in traces and logs
    fn name(&self) -> &'static str;

    /// Select a candidate block index for `requested` units
    fn select(&self, blocks: &[Block], requested: Size) -> Option<usize>;
}
