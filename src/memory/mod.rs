/*!
 * Memory Module
 * Simulated arena, placement policies, and allocation operations
 *
 * ## Model
 *
 * - **Arena**: ordered blocks of the simulated address space
 * - **Policies**: first-fit, best-fit and worst-fit candidate selection
 * - **Splitting**: partial allocations leave a free remainder behind the block
 * - **Compaction**: all free space collapses into one trailing block
 */

pub mod arena;
pub mod operations;
pub mod policy;
pub mod process;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use arena::Arena;
pub use operations::{release, try_allocate, try_allocate_with, Allocation};
pub use policy::{BestFit, FirstFit, Policy, WorstFit};
pub use process::ProcessTable;
pub use traits::*;
pub use types::*;
