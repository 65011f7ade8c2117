/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (caller-assigned)
pub type Pid = u32;

/// Block identity within the current arena generation
pub type BlockId = u32;

/// Size type for blocks and requests
pub type Size = usize;
