/*!
 * Memory Placement Simulator Library
 * Deterministic first/best/worst-fit allocation over a simulated arena
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod simulation;

// Re-exports
pub use crate::core::errors::{ConfigError, ConfigResult};
pub use memory::{
    release, try_allocate, try_allocate_with, AllocationFailure, AllocationMode, Arena,
    DeallocationFailure, MemoryError, MemoryResult, PlacementPolicy, Policy, Process,
    ProcessTable,
};
pub use monitoring::{init_tracing, Event};
pub use simulation::{render_json, render_text, SimulationConfig, Simulator, Step, Trace};
