/*!
 * Simulation Defaults and Constants
 *
 * Centralized location for the compiled-in scenario and environment keys.
 * The default scenario is the classic five-block, five-process comparison.
 */

use super::types::{Pid, Size};

// =============================================================================
// DEFAULT SCENARIO
// =============================================================================

/// Seed block sizes, in arena order
pub const DEFAULT_BLOCK_SIZES: [Size; 5] = [100, 200, 300, 400, 500];

/// Process requests as (pid, requested size), in request order
pub const DEFAULT_PROCESS_REQUESTS: [(Pid, Size); 5] =
    [(1, 200), (2, 100), (3, 500), (4, 400), (5, 300)];

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Path to a JSON scenario file
pub const ENV_SCENARIO: &str = "MEMSIM_SCENARIO";

/// Output format for the driver (`text` or `json`)
pub const ENV_OUTPUT: &str = "MEMSIM_OUTPUT";

/// Enable JSON-formatted tracing output (`1` or `true`)
pub const ENV_TRACE_JSON: &str = "MEMSIM_TRACE_JSON";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
