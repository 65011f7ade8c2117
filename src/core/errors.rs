/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export memory errors and expected-outcome failures from the memory module
pub use crate::memory::{AllocationFailure, DeallocationFailure, MemoryError, MemoryResult};

/// Scenario configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Failed to read scenario {path}: {message}")]
    #[diagnostic(
        code(config::io),
        help("Check that the scenario path exists and is readable.")
    )]
    Io { path: String, message: String },

    #[error("Failed to parse scenario: {0}")]
    #[diagnostic(
        code(config::parse),
        help("Scenarios are JSON objects with blocks, processes, policies, mode and script.")
    )]
    Parse(String),

    #[error("Invalid scenario: {0}")]
    #[diagnostic(code(config::invalid))]
    Invalid(String),
}

/// Configuration operation result
pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<MemoryError> for ConfigError {
    fn from(err: MemoryError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}
