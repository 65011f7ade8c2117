/*!
 * Scenario Configuration
 * Seeds, processes, policies, allocation mode and the step script
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{DEFAULT_BLOCK_SIZES, DEFAULT_PROCESS_REQUESTS};
use crate::core::types::{Pid, Size};
use crate::memory::{AllocationMode, Arena, Policy, ProcessTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A process request: pid and requested size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub size: Size,
}

/// One scripted simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Allocate every process in request order
    AllocateAll,
    Allocate { pid: Pid },
    Release { pid: Pid },
    Compact,
    /// Record a status snapshot
    Status,
}

/// Complete scenario description
///
/// Every field has a default; the defaults reproduce the classic
/// five-block comparison without splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub blocks: Vec<Size>,
    pub processes: Vec<ProcessSpec>,
    pub policies: Vec<Policy>,
    pub mode: AllocationMode,
    pub script: Vec<Step>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            blocks: DEFAULT_BLOCK_SIZES.to_vec(),
            processes: DEFAULT_PROCESS_REQUESTS
                .iter()
                .map(|&(pid, size)| ProcessSpec { pid, size })
                .collect(),
            policies: Policy::ALL.to_vec(),
            mode: AllocationMode::Whole,
            script: vec![Step::AllocateAll, Step::Status],
        }
    }
}

impl SimulationConfig {
    /// Load and validate a JSON scenario file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON scenario
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Process requests as `(pid, size)` pairs
    pub fn requests(&self) -> Vec<(Pid, Size)> {
        self.processes.iter().map(|p| (p.pid, p.size)).collect()
    }

    /// Reject scenarios the simulator cannot run
    pub fn validate(&self) -> ConfigResult<()> {
        if self.blocks.is_empty() {
            return Err(ConfigError::Invalid("scenario defines no blocks".into()));
        }
        if self.policies.is_empty() {
            return Err(ConfigError::Invalid("scenario selects no policies".into()));
        }

        Arena::from_sizes(&self.blocks)?;
        ProcessTable::from_requests(&self.requests())?;

        let known: HashSet<Pid> = self.processes.iter().map(|p| p.pid).collect();
        for step in &self.script {
            if let Step::Allocate { pid } | Step::Release { pid } = step {
                if !known.contains(pid) {
                    return Err(ConfigError::Invalid(format!(
                        "script references unknown process {}",
                        pid
                    )));
                }
            }
        }
        Ok(())
    }
}
