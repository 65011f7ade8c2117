/*!
 * Process Table
 * Simulated processes in request order with their weak block bindings
 */

use super::types::{Compaction, MemoryError, MemoryResult, Process};
use crate::core::types::{Pid, Size};
use std::collections::HashSet;
use tracing::debug;

/// Processes owned by the driver, kept in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    /// Build from `(pid, requested size)` pairs, rejecting duplicates and zero sizes
    pub fn from_requests(requests: &[(Pid, Size)]) -> MemoryResult<Self> {
        let mut seen = HashSet::with_capacity(requests.len());
        let mut processes = Vec::with_capacity(requests.len());
        for &(pid, size) in requests {
            if !seen.insert(pid) {
                return Err(MemoryError::DuplicateProcess { pid });
            }
            processes.push(Process::new(pid, size)?);
        }
        Ok(Self { processes })
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// Pids in request order
    pub fn pids(&self) -> Vec<Pid> {
        self.iter().map(|p| p.pid).collect()
    }

    pub fn get(&self, pid: Pid) -> MemoryResult<&Process> {
        self.iter()
            .find(|p| p.pid == pid)
            .ok_or(MemoryError::UnknownProcess { pid })
    }

    pub fn get_mut(&mut self, pid: Pid) -> MemoryResult<&mut Process> {
        self.processes
            .iter_mut()
            .find(|p| p.pid == pid)
            .ok_or(MemoryError::UnknownProcess { pid })
    }

    /// Follow a compaction's renumbering so every binding stays valid
    pub fn rebind(&mut self, compaction: &Compaction) {
        for process in &mut self.processes {
            let Some(old) = process.bound_block else {
                continue;
            };
            let new = compaction.new_id(old);
            if new != Some(old) {
                debug!(pid = process.pid, old, new = ?new, "rebound process after compaction");
            }
            process.bound_block = new;
        }
    }
}
