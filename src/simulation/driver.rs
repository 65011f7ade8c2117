/*!
 * Simulator
 * Runs a scenario script against a fresh arena per policy and records the trace
 */

use super::config::{SimulationConfig, Step};
use crate::core::errors::ConfigResult;
use crate::core::types::Pid;
use crate::memory::{
    release, try_allocate_with, AllocationMode, Arena, ArenaStats, BlockStatus, MemoryResult,
    PlacementPolicy, ProcessTable,
};
use crate::monitoring::Event;
use serde::{Deserialize, Serialize};
use tracing::info_span;

/// A status snapshot taken after a given script step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Index of the `status` step in the script
    pub step: usize,
    pub blocks: Vec<BlockStatus>,
}

/// Everything one policy run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub policy: String,
    pub mode: AllocationMode,
    pub events: Vec<Event>,
    pub snapshots: Vec<Snapshot>,
    pub final_status: Vec<BlockStatus>,
    pub stats: ArenaStats,
}

impl Trace {
    pub fn failures(&self) -> usize {
        self.events.iter().filter(|e| e.is_failure()).count()
    }
}

/// Deterministic scenario driver
///
/// Each policy run starts from the seed blocks and unbound processes, so
/// runs never observe each other's state.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run every configured policy in order
    pub fn run(&self) -> MemoryResult<Vec<Trace>> {
        self.config
            .policies
            .iter()
            .map(|policy| self.run_policy(policy))
            .collect()
    }

    /// Run the script once under `policy`
    pub fn run_policy<P>(&self, policy: &P) -> MemoryResult<Trace>
    where
        P: PlacementPolicy + ?Sized,
    {
        let span = info_span!(
            "policy_run",
            policy = policy.name(),
            mode = self.config.mode.as_str()
        );
        let _entered = span.enter();

        let mut run = Run::new(&self.config, policy.name())?;
        for (step_index, step) in self.config.script.iter().enumerate() {
            match *step {
                Step::AllocateAll => {
                    for pid in run.processes.pids() {
                        run.allocate(pid, policy, self.config.mode)?;
                    }
                }
                Step::Allocate { pid } => run.allocate(pid, policy, self.config.mode)?,
                Step::Release { pid } => run.release(pid)?,
                Step::Compact => run.compact(),
                Step::Status => run.snapshots.push(Snapshot {
                    step: step_index,
                    blocks: run.arena.status(),
                }),
            }
        }

        Ok(Trace {
            policy: policy.name().to_string(),
            mode: self.config.mode,
            final_status: run.arena.status(),
            stats: run.arena.stats(),
            events: run.events,
            snapshots: run.snapshots,
        })
    }
}

/// Mutable state of a single policy run
struct Run {
    policy: &'static str,
    arena: Arena,
    processes: ProcessTable,
    events: Vec<Event>,
    snapshots: Vec<Snapshot>,
}

impl Run {
    fn new(config: &SimulationConfig, policy: &'static str) -> MemoryResult<Self> {
        Ok(Self {
            policy,
            arena: Arena::from_sizes(&config.blocks)?,
            processes: ProcessTable::from_requests(&config.requests())?,
            events: Vec::new(),
            snapshots: Vec::new(),
        })
    }

    fn allocate<P>(&mut self, pid: Pid, policy: &P, mode: AllocationMode) -> MemoryResult<()>
    where
        P: PlacementPolicy + ?Sized,
    {
        let process = self.processes.get_mut(pid)?;
        let event = match try_allocate_with(&mut self.arena, process, policy, mode) {
            Ok(allocation) => Event::Allocated {
                pid,
                block_id: allocation.block_id,
                size: allocation.size,
            },
            Err(reason) => Event::AllocationFailed { pid, reason },
        };
        self.record(event);
        Ok(())
    }

    fn release(&mut self, pid: Pid) -> MemoryResult<()> {
        let process = self.processes.get_mut(pid)?;
        let event = match release(&mut self.arena, process) {
            Ok(block_id) => Event::Deallocated { pid, block_id },
            Err(reason) => Event::DeallocationFailed { pid, reason },
        };
        self.record(event);
        Ok(())
    }

    fn compact(&mut self) {
        let compaction = self.arena.compact();
        self.processes.rebind(&compaction);
        self.record(Event::Compacted {
            merged_block: compaction.merged_block,
            merged_size: compaction.merged_size,
        });
    }

    fn record(&mut self, event: Event) {
        event.emit(self.policy);
        self.events.push(event);
    }
}
