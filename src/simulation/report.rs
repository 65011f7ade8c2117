/*!
 * Reporting
 * Human-readable and JSON rendering of simulation traces
 */

use super::driver::Trace;
use crate::memory::{AllocationMode, BlockStatus, Policy};
use std::fmt;

/// Render traces as the plain-text report printed by the driver
pub fn render_text(traces: &[Trace]) -> String {
    traces
        .iter()
        .map(|trace| TraceReport(trace).to_string())
        .collect()
}

/// Render traces as pretty-printed JSON
pub fn render_json(traces: &[Trace]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(traces)
}

/// Text layout of a single policy run
struct TraceReport<'a>(&'a Trace);

impl fmt::Display for TraceReport<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trace = self.0;
        let title = Policy::from_str(&trace.policy).map_or(trace.policy.as_str(), |p| p.title());
        let mode = match trace.mode {
            AllocationMode::Split => "splitting blocks",
            AllocationMode::Whole => "whole blocks",
        };
        writeln!(out, "\nAllocating using {} ({}):", title, mode)?;

        for event in &trace.events {
            writeln!(out, "{}", event)?;
        }

        if trace.snapshots.is_empty() {
            write_status(out, &trace.final_status)?;
        } else {
            for snapshot in &trace.snapshots {
                write_status(out, &snapshot.blocks)?;
            }
        }

        writeln!(out, "Summary: {}", trace.stats)?;
        if trace.failures() > 0 {
            writeln!(out, "Unsatisfied operations: {}", trace.failures())?;
        }
        Ok(())
    }
}

fn write_status(out: &mut fmt::Formatter<'_>, blocks: &[BlockStatus]) -> fmt::Result {
    writeln!(out, "\nMemory Blocks Status:")?;
    for block in blocks {
        writeln!(out, "{}", block)?;
    }
    writeln!(out)
}
