/*!
 * Scenario Tests
 * Full scripted runs through the simulator
 */

use memsim::memory::{AllocationFailure, AllocationMode, BlockStatus, DeallocationFailure, Policy};
use memsim::{Event, SimulationConfig, Simulator, Step};
use pretty_assertions::assert_eq;

fn status(specs: &[(u32, usize, bool)]) -> Vec<BlockStatus> {
    specs
        .iter()
        .map(|&(id, size, allocated)| BlockStatus {
            id,
            size,
            allocated,
        })
        .collect()
}

#[test]
fn test_default_scenario_runs_every_policy_from_fresh_state() {
    let traces = Simulator::new(SimulationConfig::default())
        .unwrap()
        .run()
        .unwrap();

    let policies: Vec<&str> = traces.iter().map(|t| t.policy.as_str()).collect();
    assert_eq!(policies, vec!["first_fit", "best_fit", "worst_fit"]);

    // first-fit and best-fit place every process
    for trace in &traces[..2] {
        assert_eq!(trace.failures(), 0);
        assert!(trace.final_status.iter().all(|b| b.allocated));
        assert_eq!(trace.snapshots.len(), 1);
    }

    let worst = &traces[2];
    assert_eq!(
        worst.events,
        vec![
            Event::Allocated { pid: 1, block_id: 5, size: 500 },
            Event::Allocated { pid: 2, block_id: 4, size: 400 },
            Event::AllocationFailed {
                pid: 3,
                reason: AllocationFailure::NoFit { requested: 500, largest_free: 300 },
            },
            Event::AllocationFailed {
                pid: 4,
                reason: AllocationFailure::NoFit { requested: 400, largest_free: 300 },
            },
            Event::Allocated { pid: 5, block_id: 3, size: 300 },
        ]
    );
    assert_eq!(
        worst.final_status,
        status(&[
            (1, 100, false),
            (2, 200, false),
            (3, 300, true),
            (4, 400, true),
            (5, 500, true),
        ])
    );
}

#[test]
fn test_split_release_compact_cycle_keeps_bindings_valid() {
    let config = SimulationConfig {
        policies: vec![Policy::WorstFit],
        mode: AllocationMode::Split,
        script: vec![
            Step::AllocateAll,
            Step::Release { pid: 2 },
            Step::Compact,
            Step::Status,
            Step::Release { pid: 1 },
            Step::Allocate { pid: 3 },
        ],
        ..SimulationConfig::default()
    };
    let trace = Simulator::new(config).unwrap().run_policy(&Policy::WorstFit).unwrap();

    assert_eq!(
        &trace.events[5..],
        &[
            Event::Deallocated { pid: 2, block_id: 4 },
            Event::Compacted { merged_block: Some(3), merged_size: 1000 },
            // process 1 held block 5, renumbered to 2 by compaction
            Event::Deallocated { pid: 1, block_id: 2 },
            Event::Allocated { pid: 3, block_id: 3, size: 500 },
        ]
    );
    assert_eq!(
        trace.snapshots[0].blocks,
        status(&[(1, 300, true), (2, 200, true), (3, 1000, false)])
    );
    assert_eq!(trace.snapshots[0].step, 3);
    assert_eq!(
        trace.final_status,
        status(&[(1, 300, true), (2, 200, false), (3, 500, true), (4, 500, false)])
    );
    assert_eq!(trace.stats.total_size, 1500);
}

#[test]
fn test_release_of_unallocated_process_is_reported() {
    let config = SimulationConfig {
        policies: vec![Policy::FirstFit],
        script: vec![
            Step::Release { pid: 4 },
            Step::Allocate { pid: 4 },
            Step::Release { pid: 4 },
            Step::Release { pid: 4 },
        ],
        ..SimulationConfig::default()
    };
    let traces = Simulator::new(config).unwrap().run().unwrap();

    assert_eq!(
        traces[0].events,
        vec![
            Event::DeallocationFailed { pid: 4, reason: DeallocationFailure::NotAllocated },
            Event::Allocated { pid: 4, block_id: 4, size: 400 },
            Event::Deallocated { pid: 4, block_id: 4 },
            Event::DeallocationFailed { pid: 4, reason: DeallocationFailure::NotAllocated },
        ]
    );
    assert!(traces[0].final_status.iter().all(|b| !b.allocated));
}

#[test]
fn test_runs_are_deterministic() {
    let simulator = Simulator::new(SimulationConfig {
        mode: AllocationMode::Split,
        script: vec![Step::AllocateAll, Step::Compact, Step::Status],
        ..SimulationConfig::default()
    })
    .unwrap();

    assert_eq!(simulator.run().unwrap(), simulator.run().unwrap());
}

#[test]
fn test_text_report_mentions_each_policy() {
    let traces = Simulator::new(SimulationConfig::default()).unwrap().run().unwrap();
    let text = memsim::render_text(&traces);

    assert!(text.contains("Allocating using First Fit (whole blocks):"));
    assert!(text.contains("Allocating using Worst Fit (whole blocks):"));
    assert!(text.contains("Process 1 allocated to block 2 of size 200"));
    assert!(text.contains("Block 2: Size = 200, Not Allocated"));
    assert!(text.contains("Unsatisfied operations: 2"));
}

#[test]
fn test_json_report_roundtrips() {
    let traces = Simulator::new(SimulationConfig::default()).unwrap().run().unwrap();
    let json = memsim::render_json(&traces).unwrap();
    let back: Vec<memsim::Trace> = serde_json::from_str(&json).unwrap();

    assert_eq!(back.len(), traces.len());
    for (decoded, original) in back.iter().zip(&traces) {
        assert_eq!(decoded.policy, original.policy);
        assert_eq!(decoded.events, original.events);
        assert_eq!(decoded.final_status, original.final_status);
        assert_eq!(decoded.stats.free_size, original.stats.free_size);
    }
}
