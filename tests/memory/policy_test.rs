/*!
 * Placement Policy Tests
 * The classic five-block comparison traced request by request
 */

use memsim::memory::{
    try_allocate_with, AllocationFailure, AllocationMode, Arena, PlacementPolicy, Policy, Process,
};
use pretty_assertions::assert_eq;

const BLOCKS: [usize; 5] = [100, 200, 300, 400, 500];
const REQUESTS: [(u32, usize); 5] = [(1, 200), (2, 100), (3, 500), (4, 400), (5, 300)];

/// Run the classic requests, returning the block id each process received
fn trace(policy: &dyn PlacementPolicy, mode: AllocationMode) -> (Arena, Vec<Result<u32, AllocationFailure>>) {
    let mut arena = Arena::from_sizes(&BLOCKS).unwrap();
    let outcomes = REQUESTS
        .iter()
        .map(|&(pid, size)| {
            let mut process = Process::new(pid, size).unwrap();
            try_allocate_with(&mut arena, &mut process, policy, mode).map(|a| a.block_id)
        })
        .collect();
    (arena, outcomes)
}

#[test]
fn test_first_fit_classic() {
    let (_, outcomes) = trace(&Policy::FirstFit, AllocationMode::Whole);
    assert_eq!(outcomes, vec![Ok(2), Ok(1), Ok(5), Ok(4), Ok(3)]);
}

#[test]
fn test_first_fit_classic_with_splitting() {
    let (arena, outcomes) = trace(&Policy::FirstFit, AllocationMode::Split);
    assert_eq!(outcomes, vec![Ok(2), Ok(1), Ok(5), Ok(4), Ok(3)]);
    // every request matched a block exactly, so nothing was split
    assert_eq!(arena.len(), 5);
}

#[test]
fn test_best_fit_classic() {
    let (_, outcomes) = trace(&Policy::BestFit, AllocationMode::Whole);
    assert_eq!(outcomes, vec![Ok(2), Ok(1), Ok(5), Ok(4), Ok(3)]);
}

#[test]
fn test_worst_fit_classic() {
    let (arena, outcomes) = trace(&Policy::WorstFit, AllocationMode::Whole);
    assert_eq!(
        outcomes,
        vec![
            Ok(5),
            Ok(4),
            Err(AllocationFailure::NoFit {
                requested: 500,
                largest_free: 300
            }),
            Err(AllocationFailure::NoFit {
                requested: 400,
                largest_free: 300
            }),
            Ok(3),
        ]
    );
    let allocated: Vec<bool> = arena.blocks().iter().map(|b| b.allocated).collect();
    assert_eq!(allocated, vec![false, false, true, true, true]);
}

#[test]
fn test_worst_fit_classic_with_splitting() {
    let (arena, outcomes) = trace(&Policy::WorstFit, AllocationMode::Split);
    assert_eq!(outcomes[0], Ok(5));
    assert_eq!(outcomes[1], Ok(4));
    assert!(outcomes[2].is_err());
    assert!(outcomes[3].is_err());
    // three 300-unit free blocks tie; the earliest (block 3) wins
    assert_eq!(outcomes[4], Ok(3));

    let layout: Vec<(u32, usize, bool)> = arena
        .blocks()
        .iter()
        .map(|b| (b.id, b.size, b.allocated))
        .collect();
    assert_eq!(
        layout,
        vec![
            (1, 100, false),
            (2, 200, false),
            (3, 300, true),
            (4, 100, true),
            (7, 300, false),
            (5, 200, true),
            (6, 300, false),
        ]
    );
    assert_eq!(arena.total_size(), 1500);
}

#[test]
fn test_custom_policy_plugs_in() {
    /// Picks the last qualifying block
    struct LastFit;

    impl PlacementPolicy for LastFit {
        fn name(&self) -> &'static str {
            "last_fit"
        }

        fn select(&self, blocks: &[memsim::memory::Block], requested: usize) -> Option<usize> {
            blocks.iter().rposition(|b| b.fits(requested))
        }
    }

    let (_, outcomes) = trace(&LastFit, AllocationMode::Split);
    assert_eq!(outcomes[0], Ok(5));
}
