/*!
 * Arena Tests
 * Splitting, release and compaction through the public API
 */

use memsim::memory::{release, try_allocate, Arena, Block, DeallocationFailure, Process, WorstFit};
use pretty_assertions::assert_eq;

fn block(id: u32, size: usize, allocated: bool) -> Block {
    Block {
        id,
        size,
        allocated,
    }
}

#[test]
fn test_split_modifies_only_the_chosen_block() {
    let mut arena = Arena::from_sizes(&[100, 200, 300]).unwrap();
    let mut process = Process::new(1, 120).unwrap();

    let allocation = try_allocate(&mut arena, &mut process, &WorstFit).unwrap();

    assert_eq!(allocation.block_id, 3);
    assert_eq!(
        arena.blocks(),
        &[
            block(1, 100, false),
            block(2, 200, false),
            block(3, 120, true),
            block(4, 180, false),
        ]
    );
}

#[test]
fn test_release_of_never_allocated_process_leaves_arena_unchanged() {
    let mut arena = Arena::from_sizes(&[100, 200]).unwrap();
    let before = arena.status();
    let mut process = Process::new(9, 50).unwrap();

    assert_eq!(
        release(&mut arena, &mut process),
        Err(DeallocationFailure::NotAllocated)
    );
    assert_eq!(arena.status(), before);
}

#[test]
fn test_compaction_example() {
    let mut arena = Arena::from_blocks(vec![
        block(1, 200, true),
        block(2, 100, false),
        block(3, 150, true),
        block(4, 50, false),
    ])
    .unwrap();

    arena.compact();

    assert_eq!(
        arena.blocks(),
        &[block(1, 200, true), block(2, 150, true), block(3, 150, false)]
    );
}

#[test]
fn test_compaction_conserves_allocated_and_free_totals() {
    let mut arena = Arena::from_blocks(vec![
        block(1, 30, false),
        block(2, 70, true),
        block(3, 10, false),
        block(4, 90, true),
        block(5, 5, false),
    ])
    .unwrap();
    let allocated = arena.allocated_size();
    let free = arena.free_size();

    let compaction = arena.compact();

    assert_eq!(arena.allocated_size(), allocated);
    assert_eq!(arena.free_size(), free);
    assert_eq!(compaction.merged_size, 45);
    assert_eq!(arena.stats().free_block_count, 1);
    assert_eq!(arena.stats().fragmentation, 0.0);
}

#[test]
fn test_remainder_is_independently_allocatable() {
    let mut arena = Arena::from_sizes(&[500]).unwrap();
    let mut first = Process::new(1, 200).unwrap();
    let mut second = Process::new(2, 300).unwrap();

    try_allocate(&mut arena, &mut first, &WorstFit).unwrap();
    let allocation = try_allocate(&mut arena, &mut second, &WorstFit).unwrap();

    assert_eq!(allocation.block_id, 2);
    assert_eq!(arena.free_size(), 0);
    assert_eq!(arena.len(), 2);
}

#[test]
fn test_compaction_after_release_enables_large_request() {
    let mut arena = Arena::from_sizes(&[100, 100, 100]).unwrap();
    let mut processes: Vec<Process> = (1..=3).map(|pid| Process::new(pid, 100).unwrap()).collect();
    for process in &mut processes {
        try_allocate(&mut arena, process, &WorstFit).unwrap();
    }
    release(&mut arena, &mut processes[0]).unwrap();
    release(&mut arena, &mut processes[2]).unwrap();

    let mut large = Process::new(4, 200).unwrap();
    assert!(try_allocate(&mut arena, &mut large, &WorstFit).is_err());

    arena.compact();
    let allocation = try_allocate(&mut arena, &mut large, &WorstFit).unwrap();
    assert_eq!(allocation.size, 200);
    assert_eq!(arena.free_size(), 0);
}
