use super::*;
use crate::random::ScriptedDraws;
use crate::types::SlotState::{Available as A, Disposed as D};
use test_strategy::proptest;
use tiny_rng::{Rand, Rng};

#[test]
fn run_records_every_call() {
    let mut pool = DisposalAllocator::with_source(3, ScriptedDraws::new([2, 2, 0])).unwrap();
    let report = run(&mut pool, 3);

    assert_eq!(
        report,
        Report {
            pool: vec![D, D, D],
            scan_distances: vec![1, 1, 2],
            results: vec![2, 0, 1],
            collisions: 2,
            failures: 0,
        }
    );
    assert_eq!(report.allocations(), 3);
    assert_eq!(report.total_reads(), 4);
    assert_eq!(report.max_scan_distance(), Some(2));
}

#[test]
fn extra_rounds_are_counted_as_failures() {
    let mut pool = DisposalAllocator::with_source(2, ScriptedDraws::new([0, 1])).unwrap();
    let report = run(&mut pool, 5);
    assert_eq!(report.results, vec![0, 1]);
    assert_eq!(report.failures, 3);
}

#[test]
fn partial_run_leaves_slots_available() {
    let mut pool = DisposalAllocator::with_source(4, ScriptedDraws::new([1])).unwrap();
    let report = run(&mut pool, 1);
    assert_eq!(report.pool, vec![A, D, A, A]);
    assert_eq!(report.collisions, 0);
}

#[test]
fn zero_rounds() {
    let mut pool = DisposalAllocator::new(4).unwrap();
    let report = run(&mut pool, 0);
    assert_eq!(report.pool, vec![A; 4]);
    assert_eq!(report.allocations(), 0);
    assert_eq!(report.max_scan_distance(), None);
}

#[test]
fn display_in_call_order() {
    let mut pool = DisposalAllocator::with_source(3, ScriptedDraws::new([2, 2, 0])).unwrap();
    let report = run(&mut pool, 4);

    assert_eq!(
        report.to_string(),
        "assets\n\
         [1, 1, 1]\n\
         read count\n\
         [1, 1, 2]\n\
         results\n\
         [2, 0, 1]\n\
         3 allocations, 2 collisions, 4 reads (longest scan 2), 1 failed (pool exhausted)"
    );
}

#[test]
fn display_with_sorted_reads() {
    let report = Report {
        pool: vec![D, A],
        scan_distances: vec![1, 3, 2],
        results: vec![0, 5, 4],
        collisions: 2,
        failures: 0,
    };

    assert_eq!(report.scan_distances_desc(), vec![3, 2, 1]);
    assert_eq!(
        report.display(ReadOrder::Descending).to_string(),
        "assets\n\
         [1, 0]\n\
         read count\n\
         [3, 2, 1]\n\
         results\n\
         [0, 5, 4]\n\
         3 allocations, 2 collisions, 6 reads (longest scan 3)"
    );
}

#[proptest]
fn full_run_visits_every_slot(#[strategy(1u64..300)] pool_size: u64, seed: u64) {
    let mut pool = DisposalAllocator::with_source(pool_size, Rng::from_seed(seed)).unwrap();
    let report = run(&mut pool, pool_size);

    let mut results = report.results.clone();
    results.sort_unstable();
    assert_eq!(results, (0..pool_size).collect::<Vec<_>>());
    assert_eq!(report.failures, 0);
    assert!(report.pool.iter().all(|s| s.is_disposed()));
    // A scan distance above 1 only comes from the scan fallback.
    assert!(report.scan_distances.iter().filter(|d| **d > 1).count() as u64 <= report.collisions);
}
