#![no_main]
use disposal_allocator::{AllocError, DisposalAllocator, ScriptedDraws};
use libfuzzer_sys::arbitrary;
use libfuzzer_sys::arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;

#[derive(Arbitrary, Debug)]
struct Input {
    // Kept small so that pools are drained within a single run.
    pool_size: u16,
    draws: Vec<u64>,
    extra_calls: u8,
}

fuzz_target!(|input: Input| {
    let pool_size = u64::from(input.pool_size);
    let mut pool = match DisposalAllocator::with_source(pool_size, ScriptedDraws::new(input.draws))
    {
        Ok(pool) => pool,
        Err(_) => {
            assert_eq!(pool_size, 0);
            return;
        }
    };

    let mut taken = BTreeSet::new();
    for _ in 0..pool_size {
        let cursor = pool.cursor();
        let allocation = pool.allocate().expect("a pool of N slots serves N calls");
        assert!(taken.insert(allocation.index), "slot handed out twice");
        assert!(pool.cursor() >= cursor);
        if allocation.collision {
            assert_eq!(allocation.scan_distance, allocation.index - cursor + 1);
        }
    }

    for _ in 0..input.extra_calls {
        assert!(matches!(pool.allocate(), Err(AllocError::Exhausted { .. })));
    }
    assert_eq!(pool.remaining_available(), 0);
});
