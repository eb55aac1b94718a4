use crate::bitmap::SlotBitmap;
use crate::random::{time_seeded_rng, RandomSource};
use crate::types::{Allocation, SlotState};
use log::{debug, trace};
use std::fmt;
use tiny_rng::Rng;


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    /// The pool size is zero, negative, or does not fit in a `u64`.
    InvalidSize,
    /// Failed to allocate memory for the slot bitmap.
    OutOfMemory,
}

impl fmt::Display for InitError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize => write!(fmt, "the pool size must be a positive integer"),
            Self::OutOfMemory => write!(fmt, "failed to allocate memory for the slot bitmap"),
        }
    }
}

impl std::error::Error for InitError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// No available slot is left between the cursor and the end of the pool.
    Exhausted { cursor: u64 },
}

impl fmt::Display for AllocError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { cursor } => {
                write!(fmt, "no available slot at or after cursor {cursor}")
            }
        }
    }
}

impl std::error::Error for AllocError {}

/// A fixed-size pool of slots that are handed out in random order.
///
/// Every call to [allocate](Self::allocate) draws a random slot. If the slot is
/// available it is disposed and returned. If it was disposed by an earlier call (a
/// "collision"), the allocator scans forward from its cursor instead of drawing again,
/// disposes the first available slot it finds and moves the cursor onto it. The scan
/// never wraps around.
///
/// The fallback keeps every call bounded by the pool size, but it skews later
/// allocations toward higher indices as the pool fills up.
///
/// The pool never grows and slots are never returned to it.
pub struct DisposalAllocator<R: RandomSource = Rng> {
    slots: SlotBitmap,
    cursor: u64,
    source: R,
}

// Note: Cursor Invariant
// ~~~~~~~~~~~~~~~~~~~~~~
//
// ∀ i < cursor: slots[i] = Disposed
//
// The cursor only ever moves to the first available slot at or after itself, so it
// only skips disposed slots. It follows that the pool is exhausted exactly when every
// slot has been disposed.

impl DisposalAllocator<Rng> {
    /// Creates a pool of `pool_size` available slots, drawing from a generator seeded
    /// by [time_seeded_rng](crate::random::time_seeded_rng).
    ///
    /// Fails with [InitError::InvalidSize] if `pool_size` is not positive.
    pub fn new<N: TryInto<u64>>(pool_size: N) -> Result<Self, InitError> {
        Self::with_source(pool_size, time_seeded_rng())
    }
}

impl<R: RandomSource> DisposalAllocator<R> {
    /// Creates a pool of `pool_size` available slots that draws from `source`.
    ///
    /// Fails with [InitError::InvalidSize] if `pool_size` is not positive, and with
    /// [InitError::OutOfMemory] if the pool is too large to represent.
    pub fn with_source<N: TryInto<u64>>(pool_size: N, source: R) -> Result<Self, InitError> {
        let pool_size = match pool_size.try_into() {
            Ok(size) if size > 0 => size,
            _ => return Err(InitError::InvalidSize),
        };

        Ok(Self {
            slots: SlotBitmap::new(pool_size).ok_or(InitError::OutOfMemory)?,
            cursor: 0,
            source,
        })
    }

    /// Disposes one slot and returns it together with its scan distance.
    ///
    /// A failed call changes nothing: no slot is disposed, the cursor stays put and no
    /// random draw is consumed. Once a call has failed with [AllocError::Exhausted],
    /// every later call fails the same way.
    ///
    /// Complexity: O(1) when the draw hits an available slot, O(N / 64) word reads for
    /// the forward scan in a pool of N slots.
    pub fn allocate(&mut self) -> Result<Allocation, AllocError> {
        // By the cursor invariant nothing is left at or after the cursor exactly when
        // nothing is left at all.
        if self.remaining_available() == 0 {
            debug!("pool of {} slots exhausted", self.capacity());
            return Err(AllocError::Exhausted {
                cursor: self.cursor,
            });
        }

        let draw = self.source.next_below(self.capacity());
        let allocation = if self.slots.dispose(draw) {
            trace!("drew available slot {draw}");
            Allocation::direct(draw)
        } else {
            let Some(fallback) = self.slots.first_available_from(self.cursor) else {
                debug_assert!(false, "no available slot at or after cursor {}", self.cursor);
                return Err(AllocError::Exhausted {
                    cursor: self.cursor,
                });
            };
            self.slots.dispose(fallback);

            let allocation = Allocation::scanned(fallback, self.cursor);
            debug!(
                "drew disposed slot {draw}; scanned {} slots from cursor {} to {fallback}",
                allocation.scan_distance, self.cursor
            );
            self.cursor = fallback;
            allocation
        };

        debug_assert_eq!(Ok(()), self.check_invariant());
        Ok(allocation)
    }

    /// The number of slots in the pool.
    pub fn capacity(&self) -> u64 {
        self.slots.len()
    }

    /// The position the next forward scan starts from.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn disposed_count(&self) -> u64 {
        self.slots.disposed_count()
    }

    pub fn remaining_available(&self) -> u64 {
        self.capacity() - self.disposed_count()
    }

    /// Returns `true` if the next call to [allocate](Self::allocate) will fail.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_available() == 0
    }

    /// Returns the state of the slot at `index`, or `None` if it is out of bounds.
    pub fn slot(&self, index: u64) -> Option<SlotState> {
        (index < self.capacity()).then(|| SlotState::from(self.slots.is_disposed(index)))
    }

    /// Returns the state of every slot, in index order.
    pub fn pool_snapshot(&self) -> Vec<SlotState> {
        self.slots.iter().collect()
    }

    pub fn into_source(self) -> R {
        self.source
    }

    #[allow(dead_code)]
    /// Checks the cursor invariant and the slot accounting.
    fn check_invariant(&self) -> Result<(), String> {
        if self.cursor >= self.capacity() {
            return Err(format!(
                "cursor {} is outside a pool of {} slots",
                self.cursor,
                self.capacity()
            ));
        }
        if let Some(index) = self.slots.first_available_from(0) {
            if index < self.cursor {
                return Err(format!(
                    "slot {index} is available below cursor {}",
                    self.cursor
                ));
            }
        }
        Ok(())
    }
}

impl<R: RandomSource> fmt::Debug for DisposalAllocator<R> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("DisposalAllocator")
            .field("capacity", &self.capacity())
            .field("disposed", &self.disposed_count())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
