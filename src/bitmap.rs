//! A fixed-capacity bitmap with one bit per slot.
//!
//! A set bit marks a disposed slot. Bits past `len` in the last word are never set,
//! and searches clip their results to `len`.
use crate::types::SlotState;

const WORD_BITS: u64 = u64::BITS as u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotBitmap {
    words: Vec<u64>,
    len: u64,
    disposed: u64,
}

impl SlotBitmap {
    /// Creates a bitmap of `len` slots, all of them available.
    ///
    /// Returns `None` if the words backing `len` slots cannot be allocated.
    pub fn new(len: u64) -> Option<Self> {
        let word_count = usize::try_from(len.div_ceil(WORD_BITS)).ok()?;
        let mut words = Vec::new();
        words.try_reserve_exact(word_count).ok()?;
        words.resize(word_count, 0);

        Some(Self {
            words,
            len,
            disposed: 0,
        })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of disposed slots.
    ///
    /// Complexity: O(1)
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }

    pub fn is_disposed(&self, index: u64) -> bool {
        assert!(index < self.len, "slot index {index} out of bounds");
        let (word, bit) = locate(index);
        self.words[word] & bit != 0
    }

    /// Marks the slot as disposed.
    ///
    /// Returns `false` if the slot had already been disposed.
    pub fn dispose(&mut self, index: u64) -> bool {
        assert!(index < self.len, "slot index {index} out of bounds");
        let (word, bit) = locate(index);
        if self.words[word] & bit != 0 {
            return false;
        }
        self.words[word] |= bit;
        self.disposed += 1;
        true
    }

    /// Returns the first available slot in `start..len`, if any.
    ///
    /// The search never wraps around to the beginning of the bitmap.
    ///
    /// Complexity: O(len / 64)
    pub fn first_available_from(&self, start: u64) -> Option<u64> {
        if start >= self.len {
            return None;
        }

        let first_word = (start / WORD_BITS) as usize;
        // Slots below `start` in the first word are treated as disposed.
        let mut below_start = (1u64 << (start % WORD_BITS)) - 1;

        for (offset, word) in self.words[first_word..].iter().enumerate() {
            let word = *word | below_start;
            if word != u64::MAX {
                let index =
                    (first_word + offset) as u64 * WORD_BITS + word.trailing_ones() as u64;
                return (index < self.len).then_some(index);
            }
            below_start = 0;
        }

        None
    }

    /// Iterates over the state of every slot, in index order.
    pub fn iter(&self) -> impl Iterator<Item = SlotState> + '_ {
        (0..self.len).map(move |index| SlotState::from(self.is_disposed(index)))
    }
}

fn locate(index: u64) -> (usize, u64) {
    ((index / WORD_BITS) as usize, 1 << (index % WORD_BITS))
}
