use std::fmt;

/// The state of a single slot in the pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlotState {
    Available,
    Disposed,
}

impl SlotState {
    /// Returns `true` if the slot can still be allocated.
    pub fn is_available(&self) -> bool {
        *self == Self::Available
    }

    /// Returns `true` if the slot has already been handed out.
    pub fn is_disposed(&self) -> bool {
        *self == Self::Disposed
    }
}

impl From<bool> for SlotState {
    /// `true` means the slot has been disposed.
    fn from(disposed: bool) -> Self {
        if disposed {
            Self::Disposed
        } else {
            Self::Available
        }
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "A"),
            Self::Disposed => write!(f, "D"),
        }
    }
}

/// The record of one successful call to
/// [DisposalAllocator::allocate](crate::DisposalAllocator::allocate).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// The slot that was disposed by the call.
    pub index: u64,

    /// The number of slots examined to find `index`.
    ///
    /// This is 1 when the random draw hit an available slot. After a collision it is the
    /// length of the forward scan, counting both the cursor position and `index`.
    pub scan_distance: u64,

    /// Whether the random draw hit a disposed slot and the scan fallback was used.
    pub collision: bool,
}

impl Allocation {
    pub(crate) fn direct(index: u64) -> Self {
        Self {
            index,
            scan_distance: 1,
            collision: false,
        }
    }

    pub(crate) fn scanned(index: u64, cursor: u64) -> Self {
        debug_assert!(index >= cursor);
        Self {
            index,
            scan_distance: index - cursor + 1,
            collision: true,
        }
    }
}
