#![doc = include_str!("../README.md")]
pub mod allocator;
pub use allocator::{AllocError, DisposalAllocator, InitError};
pub mod bitmap;
pub mod random;
pub use random::{RandomSource, ScriptedDraws};
pub mod simulation;
pub use simulation::Report;
mod types;
pub use types::{Allocation, SlotState};
