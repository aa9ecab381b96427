//! Scratch memory for conversions.
//!
//! A bump arena hands out monotonically increasing byte ranges from a fixed
//! buffer and never frees them. Formatting calls take their scratch slice
//! from here.

pub mod arena;

pub use arena::{DEFAULT_ARENA_CAPACITY, ScratchArena, SharedArena};
