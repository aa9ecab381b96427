//! String helpers operating on NUL-terminated byte slices.

pub mod reverse;

pub use reverse::{reverse, strlen};
