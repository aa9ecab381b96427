//! Number-to-text conversion.

pub mod conversion;

pub use conversion::{ftoa, itoa, itoh, itoo, utoa};
