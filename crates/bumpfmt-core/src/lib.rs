//! # bumpfmt-core
//!
//! A small printf-style formatting engine with its own numeric conversions
//! and a bump-allocated scratch arena.
//!
//! Each formatting call takes one fixed-size scratch slice from a
//! [`ScratchArena`], converts numeric arguments into it and streams text to
//! a [`Sink`]. Arguments are a tagged list, so a directive that meets the
//! wrong type is an error rather than a garbage read.
//!
//! ```
//! use bumpfmt_core::{FormatConfig, ScratchArena, args, sprintf};
//!
//! let mut arena = ScratchArena::default();
//! let out = sprintf(&mut arena, &FormatConfig::default(), b"%s=%x", &args!["k", 255u32])?;
//! assert_eq!(out, b"k=ff");
//! # Ok::<(), bumpfmt_core::FmtError>(())
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod malloc;
pub mod stdio;
pub mod stdlib;
pub mod string;

pub use config::{FloatStyle, FormatConfig, WidthPolicy};
pub use error::{ConfigError, FmtError};
pub use malloc::{ScratchArena, SharedArena};
pub use stdio::{Arg, ArgCursor, ArgKind, FromArg, Printf, Sink, fprintf, printf, sprintf};
