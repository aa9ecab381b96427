//! Formatted output.
//!
//! The template interpreter, its typed argument list and the sinks it
//! writes to.

pub mod args;
pub mod printf;
pub mod sink;

pub use args::{Arg, ArgCursor, ArgKind, FromArg};
pub use printf::{Conversion, Directive, Printf, fprintf, parse_directive, printf, sprintf};
pub use sink::{IoSink, Sink, stdout_sink};
