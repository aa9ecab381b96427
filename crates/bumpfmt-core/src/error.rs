//! Error taxonomy for the formatting engine.
//!
//! Every fallible operation in the crate returns `Result<_, FmtError>`.
//! Unknown directives are deliberately absent: they degrade to literal
//! output and never fail a call.

use crate::stdio::args::ArgKind;
use thiserror::Error;

/// Errors surfaced by a formatting call or one of its components.
#[derive(Debug, Error)]
pub enum FmtError {
    /// The scratch arena cannot satisfy a request. The arena offset is
    /// unchanged and nothing has been written to the sink.
    #[error("scratch arena exhausted: requested {requested} bytes, {remaining} remaining")]
    ArenaExhausted { requested: usize, remaining: usize },

    /// A directive needs an argument but the list has run out.
    #[error("argument {index}: directive expects {expected}, but no argument remains")]
    MissingArgument { index: usize, expected: ArgKind },

    /// The argument at `index` does not carry the type the directive implies.
    #[error("argument {index}: directive expects {expected}, found {found}")]
    ArgumentMismatch {
        index: usize,
        expected: ArgKind,
        found: ArgKind,
    },

    /// A conversion did not fit in its destination buffer.
    #[error("conversion needs {needed} bytes but the buffer holds {capacity}")]
    ScratchOverflow { needed: usize, capacity: usize },

    /// The output sink rejected a write.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl FmtError {
    /// Stable snake_case name of the variant, used by fixtures and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ArenaExhausted { .. } => "arena_exhausted",
            Self::MissingArgument { .. } => "missing_argument",
            Self::ArgumentMismatch { .. } => "argument_mismatch",
            Self::ScratchOverflow { .. } => "scratch_overflow",
            Self::Io(_) => "io",
        }
    }
}

/// Rejected [`FormatConfig`](crate::config::FormatConfig) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("float precision {requested} exceeds the maximum of {max}")]
    PrecisionTooLarge { requested: usize, max: usize },
    #[error("scratch size {requested} is below the minimum of {min} bytes")]
    ScratchTooSmall { requested: usize, min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_stable() {
        let err = FmtError::ArenaExhausted {
            requested: 100,
            remaining: 24,
        };
        assert_eq!(err.kind(), "arena_exhausted");
        assert_eq!(
            err.to_string(),
            "scratch arena exhausted: requested 100 bytes, 24 remaining"
        );

        let err = FmtError::ArgumentMismatch {
            index: 2,
            expected: ArgKind::Int,
            found: ArgKind::Str,
        };
        assert_eq!(err.kind(), "argument_mismatch");
        assert_eq!(
            err.to_string(),
            "argument 2: directive expects int, found char *"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: FmtError = io.into();
        assert_eq!(err.kind(), "io");
    }
}
