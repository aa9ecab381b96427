//! Typed argument lists and the forward-only cursor over them.
//!
//! Callers build an ordered list of tagged values. Each directive asks the
//! cursor for the type it implies; a tag mismatch or a short list is a
//! typed error instead of a garbage read.

use core::fmt;

use crate::error::FmtError;

/// One formatting argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    /// `int`, also the promoted type of `char` arguments.
    Int(i32),
    /// `unsigned int`.
    Uint(u32),
    /// `double`.
    Double(f64),
    /// Character sequence; output stops at the first NUL.
    Str(&'a [u8]),
    /// Address rendered by `%p`.
    Ptr(usize),
}

impl Arg<'_> {
    /// Address of `value` as a `%p` argument.
    #[must_use]
    pub fn ptr<T: ?Sized>(value: &T) -> Self {
        Self::Ptr(core::ptr::from_ref(value).cast::<()>().addr())
    }

    #[must_use]
    pub const fn kind(&self) -> ArgKind {
        match self {
            Self::Int(_) => ArgKind::Int,
            Self::Uint(_) => ArgKind::Uint,
            Self::Double(_) => ArgKind::Double,
            Self::Str(_) => ArgKind::Str,
            Self::Ptr(_) => ArgKind::Ptr,
        }
    }
}

impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Arg<'_> {
    fn from(v: u32) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for Arg<'_> {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

/// Characters are promoted to `int`, as in a variadic call.
impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Self::Int(c as i32)
    }
}

impl From<u8> for Arg<'_> {
    fn from(b: u8) -> Self {
        Self::Int(i32::from(b))
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Self::Str(s)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        Self::Str(s)
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(p: *const T) -> Self {
        Self::Ptr(p.addr())
    }
}

impl<T> From<*mut T> for Arg<'_> {
    fn from(p: *mut T) -> Self {
        Self::Ptr(p.addr())
    }
}

/// Type tag of an [`Arg`], named the way a C prototype would name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Int,
    Uint,
    Double,
    Str,
    Ptr,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Uint => "unsigned int",
            Self::Double => "double",
            Self::Str => "char *",
            Self::Ptr => "void *",
        })
    }
}

/// Types a directive can pull out of an [`Arg`].
pub trait FromArg<'a>: Sized {
    const KIND: ArgKind;

    fn from_arg(arg: Arg<'a>) -> Option<Self>;
}

impl FromArg<'_> for i32 {
    const KIND: ArgKind = ArgKind::Int;

    fn from_arg(arg: Arg<'_>) -> Option<Self> {
        match arg {
            Arg::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl FromArg<'_> for u32 {
    const KIND: ArgKind = ArgKind::Uint;

    fn from_arg(arg: Arg<'_>) -> Option<Self> {
        match arg {
            Arg::Uint(v) => Some(v),
            _ => None,
        }
    }
}

impl FromArg<'_> for f64 {
    const KIND: ArgKind = ArgKind::Double;

    fn from_arg(arg: Arg<'_>) -> Option<Self> {
        match arg {
            Arg::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl<'a> FromArg<'a> for &'a [u8] {
    const KIND: ArgKind = ArgKind::Str;

    fn from_arg(arg: Arg<'a>) -> Option<Self> {
        match arg {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl FromArg<'_> for usize {
    const KIND: ArgKind = ArgKind::Ptr;

    fn from_arg(arg: Arg<'_>) -> Option<Self> {
        match arg {
            Arg::Ptr(p) => Some(p),
            _ => None,
        }
    }
}

/// Forward-only position over an argument list.
#[derive(Debug, Clone)]
pub struct ArgCursor<'s, 'a> {
    args: &'s [Arg<'a>],
    pos: usize,
}

impl<'s, 'a> ArgCursor<'s, 'a> {
    #[must_use]
    pub fn new(args: &'s [Arg<'a>]) -> Self {
        Self { args, pos: 0 }
    }

    /// Take the next argument as `T`. On error the cursor does not move.
    pub fn next_as<T: FromArg<'a>>(&mut self) -> Result<T, FmtError> {
        let index = self.pos;
        let arg = *self.args.get(index).ok_or(FmtError::MissingArgument {
            index,
            expected: T::KIND,
        })?;
        let value = T::from_arg(arg).ok_or(FmtError::ArgumentMismatch {
            index,
            expected: T::KIND,
            found: arg.kind(),
        })?;
        self.pos += 1;
        Ok(value)
    }

    /// Arguments taken so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Arguments not yet taken.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.args.len() - self.pos
    }
}

/// Build an `[Arg; N]` from values that convert into [`Arg`].
///
/// ```
/// use bumpfmt_core::{Arg, args};
/// let list = args![12345, "text", 2.5, 'A'];
/// assert_eq!(list[0], Arg::Int(12345));
/// assert_eq!(list[3], Arg::Int(65));
/// ```
#[macro_export]
macro_rules! args {
    () => {{
        let list: [$crate::Arg<'static>; 0] = [];
        list
    }};
    ($($value:expr),+ $(,)?) => {
        [$($crate::Arg::from($value)),+]
    };
}
