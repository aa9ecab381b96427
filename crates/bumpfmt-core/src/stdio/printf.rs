//! printf-style template interpreter.
//!
//! Walks a template once, copying literal runs to the sink and expanding
//! each `%`-directive from the next typed argument. Numeric conversions are
//! produced in a scratch slice taken from a [`ScratchArena`] at the start of
//! the call; that slice is the only memory a call draws from the arena.
//!
//! Directive grammar:
//!
//! ```text
//! directive := '%' ['-'] ['0'] digit* conv
//! conv      := 's' | 'd' | 'u' | 'x' | 'X' | 'o' | 'f' | 'c' | 'p' | '%' | other
//! ```
//!
//! Bounded output: padding for a single directive never exceeds
//! [`MAX_FIELD_WIDTH`] bytes.

use std::io::Write;

use crate::config::FormatConfig;
use crate::error::FmtError;
use crate::malloc::{ScratchArena, SharedArena};
use crate::stdio::args::{Arg, ArgCursor};
use crate::stdio::sink::{Sink, stdout_sink};
use crate::stdlib::{ftoa, itoa, itoh, itoo, utoa};
use crate::string::strlen;

/// Largest field width a directive can request; longer digit runs clamp.
pub const MAX_FIELD_WIDTH: usize = 4096;

// ---------------------------------------------------------------------------
// Directive types
// ---------------------------------------------------------------------------

/// Conversion selected by the byte that ends a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Str,                 // 's'
    Signed,              // 'd'
    Unsigned,            // 'u'
    Hex { upper: bool }, // 'x', 'X'
    Octal,               // 'o'
    Float,               // 'f'
    Char,                // 'c'
    Pointer,             // 'p'
    Percent,             // '%'
    /// Any other byte; rendered as `%` followed by the byte.
    Unknown(u8),
}

impl Conversion {
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            b's' => Self::Str,
            b'd' => Self::Signed,
            b'u' => Self::Unsigned,
            b'x' => Self::Hex { upper: false },
            b'X' => Self::Hex { upper: true },
            b'o' => Self::Octal,
            b'f' => Self::Float,
            b'c' => Self::Char,
            b'p' => Self::Pointer,
            b'%' => Self::Percent,
            other => Self::Unknown(other),
        }
    }

    /// Whether the `0` flag zero-fills this conversion.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Signed
                | Self::Unsigned
                | Self::Hex { .. }
                | Self::Octal
                | Self::Float
                | Self::Pointer
        )
    }
}

/// A parsed directive. Flags and width are recorded even when the active
/// [`WidthPolicy`](crate::config::WidthPolicy) discards them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub conversion: Conversion,
    pub left_align: bool, // '-'
    pub zero_pad: bool,   // '0'
    pub width: usize,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse one directive from the bytes following its `%`.
///
/// Returns the directive and the number of bytes consumed, or `None` when
/// the input ends before a conversion byte.
#[must_use]
pub fn parse_directive(fmt: &[u8]) -> Option<(Directive, usize)> {
    let mut pos = 0;

    let left_align = fmt.first() == Some(&b'-');
    if left_align {
        pos += 1;
    }
    let zero_pad = fmt.get(pos) == Some(&b'0');
    if zero_pad {
        pos += 1;
    }

    let mut width = 0usize;
    while let Some(&digit) = fmt.get(pos).filter(|b| b.is_ascii_digit()) {
        width = width
            .saturating_mul(10)
            .saturating_add(usize::from(digit - b'0'))
            .min(MAX_FIELD_WIDTH);
        pos += 1;
    }

    let conversion = Conversion::from_byte(*fmt.get(pos)?);
    Some((
        Directive {
            conversion,
            left_align,
            zero_pad,
            width,
        },
        pos + 1,
    ))
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// Sink wrapper that counts the bytes it forwards.
struct Counted<'s, S: ?Sized> {
    sink: &'s mut S,
    written: usize,
}

impl<S: Sink + ?Sized> Counted<'_, S> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), FmtError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.sink.write_bytes(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    fn fill(&mut self, byte: u8, count: usize) -> Result<(), FmtError> {
        if count == 0 {
            return Ok(());
        }
        self.sink.write_repeated(byte, count)?;
        self.written += count;
        Ok(())
    }
}

/// Format `template` with `args` into `sink`, returning the bytes written.
///
/// The template is any byte string (`&str` included) and ends at its first
/// NUL byte if it has one. The call takes
/// `config.scratch_size` bytes from `arena` before producing any output;
/// if the arena cannot supply them the call fails with
/// [`FmtError::ArenaExhausted`] and the sink is untouched. Output written
/// before a later failing directive is left in the sink.
pub fn fprintf<S: Sink + ?Sized>(
    sink: &mut S,
    arena: &mut ScratchArena,
    config: &FormatConfig,
    template: impl AsRef<[u8]>,
    args: &[Arg<'_>],
) -> Result<usize, FmtError> {
    let scratch = arena.allocate(config.scratch_size)?;
    let template = template.as_ref();
    let template = &template[..strlen(template)];
    let mut out = Counted { sink, written: 0 };
    let mut cursor = ArgCursor::new(args);

    let mut pos = 0;
    while pos < template.len() {
        let run_end = template[pos..]
            .iter()
            .position(|&b| b == b'%')
            .map_or(template.len(), |i| pos + i);
        out.write(&template[pos..run_end])?;
        if run_end == template.len() {
            break;
        }

        let Some((directive, consumed)) = parse_directive(&template[run_end + 1..]) else {
            // `%` and any flags/width at the very end.
            out.write(b"%")?;
            break;
        };
        pos = run_end + 1 + consumed;
        render(&mut out, scratch, config, &directive, &mut cursor)?;
    }
    Ok(out.written)
}

/// Format into a fresh byte vector.
pub fn sprintf(
    arena: &mut ScratchArena,
    config: &FormatConfig,
    template: impl AsRef<[u8]>,
    args: &[Arg<'_>],
) -> Result<Vec<u8>, FmtError> {
    let mut out = Vec::new();
    fprintf(&mut out, arena, config, template, args)?;
    Ok(out)
}

/// Format to standard output.
pub fn printf(
    arena: &mut ScratchArena,
    config: &FormatConfig,
    template: impl AsRef<[u8]>,
    args: &[Arg<'_>],
) -> Result<usize, FmtError> {
    let mut sink = stdout_sink();
    let written = fprintf(&mut sink, arena, config, template, args)?;
    sink.into_inner().flush()?;
    Ok(written)
}

fn render<S: Sink + ?Sized>(
    out: &mut Counted<'_, S>,
    scratch: &mut [u8],
    config: &FormatConfig,
    directive: &Directive,
    cursor: &mut ArgCursor<'_, '_>,
) -> Result<(), FmtError> {
    let field = Field {
        directive,
        pads: config.width.pads(),
    };
    match directive.conversion {
        Conversion::Percent => out.write(b"%"),
        Conversion::Unknown(byte) => out.write(&[b'%', byte]),
        Conversion::Str => {
            let s: &[u8] = cursor.next_as()?;
            field.emit(out, b"", &s[..strlen(s)])
        }
        Conversion::Char => {
            let c: i32 = cursor.next_as()?;
            // Low byte, as the conversion to `unsigned char` keeps.
            field.emit(out, b"", &[c as u8])
        }
        Conversion::Signed => {
            let text = itoa(cursor.next_as()?, scratch)?;
            field.emit_signed(out, text)
        }
        Conversion::Unsigned => field.emit(out, b"", utoa(cursor.next_as()?, scratch)?),
        Conversion::Hex { upper } => {
            let value: u32 = cursor.next_as()?;
            field.emit(out, b"", itoh(u64::from(value), upper, scratch)?)
        }
        Conversion::Octal => field.emit(out, b"", itoo(cursor.next_as()?, scratch)?),
        Conversion::Float => {
            let value: f64 = cursor.next_as()?;
            let text = ftoa(value, config.float_precision, config.float_style, scratch)?;
            field.emit_signed(out, text)
        }
        Conversion::Pointer => {
            let addr: usize = cursor.next_as()?;
            field.emit(out, b"0x", itoh(addr as u64, false, scratch)?)
        }
    }
}

/// Width and flag application for one converted value.
struct Field<'d> {
    directive: &'d Directive,
    pads: bool,
}

impl Field<'_> {
    fn emit_signed<S: Sink + ?Sized>(
        &self,
        out: &mut Counted<'_, S>,
        text: &[u8],
    ) -> Result<(), FmtError> {
        match text.split_first() {
            Some((b'-', digits)) => self.emit(out, b"-", digits),
            _ => self.emit(out, b"", text),
        }
    }

    /// Write `prefix` then `body`, padded to the field width. Zero fill goes
    /// between the prefix and the body.
    fn emit<S: Sink + ?Sized>(
        &self,
        out: &mut Counted<'_, S>,
        prefix: &[u8],
        body: &[u8],
    ) -> Result<(), FmtError> {
        let d = self.directive;
        let fill = if self.pads {
            d.width.saturating_sub(prefix.len() + body.len())
        } else {
            0
        };

        if d.left_align {
            out.write(prefix)?;
            out.write(body)?;
            out.fill(b' ', fill)
        } else if d.zero_pad && d.conversion.is_numeric() {
            out.write(prefix)?;
            out.fill(b'0', fill)?;
            out.write(body)
        } else {
            out.fill(b' ', fill)?;
            out.write(prefix)?;
            out.write(body)
        }
    }
}

// ---------------------------------------------------------------------------
// Engines
// ---------------------------------------------------------------------------

/// A formatter that owns its arena and configuration.
#[derive(Debug, Default)]
pub struct Printf {
    arena: ScratchArena,
    config: FormatConfig,
}

impl Printf {
    #[must_use]
    pub fn new(arena: ScratchArena, config: FormatConfig) -> Self {
        Self { arena, config }
    }

    /// Default arena with the given configuration.
    #[must_use]
    pub fn with_config(config: FormatConfig) -> Self {
        Self::new(ScratchArena::default(), config)
    }

    pub fn fprintf<S: Sink + ?Sized>(
        &mut self,
        sink: &mut S,
        template: impl AsRef<[u8]>,
        args: &[Arg<'_>],
    ) -> Result<usize, FmtError> {
        fprintf(sink, &mut self.arena, &self.config, template, args)
    }

    pub fn sprintf(
        &mut self,
        template: impl AsRef<[u8]>,
        args: &[Arg<'_>],
    ) -> Result<Vec<u8>, FmtError> {
        sprintf(&mut self.arena, &self.config, template, args)
    }

    pub fn printf(
        &mut self,
        template: impl AsRef<[u8]>,
        args: &[Arg<'_>],
    ) -> Result<usize, FmtError> {
        printf(&mut self.arena, &self.config, template, args)
    }

    #[must_use]
    pub fn arena(&self) -> &ScratchArena {
        &self.arena
    }

    #[must_use]
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Return every scratch byte to the arena.
    pub fn reset_arena(&mut self) {
        self.arena.reset();
    }
}

impl SharedArena {
    /// [`fprintf`] with the arena lock held for the whole call.
    pub fn fprintf<S: Sink + ?Sized>(
        &self,
        sink: &mut S,
        config: &FormatConfig,
        template: impl AsRef<[u8]>,
        args: &[Arg<'_>],
    ) -> Result<usize, FmtError> {
        fprintf(sink, &mut self.lock(), config, template, args)
    }

    pub fn sprintf(
        &self,
        config: &FormatConfig,
        template: impl AsRef<[u8]>,
        args: &[Arg<'_>],
    ) -> Result<Vec<u8>, FmtError> {
        sprintf(&mut self.lock(), config, template, args)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
