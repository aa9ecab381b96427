//! Formatting policy configuration.
//!
//! Two knobs can be overridden per process through environment variables:
//! - `BUMPFMT_WIDTH`: `apply` (default) pads output to the parsed field width
//!   and honors the `-` and `0` flags; `ignore` parses and discards them.
//! - `BUMPFMT_FLOAT`: `reference` (default) prints the truncated fraction as
//!   a plain signed integer; `padded` prints it zero-filled to the precision.
//!
//! Env values are read once and cached. Code that needs other values builds
//! a [`FormatConfig`] directly.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::ConfigError;

/// Default `%f` precision.
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Largest `%f` precision. The scaled fraction must fit in an `i32`.
pub const MAX_FLOAT_PRECISION: usize = 9;

/// Default per-call scratch request in bytes.
pub const DEFAULT_SCRATCH_SIZE: usize = 100;

/// Smallest scratch that fits every conversion plus its terminator. The
/// longest is `%f` of negative infinity, `-2147483648.-2147483648`.
pub const MIN_SCRATCH_SIZE: usize = 24;

/// How parsed field widths and `-`/`0` flags affect output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthPolicy {
    /// Pad to the field width; `-` left-aligns, `0` zero-fills numbers.
    #[default]
    Apply,
    /// Parse flags and width, then discard them.
    Ignore,
}

impl WidthPolicy {
    /// Parse from string (case-insensitive). Unknown values map to `Apply`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "apply" | "pad" | "on" => Self::Apply,
            "ignore" | "off" | "reference" | "none" => Self::Ignore,
            _ => Self::Apply,
        }
    }

    #[must_use]
    pub const fn pads(self) -> bool {
        matches!(self, Self::Apply)
    }
}

/// Rendering of the fractional part of `%f`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatStyle {
    /// The scaled, truncated fraction is printed as a signed integer.
    /// `1.05` prints `1.50000` and `-1.5` prints `-1.-500000`.
    #[default]
    Reference,
    /// The fraction is printed as a magnitude zero-filled to the precision,
    /// still truncated. `1.05` prints `1.050000`, `-0.5` prints `-0.500000`.
    Padded,
}

impl FloatStyle {
    /// Parse from string (case-insensitive). Unknown values map to `Reference`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "padded" | "pad" | "fixed" | "zero" => Self::Padded,
            _ => Self::Reference,
        }
    }
}

/// Policy for one formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    pub width: WidthPolicy,
    pub float_style: FloatStyle,
    pub float_precision: usize,
    pub scratch_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            width: WidthPolicy::default(),
            float_style: FloatStyle::default(),
            float_precision: DEFAULT_FLOAT_PRECISION,
            scratch_size: DEFAULT_SCRATCH_SIZE,
        }
    }
}

impl FormatConfig {
    /// Defaults with the env-var overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            width: width_policy(),
            float_style: float_style(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: WidthPolicy) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_float_style(mut self, style: FloatStyle) -> Self {
        self.float_style = style;
        self
    }

    pub fn with_float_precision(mut self, precision: usize) -> Result<Self, ConfigError> {
        self.float_precision = precision;
        self.validate()?;
        Ok(self)
    }

    pub fn with_scratch_size(mut self, size: usize) -> Result<Self, ConfigError> {
        self.scratch_size = size;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.float_precision > MAX_FLOAT_PRECISION {
            return Err(ConfigError::PrecisionTooLarge {
                requested: self.float_precision,
                max: MAX_FLOAT_PRECISION,
            });
        }
        if self.scratch_size < MIN_SCRATCH_SIZE {
            return Err(ConfigError::ScratchTooSmall {
                requested: self.scratch_size,
                min: MIN_SCRATCH_SIZE,
            });
        }
        Ok(())
    }
}

// Atomic caches: 0 = unresolved, otherwise the encoded value.
static CACHED_WIDTH: AtomicU8 = AtomicU8::new(0);
static CACHED_FLOAT: AtomicU8 = AtomicU8::new(0);

const UNRESOLVED: u8 = 0;
const WIDTH_APPLY: u8 = 1;
const WIDTH_IGNORE: u8 = 2;
const FLOAT_REFERENCE: u8 = 1;
const FLOAT_PADDED: u8 = 2;

fn resolve(cache: &AtomicU8, var: &str, parse: fn(&str) -> u8) -> u8 {
    let cached = cache.load(Ordering::Acquire);
    if cached != UNRESOLVED {
        return cached;
    }
    let value = std::env::var(var).map_or(parse(""), |raw| parse(&raw));
    // First resolver wins so every caller observes one value per process.
    match cache.compare_exchange(UNRESOLVED, value, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => value,
        Err(existing) => existing,
    }
}

fn encode_width(raw: &str) -> u8 {
    match WidthPolicy::from_str_loose(raw) {
        WidthPolicy::Apply => WIDTH_APPLY,
        WidthPolicy::Ignore => WIDTH_IGNORE,
    }
}

fn encode_float(raw: &str) -> u8 {
    match FloatStyle::from_str_loose(raw) {
        FloatStyle::Reference => FLOAT_REFERENCE,
        FloatStyle::Padded => FLOAT_PADDED,
    }
}

/// Width policy from `BUMPFMT_WIDTH` (read on first call, cached thereafter).
#[must_use]
pub fn width_policy() -> WidthPolicy {
    match resolve(&CACHED_WIDTH, "BUMPFMT_WIDTH", encode_width) {
        WIDTH_IGNORE => WidthPolicy::Ignore,
        _ => WidthPolicy::Apply,
    }
}

/// Float style from `BUMPFMT_FLOAT` (read on first call, cached thereafter).
#[must_use]
pub fn float_style() -> FloatStyle {
    match resolve(&CACHED_FLOAT, "BUMPFMT_FLOAT", encode_float) {
        FLOAT_PADDED => FloatStyle::Padded,
        _ => FloatStyle::Reference,
    }
}
