//! Numeric-to-text conversion (itoa, utoa, itoh, itoo, ftoa).
//!
//! Every converter writes into a caller-owned buffer: digits go in
//! least-significant first, a NUL terminator follows, and the run is
//! reversed in place once. The returned slice is the text without its
//! terminator. A buffer too small for the text plus terminator is reported
//! as [`FmtError::ScratchOverflow`] before anything is written.

use crate::config::{FloatStyle, MAX_FLOAT_PRECISION};
use crate::error::FmtError;
use crate::string::reverse;

const DIGITS_LOWER: &[u8; 16] = b"0123456789abcdef";
const DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Convert a signed integer to decimal.
///
/// `i32::MIN` is rendered through its unsigned magnitude, so it prints
/// `-2147483648` rather than overflowing on negation.
pub fn itoa(num: i32, buf: &mut [u8]) -> Result<&[u8], FmtError> {
    let negative = num < 0;
    let magnitude = u64::from(num.unsigned_abs());
    let len = digit_count(magnitude, 10) + usize::from(negative);
    ensure_room(buf, len)?;

    let mut pos = emit_digits(magnitude, 10, DIGITS_LOWER, buf);
    if negative {
        buf[pos] = b'-';
        pos += 1;
    }
    Ok(terminate(buf, pos))
}

/// Convert an unsigned integer to decimal.
pub fn utoa(num: u32, buf: &mut [u8]) -> Result<&[u8], FmtError> {
    radix(u64::from(num), 10, DIGITS_LOWER, buf)
}

/// Convert to hexadecimal without a `0x` prefix.
pub fn itoh(num: u64, uppercase: bool, buf: &mut [u8]) -> Result<&[u8], FmtError> {
    let alphabet = if uppercase { DIGITS_UPPER } else { DIGITS_LOWER };
    radix(num, 16, alphabet, buf)
}

/// Convert to octal without a leading `0`.
pub fn itoo(num: u32, buf: &mut [u8]) -> Result<&[u8], FmtError> {
    radix(u64::from(num), 8, DIGITS_LOWER, buf)
}

/// Convert a double to fixed-point text with `precision` decimals.
///
/// The integer part is truncated toward zero (saturating at the `i32`
/// bounds, NaN becomes 0). The fraction is the remainder multiplied by ten
/// once per decimal and truncated; nothing is rounded and nothing carries
/// into the integer part. `precision` is clamped to [`MAX_FLOAT_PRECISION`].
/// With `precision == 0` only the integer part is written.
pub fn ftoa(
    num: f64,
    precision: usize,
    style: FloatStyle,
    buf: &mut [u8],
) -> Result<&[u8], FmtError> {
    let precision = precision.min(MAX_FLOAT_PRECISION);
    let int_part = num as i32;
    let mut frac_part = num - f64::from(int_part);
    for _ in 0..precision {
        frac_part *= 10.0;
    }
    let scaled = frac_part as i32;

    // `-0.5` truncates to an integer part of 0, which carries no sign.
    let lead_sign = style == FloatStyle::Padded && int_part == 0 && scaled < 0;
    let mut pos = usize::from(lead_sign);
    ensure_room(buf, pos)?;
    if lead_sign {
        buf[0] = b'-';
    }
    pos += itoa(int_part, &mut buf[pos..])?.len();
    if precision == 0 {
        return Ok(&buf[..pos]);
    }

    ensure_room(buf, pos + 1)?;
    buf[pos] = b'.';
    pos += 1;

    let tail = match style {
        FloatStyle::Reference => itoa(scaled, &mut buf[pos..])?.len(),
        FloatStyle::Padded => padded_fraction(scaled, precision, &mut buf[pos..])?.len(),
    };
    Ok(&buf[..pos + tail])
}

/// Write `|scaled|` as exactly `precision` digits, zero-filled on the left.
fn padded_fraction(scaled: i32, precision: usize, buf: &mut [u8]) -> Result<&[u8], FmtError> {
    ensure_room(buf, precision)?;
    // A remainder within one ulp of 1.0 can scale to exactly 10^precision.
    let ceiling = 10u64.pow(precision as u32) - 1;
    let mut value = u64::from(scaled.unsigned_abs()).min(ceiling);
    for slot in buf.iter_mut().take(precision) {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
    Ok(terminate(buf, precision))
}

fn radix<'b>(
    num: u64,
    base: u64,
    alphabet: &[u8; 16],
    buf: &'b mut [u8],
) -> Result<&'b [u8], FmtError> {
    ensure_room(buf, digit_count(num, base))?;
    let len = emit_digits(num, base, alphabet, buf);
    Ok(terminate(buf, len))
}

/// Digits of `value` in `base`; zero has one digit.
fn digit_count(mut value: u64, base: u64) -> usize {
    let mut count = 1;
    while value >= base {
        value /= base;
        count += 1;
    }
    count
}

/// Write digits least-significant first. Returns how many were written.
fn emit_digits(mut value: u64, base: u64, alphabet: &[u8; 16], buf: &mut [u8]) -> usize {
    let mut pos = 0;
    loop {
        buf[pos] = alphabet[(value % base) as usize];
        pos += 1;
        value /= base;
        if value == 0 {
            return pos;
        }
    }
}

fn ensure_room(buf: &[u8], text_len: usize) -> Result<(), FmtError> {
    let needed = text_len + 1;
    if needed > buf.len() {
        return Err(FmtError::ScratchOverflow {
            needed,
            capacity: buf.len(),
        });
    }
    Ok(())
}

/// NUL-terminate the `len` bytes written so far and put them in reading order.
fn terminate(buf: &mut [u8], len: usize) -> &[u8] {
    buf[len] = 0;
    reverse(&mut buf[..=len]);
    &buf[..len]
}
