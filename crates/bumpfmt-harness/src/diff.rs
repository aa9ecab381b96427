//! Diff rendering for fixture comparison.

/// Describe how `actual` departs from `expected`, byte by byte.
///
/// Both sides are shown with control and non-ASCII bytes escaped, followed
/// by the offset of the first differing byte.
#[must_use]
pub fn render_diff(expected: &[u8], actual: &[u8]) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let first = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .unwrap_or(expected.len().min(actual.len()));

    let mut out = String::new();
    out.push_str(&format!("-{}\n", escape(expected)));
    out.push_str(&format!("+{}\n", escape(actual)));
    out.push_str(&format!(
        "@@ first difference at byte {first}: expected {}, actual {} @@",
        describe(expected.get(first)),
        describe(actual.get(first)),
    ));
    out
}

/// Printable form of a byte string (`\n` and `\xNN` style escapes).
#[must_use]
pub fn escape(bytes: &[u8]) -> String {
    bytes.escape_ascii().to_string()
}

fn describe(byte: Option<&u8>) -> String {
    match byte {
        Some(b) => format!("'{}'", core::ascii::escape_default(*b)),
        None => String::from("end of output"),
    }
}
