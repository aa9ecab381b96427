//! The demonstration sequence: one line per conversion on a shared arena.

use bumpfmt_core::{Arg, FmtError, FormatConfig, Printf, ScratchArena, Sink};

/// Stands in for a code address in the `%p` line.
static POINTER_TARGET: u8 = 0;

/// Each line of the demo as a template and its arguments.
#[must_use]
pub fn demo_lines() -> Vec<(&'static [u8], Vec<Arg<'static>>)> {
    vec![
        line(b"String: %s\n", &[Arg::from("Hell oWorld")]),
        line(b"Integer: %d\n", &[Arg::Int(12345)]),
        line(b"Unsigned: %u\n", &[Arg::Uint(54321)]),
        line(b"Hex: %x\n", &[Arg::Uint(255)]),
        line(b"Octal: %o\n", &[Arg::Uint(255)]),
        line(b"Float: %f\n", &[Arg::Double(123.456)]),
        line(b"Char: %c\n", &[Arg::from('A')]),
        line(b"Pointer: %p\n", &[Arg::ptr(&POINTER_TARGET)]),
        line(b"Literal Percent: %%\n", &[]),
    ]
}

fn line(template: &'static [u8], args: &[Arg<'static>]) -> (&'static [u8], Vec<Arg<'static>>) {
    (template, args.to_vec())
}

/// Write the demo to `sink`, one call per line on one default arena.
pub fn run_demo<S: Sink + ?Sized>(sink: &mut S, config: FormatConfig) -> Result<usize, FmtError> {
    let mut engine = Printf::new(ScratchArena::default(), config);
    let mut written = 0;
    for (template, args) in demo_lines() {
        written += engine.fprintf(sink, template, &args)?;
    }
    Ok(written)
}

/// The demo output as bytes.
pub fn demo_program(config: FormatConfig) -> Result<Vec<u8>, FmtError> {
    let mut out = Vec::new();
    run_demo(&mut out, config)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpfmt_core::WidthPolicy;

    #[test]
    fn demo_output() {
        let out = String::from_utf8(demo_program(FormatConfig::default()).unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "String: Hell oWorld");
        assert_eq!(lines[1], "Integer: 12345");
        assert_eq!(lines[2], "Unsigned: 54321");
        assert_eq!(lines[3], "Hex: ff");
        assert_eq!(lines[4], "Octal: 377");
        assert_eq!(lines[5], "Float: 123.456000");
        assert_eq!(lines[6], "Char: A");
        assert!(lines[7].starts_with("Pointer: 0x"));
        assert_eq!(lines[8], "Literal Percent: %");
    }

    #[test]
    fn demo_fits_default_arena_under_either_width_policy() {
        let applied = demo_program(FormatConfig::default()).unwrap();
        let ignored = demo_program(FormatConfig::default().with_width(WidthPolicy::Ignore)).unwrap();
        assert_eq!(applied, ignored);
    }
}
