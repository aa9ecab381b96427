use bumpfmt_core::config::MIN_SCRATCH_SIZE;
use bumpfmt_core::stdlib::{ftoa, itoa, itoh, itoo, utoa};
use bumpfmt_core::{
    Arg, FloatStyle, FmtError, FormatConfig, Printf, ScratchArena, WidthPolicy, args, fprintf,
    sprintf,
};

const SIGNED_SAMPLES: &[i32] = &[
    0,
    1,
    -1,
    7,
    -9,
    10,
    -10,
    99,
    100,
    12345,
    -12345,
    65535,
    1 << 30,
    i32::MAX,
    i32::MIN,
    i32::MIN + 1,
];

const UNSIGNED_SAMPLES: &[u32] = &[0, 1, 7, 8, 15, 16, 255, 256, 4095, 0xdead_beef, u32::MAX];

struct Case {
    template: &'static [u8],
    args: Vec<Arg<'static>>,
    expected: &'static str,
}

fn case(template: &'static [u8], args: &[Arg<'static>], expected: &'static str) -> Case {
    Case {
        template,
        args: args.to_vec(),
        expected,
    }
}

fn render(config: &FormatConfig, template: &[u8], args: &[Arg<'_>]) -> String {
    let mut arena = ScratchArena::default();
    let out = sprintf(&mut arena, config, template, args)
        .unwrap_or_else(|e| panic!("{} failed: {e}", String::from_utf8_lossy(template)));
    String::from_utf8(out).unwrap()
}

#[test]
fn conversions_agree_with_std_formatting() {
    let mut buf = [0u8; 32];
    for &n in SIGNED_SAMPLES {
        assert_eq!(itoa(n, &mut buf).unwrap(), n.to_string().as_bytes(), "itoa({n})");
    }
    for &n in UNSIGNED_SAMPLES {
        assert_eq!(utoa(n, &mut buf).unwrap(), n.to_string().as_bytes());
        assert_eq!(itoo(n, &mut buf).unwrap(), format!("{n:o}").as_bytes());
        let wide = (u64::from(n) << 8) | 0xab;
        assert_eq!(itoh(wide, false, &mut buf).unwrap(), format!("{wide:x}").as_bytes());
        assert_eq!(itoh(wide, true, &mut buf).unwrap(), format!("{wide:X}").as_bytes());
    }
}

#[test]
fn exact_binary_fractions_match_std_fixed_point() {
    // Values whose fraction is exact in binary render like `{:.6}`.
    let samples = [0.0, 0.5, 0.25, 1.125, 3.75, 42.0625, 1000.5, 65536.03125];
    let mut buf = [0u8; MIN_SCRATCH_SIZE];
    for value in samples {
        let text = ftoa(value, 6, FloatStyle::Padded, &mut buf).unwrap();
        assert_eq!(text, format!("{value:.6}").as_bytes(), "ftoa({value})");
    }
}

#[test]
fn signed_widths_match_std_alignment() {
    for &n in SIGNED_SAMPLES {
        for width in [0usize, 1, 5, 12, 20] {
            let args = args![n, n, n];
            let template = format!("%{width}d|%-{width}d|%0{width}d");
            let expected = format!("{n:>width$}|{n:<width$}|{n:0width$}");
            assert_eq!(
                render(&FormatConfig::default(), template.as_bytes(), &args),
                expected,
                "{template} with {n}"
            );
        }
    }
}

#[test]
fn hex_widths_match_std_alignment() {
    for &n in UNSIGNED_SAMPLES {
        for width in [0usize, 3, 9] {
            let template = format!("%0{width}x|%{width}X|%-{width}o|");
            let expected = format!("{n:0width$x}|{n:>width$X}|{n:<width$o}|");
            assert_eq!(
                render(&FormatConfig::default(), template.as_bytes(), &args![n, n, n]),
                expected
            );
        }
    }
}

#[test]
fn ignored_widths_leave_bare_conversions() {
    let config = FormatConfig::default().with_width(WidthPolicy::Ignore);
    for &n in SIGNED_SAMPLES {
        assert_eq!(render(&config, b"%-020d", &args![n]), n.to_string());
    }
    assert_eq!(render(&config, b"%08p", &[Arg::Ptr(0x10)]), "0x10");
    assert_eq!(render(&config, b"%9c", &args!['z']), "z");
}

#[test]
fn template_matrix() {
    let cases = [
        case(b"String: %s\n", &args!["Hello, World!"], "String: Hello, World!\n"),
        case(b"Integer: %d\n", &args![12345], "Integer: 12345\n"),
        case(b"Unsigned: %u\n", &args![12345u32], "Unsigned: 12345\n"),
        case(b"Hex: %x\n", &args![255u32], "Hex: ff\n"),
        case(b"Octal: %o\n", &args![8u32], "Octal: 10\n"),
        case(b"Float: %f\n", &args![123.456], "Float: 123.456000\n"),
        case(b"Char: %c\n", &args!['A'], "Char: A\n"),
        case(b"Literal Percent: %%\n", &[], "Literal Percent: %\n"),
        case(b"%d%%%u", &args![-1, 1u32], "-1%1"),
        case(b"%y%d", &args![3], "%y3"),
        case(b"%5", &[], "%"),
        case(b"", &[], ""),
        case(b"%s|%s", &args!["", "x"], "|x"),
        case(b"[%-6s]", &args!["abc"], "[abc   ]"),
        case(b"[%6s]", &args!["abc"], "[   abc]"),
        case(b"%f", &args![0.0], "0.0"),
        case(b"%f", &args![-2.0], "-2.0"),
    ];
    for c in &cases {
        assert_eq!(
            render(&FormatConfig::default(), c.template, &c.args),
            c.expected,
            "template {:?}",
            String::from_utf8_lossy(c.template)
        );
    }
}

#[test]
fn arena_budget_is_per_call_not_per_directive() {
    let mut arena = ScratchArena::default();
    let config = FormatConfig::default();
    let mut out = Vec::new();
    fprintf(
        &mut out,
        &mut arena,
        &config,
        b"%d %u %x %o %f %p",
        &[
            Arg::Int(-3),
            Arg::Uint(3),
            Arg::Uint(3),
            Arg::Uint(3),
            Arg::Double(3.5),
            Arg::Ptr(3),
        ],
    )
    .unwrap();
    assert_eq!(out, b"-3 3 3 3 3.500000 0x3");
    assert_eq!(arena.offset(), config.scratch_size);
}

#[test]
fn custom_arena_and_scratch_sizes() {
    let config = FormatConfig::default().with_scratch_size(MIN_SCRATCH_SIZE).unwrap();
    let mut engine = Printf::new(ScratchArena::new(MIN_SCRATCH_SIZE * 3), config);
    for _ in 0..3 {
        assert_eq!(engine.sprintf(b"%f", &args![f64::NEG_INFINITY]).unwrap().len(), 23);
    }
    let err = engine.sprintf(b"%f", &args![1.0]).unwrap_err();
    assert!(matches!(
        err,
        FmtError::ArenaExhausted {
            requested: MIN_SCRATCH_SIZE,
            remaining: 0
        }
    ));
}
