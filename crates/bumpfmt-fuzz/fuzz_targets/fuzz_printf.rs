#![no_main]
use bumpfmt_core::{Arg, FloatStyle, FormatConfig, ScratchArena, WidthPolicy, fprintf};
use libfuzzer_sys::fuzz_target;

// Arbitrary templates against a fixed argument pool: no panics, the byte
// count matches the sink, and a call draws exactly one scratch slice.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, template)) = data.split_first() else {
        return;
    };

    let config = FormatConfig {
        width: if selector & 1 == 0 {
            WidthPolicy::Apply
        } else {
            WidthPolicy::Ignore
        },
        float_style: if selector & 2 == 0 {
            FloatStyle::Reference
        } else {
            FloatStyle::Padded
        },
        float_precision: usize::from(selector >> 4) % 10,
        ..FormatConfig::default()
    };

    let pool = [
        Arg::Int(i32::MIN),
        Arg::Uint(u32::MAX),
        Arg::Double(f64::NEG_INFINITY),
        Arg::Str(b"fuzz\0tail"),
        Arg::Ptr(usize::MAX),
        Arg::Double(f64::NAN),
        Arg::Int(-1),
    ];
    let rotate = usize::from((selector >> 2) & 3);
    let args: Vec<Arg<'_>> = pool.iter().cycle().skip(rotate).take(16).copied().collect();

    let mut arena = ScratchArena::default();
    let mut out = Vec::new();
    match fprintf(&mut out, &mut arena, &config, template, &args) {
        Ok(n) => assert_eq!(n, out.len()),
        Err(err) => assert_ne!(err.kind(), "arena_exhausted"),
    }
    assert_eq!(arena.offset(), config.scratch_size);
});
