#![no_main]
use bumpfmt_core::FloatStyle;
use bumpfmt_core::config::MIN_SCRATCH_SIZE;
use bumpfmt_core::stdlib::{ftoa, itoa, itoh, itoo, utoa};
use libfuzzer_sys::fuzz_target;

// Every conversion of any input fits the minimum scratch size, and the
// integer conversions agree with `core::fmt`.
fuzz_target!(|data: &[u8]| {
    let Some(bytes) = data.get(..8) else {
        return;
    };
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    let wide = u64::from_le_bytes(raw);
    let narrow = wide as u32;
    let mut buf = [0u8; MIN_SCRATCH_SIZE];

    let text = itoa(narrow as i32, &mut buf).expect("itoa fits");
    assert_eq!(text, (narrow as i32).to_string().as_bytes());
    let text = utoa(narrow, &mut buf).expect("utoa fits");
    assert_eq!(text, narrow.to_string().as_bytes());
    let text = itoh(wide, true, &mut buf).expect("itoh fits");
    assert_eq!(text, format!("{wide:X}").as_bytes());
    let text = itoo(narrow, &mut buf).expect("itoo fits");
    assert_eq!(text, format!("{narrow:o}").as_bytes());

    let value = f64::from_bits(wide);
    let precision = usize::from(data.get(8).copied().unwrap_or(6)) % 10;
    for style in [FloatStyle::Reference, FloatStyle::Padded] {
        ftoa(value, precision, style, &mut buf).expect("ftoa fits");
    }
});
