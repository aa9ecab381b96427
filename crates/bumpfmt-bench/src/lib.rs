//! Shared workloads for the bumpfmt benchmarks.

use bumpfmt_core::Arg;

/// A named template with its arguments.
pub struct Workload {
    pub name: &'static str,
    pub template: &'static [u8],
    pub args: Vec<Arg<'static>>,
}

/// Representative templates, from pure literal text to every conversion.
#[must_use]
pub fn workloads() -> Vec<Workload> {
    vec![
        Workload {
            name: "literal",
            template: b"the quick brown fox jumps over the lazy dog\n",
            args: Vec::new(),
        },
        Workload {
            name: "integer",
            template: b"Integer: %d\n",
            args: vec![Arg::Int(12345)],
        },
        Workload {
            name: "mixed",
            template: b"%s=%d u=%u x=%x o=%o c=%c p=%p %%\n",
            args: vec![
                Arg::from("key"),
                Arg::Int(-98765),
                Arg::Uint(4_000_000_000),
                Arg::Uint(0xdead_beef),
                Arg::Uint(0o755),
                Arg::from('z'),
                Arg::Ptr(0x7fff_1234),
            ],
        },
        Workload {
            name: "float",
            template: b"Float: %f\n",
            args: vec![Arg::Double(123.456)],
        },
        Workload {
            name: "padded",
            template: b"[%-12s|%012d|%08x]\n",
            args: vec![Arg::from("left"), Arg::Int(-42), Arg::Uint(255)],
        },
    ]
}

/// Deterministic sample values spread over the `i32` range.
#[must_use]
pub fn signed_samples(count: usize) -> Vec<i32> {
    let mut state = 0x9e37_79b9u32;
    (0..count)
        .map(|_| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as i32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpfmt_core::{FormatConfig, ScratchArena, sprintf};

    #[test]
    fn workloads_format_cleanly() {
        for w in workloads() {
            let mut arena = ScratchArena::default();
            let out = sprintf(&mut arena, &FormatConfig::default(), w.template, &w.args)
                .unwrap_or_else(|e| panic!("{}: {e}", w.name));
            assert!(!out.is_empty());
        }
    }

    #[test]
    fn samples_are_deterministic() {
        assert_eq!(signed_samples(8), signed_samples(8));
        assert_eq!(signed_samples(100).len(), 100);
    }
}
