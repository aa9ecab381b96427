//! Template interpreter benchmarks.

use bumpfmt_bench::workloads;
use bumpfmt_core::{Arg, FormatConfig, ScratchArena, WidthPolicy, fprintf};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_workloads(c: &mut Criterion) {
    let mut group = c.benchmark_group("fprintf");
    let config = FormatConfig::default();

    for w in workloads() {
        let mut out = Vec::with_capacity(256);
        let mut arena = ScratchArena::default();
        let len = fprintf(&mut out, &mut arena, &config, w.template, &w.args).unwrap_or(0);
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("vec_sink", w.name), &w, |b, w| {
            b.iter(|| {
                // One call per fresh arena; the default arena serves ten.
                let mut arena = ScratchArena::default();
                out.clear();
                let n = fprintf(&mut out, &mut arena, &config, w.template, &w.args);
                black_box(n.ok());
            });
        });
    }
    group.finish();
}

fn bench_width_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("width_policy");
    let template: &[u8] = b"[%-20s|%020d|%20x]";
    let args = bumpfmt_core::args!["name", -1234, 0xabcu32];

    for policy in [WidthPolicy::Apply, WidthPolicy::Ignore] {
        let config = FormatConfig::default().with_width(policy);
        let mut out = Vec::with_capacity(128);
        group.bench_function(BenchmarkId::from_parameter(format!("{policy:?}")), |b| {
            b.iter(|| {
                let mut arena = ScratchArena::default();
                out.clear();
                black_box(fprintf(&mut out, &mut arena, &config, template, &args).ok());
            });
        });
    }
    group.finish();
}

fn bench_arena_reuse(c: &mut Criterion) {
    c.bench_function("arena_reset_cycle", |b| {
        let config = FormatConfig::default();
        let mut arena = ScratchArena::default();
        let mut out = Vec::with_capacity(64);
        b.iter(|| {
            if arena.remaining() < config.scratch_size {
                arena.reset();
            }
            out.clear();
            black_box(fprintf(&mut out, &mut arena, &config, b"%d", &[Arg::Int(12345)]).ok());
        });
    });
}

criterion_group!(benches, bench_workloads, bench_width_policy, bench_arena_reuse);
criterion_main!(benches);
