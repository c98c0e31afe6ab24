use criterion::{black_box, criterion_group, criterion_main, Criterion};
use probe_core::series::SampleSeries;
use probe_core::summary::summarize;
use probe_core::types::Position;

fn make_series(n: usize) -> SampleSeries {
    let mut series = SampleSeries::with_capacity(n);
    for i in 0..n {
        let phase = i as f64 * std::f64::consts::TAU / 512.0;
        series.push(Position::new(
            100.0 + phase.sin(),
            -40.0 + phase.cos(),
            1200.0 + (i % 7) as f64 * 0.01,
        ));
    }
    series
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    // 5000 = slider maximum, 200_000 = endless cap
    for n in [100, 5000, 200_000] {
        let series = make_series(n);
        group.bench_function(format!("{n}_samples"), |b| {
            b.iter(|| black_box(summarize(&series).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_summarize);
criterion_main!(benches);
