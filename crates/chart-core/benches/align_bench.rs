use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use histochart_core::{align, locate, AlignOptions, DataPoint, TickUnit};

/// Irregular hourly-ish samples starting 2015-01-01.
fn gen_series(n: usize, phase: f64) -> Vec<DataPoint> {
    const T0_MS: i64 = 1_420_070_400_000;
    const MINUTE_MS: i64 = 60_000;
    (0..n)
        .map(|i| {
            let jitter = (i % 7) as i64 * 5;
            let t = T0_MS + (i as i64 * 53 + jitter) * MINUTE_MS;
            DataPoint::at_millis(t, (i as f64 * 0.01 + phase).sin() * 100.0)
        })
        .collect()
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    for &n in &[10_000usize, 100_000usize] {
        let data = vec![gen_series(n, 0.0), gen_series(n / 2, 1.5)];
        for unit in [TickUnit::Day, TickUnit::Month] {
            let opts = AlignOptions { tick_unit: unit, ..AlignOptions::default() };
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_{unit}")), &opts, |b, opts| {
                b.iter_batched(
                    || data.clone(),
                    |d| { let _ = black_box(align(&d, opts)); },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let data = vec![gen_series(100_000, 0.0)];
    let opts = AlignOptions { tick_unit: TickUnit::Day, ..AlignOptions::default() };
    let Ok(alignment) = align(&data, &opts) else { return };
    let buckets = &alignment.series[0].buckets;
    let probes: Vec<_> = (0..1000).map(|i| alignment.x_scale.from_px(i as f64 * 0.9)).collect();

    c.bench_function("locate_1000_probes", |b| {
        b.iter(|| {
            for t in &probes {
                black_box(locate(buckets, *t));
            }
        })
    });
}

criterion_group!(benches, bench_align, bench_locate);
criterion_main!(benches);
