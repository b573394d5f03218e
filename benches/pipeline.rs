use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tick_correlation::correlation::{CorrelationEngine, CorrelationMethod};
use tick_correlation::domain_types::{Frequency, PairAligner, Resampler, TickPoint, TickSeries};

fn synthetic_series(symbol: &str, seed: u64, count: usize) -> TickSeries {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut offset = 0i64;
    let points = (0..count)
        .map(|i| {
            offset += rng.random_range(0..250i64);
            TickPoint::new(t0 + Duration::milliseconds(offset), 30.0 + (i as f64 * 0.01).sin())
        })
        .collect();
    TickSeries::from_points(symbol, None, points)
}

fn bench_resample(c: &mut Criterion) {
    let series = synthetic_series("AAA", 1, 100_000);
    let mut group = c.benchmark_group("resample");
    for frequency in Frequency::all() {
        group.bench_with_input(BenchmarkId::from_parameter(frequency), &frequency, |b, &freq| {
            b.iter(|| Resampler::resample(black_box(&series), freq))
        });
    }
    group.finish();
}

fn bench_correlate(c: &mut Criterion) {
    let a = Resampler::resample(&synthetic_series("AAA", 1, 100_000), Frequency::Second);
    let b = Resampler::resample(&synthetic_series("BBB", 2, 100_000), Frequency::Second);
    let aligned = PairAligner::align(&a, &b);

    let mut group = c.benchmark_group("correlate");
    for method in CorrelationMethod::all() {
        group.bench_with_input(BenchmarkId::from_parameter(method), &method, |bench, &method| {
            bench.iter(|| CorrelationEngine::correlate(black_box(&aligned), method))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resample, bench_correlate);
criterion_main!(benches);
