//! Benchmarks for charter-ta transforms.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use charter_core::Candle;
use charter_ta::{find_sr_levels, heikin_ashi, renko, DEFAULT_BRICK_SIZE, DEFAULT_SR_DEPTH};

fn generate_candles(count: usize) -> Vec<Candle> {
    let mut candles = Vec::with_capacity(count);
    let mut price = 100.0_f64;

    for i in 0..count {
        // Trend plus oscillation so every transform has work to do
        let trend = (i as f64 * 0.01).sin() * 10.0;
        let volatility = (i as f64 * 0.1).sin() * 2.0;

        let open = price;
        let close = (open + trend * 0.01 + volatility).max(1.0);
        let high = open.max(close) + volatility.abs() * 0.5;
        let low = open.min(close) - (volatility.abs() * 0.5).max(0.1);

        candles.push(Candle::new(i as i64 * 60, open, high, low, close));
        price = close;
    }

    candles
}

fn bench_heikin_ashi(c: &mut Criterion) {
    let mut group = c.benchmark_group("heikin_ashi");

    for size in [100, 1000, 10000].iter() {
        let candles = generate_candles(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &candles, |b, candles| {
            b.iter(|| heikin_ashi(black_box(candles)));
        });
    }

    group.finish();
}

fn bench_renko(c: &mut Criterion) {
    let mut group = c.benchmark_group("renko");

    for size in [100, 1000, 10000].iter() {
        let candles = generate_candles(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &candles, |b, candles| {
            b.iter(|| renko(black_box(candles), DEFAULT_BRICK_SIZE));
        });
    }

    group.finish();
}

fn bench_sr_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("sr_levels");

    for size in [100, 1000, 10000].iter() {
        let candles = generate_candles(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &candles, |b, candles| {
            b.iter(|| find_sr_levels(black_box(candles), DEFAULT_SR_DEPTH));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_heikin_ashi, bench_renko, bench_sr_levels);
criterion_main!(benches);
