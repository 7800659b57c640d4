//! Criterion benchmarks for training and activation.
//!
//! Run with:
//!   cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use elman::{Network, Pattern, TrainConfig};

fn xor() -> Vec<Pattern<f64>> {
    vec![
        (vec![0.0, 0.0], vec![0.0]).into(),
        (vec![0.0, 1.0], vec![1.0]).into(),
        (vec![1.0, 0.0], vec![1.0]).into(),
        (vec![1.0, 1.0], vec![0.0]).into(),
    ]
}

/// Benchmark a full XOR training run, including construction.
fn bench_xor(c: &mut Criterion) {
    let patterns = xor();
    let config = TrainConfig::new(1000, 0.6, 0.4);

    c.bench_function("xor_1000", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(0);
            let mut network = Network::<f64>::new(2, 2, 1, &mut rng).unwrap();
            black_box(network.train(&patterns, &config, &mut rng).unwrap())
        });
    });
}

/// Benchmark update() with varying hidden layer sizes and contexts.
fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for &hiddens in &[8, 64, 256] {
        group.bench_with_input(BenchmarkId::new("contexts", hiddens), &hiddens, |b, &h| {
            let mut rng = StdRng::seed_from_u64(0);
            let mut network = Network::<f32>::new(16, h, 4, &mut rng).unwrap();
            network.set_contexts(4, None).unwrap();
            let inputs = [0.5f32; 16];

            b.iter(|| black_box(network.update(&inputs).unwrap()[0]));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_xor, bench_update);
criterion_main!(benches);
