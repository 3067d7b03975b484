// Gaussian smoothing benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use rust_cwt::smoothing::{build_normalized_1d_kernel, gaussian_convolution};
use std::hint::black_box;

fn bench_gaussian_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian_convolution");

    for &(size, deviation) in &[(51usize, 1.0), (256, 2.0), (512, 4.0)] {
        let field = Array2::from_shape_fn((size, size), |(i, j)| ((i * 31 + j * 17) % 13) as f64);
        group.bench_function(format!("n={}_sigma={}", size, deviation), |b| {
            b.iter(|| gaussian_convolution(black_box(&field), black_box(deviation)).unwrap())
        });
    }

    group.finish();
}

fn bench_kernel(c: &mut Criterion) {
    c.bench_function("normalized_kernel_sigma=8", |b| {
        b.iter(|| build_normalized_1d_kernel(black_box(8.0), None).unwrap())
    });
}

criterion_group!(benches, bench_gaussian_convolution, bench_kernel);
criterion_main!(benches);
