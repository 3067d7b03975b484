// CWT benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array1;
use rust_cwt::cwt::{CwtEngine, CwtMethod, ScaleBank};
use std::f64::consts::PI;
use std::hint::black_box;

fn cosine(n: usize) -> Array1<f64> {
    Array1::from_shape_fn(n, |i| (i as f64 / n as f64 * 2.0 * PI).cos())
}

/// Full transform, FFT vs direct correlation
fn bench_perform_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("perform_transform");
    group.sample_size(10);

    let bank = ScaleBank::new(1, 6, 32, 2.0 * PI, 1.0, false).unwrap();
    let signal = cosine(1000);

    for method in [CwtMethod::Fft, CwtMethod::Conv] {
        group.bench_function(format!("n=1000_scales=192_{:?}", method), |b| {
            b.iter(|| {
                let mut engine = CwtEngine::new(black_box(signal.clone()), bank.clone())
                    .unwrap()
                    .with_method(method);
                engine.perform_transform();
                engine
            })
        });
    }

    group.finish();
}

/// Derived views on an existing field
fn bench_derived_fields(c: &mut Criterion) {
    let bank = ScaleBank::new(1, 6, 200, 2.0 * PI, 4.0, false).unwrap();
    let mut engine = CwtEngine::new(cosine(1000), bank).unwrap();
    engine.perform_transform();

    c.bench_function("modulus_1200x1000", |b| {
        b.iter(|| black_box(engine.compute_modulus().unwrap()))
    });
    c.bench_function("phase_1200x1000", |b| {
        b.iter(|| black_box(engine.compute_phase().unwrap()))
    });
}

criterion_group!(benches, bench_perform_transform, bench_derived_fields);
criterion_main!(benches);
