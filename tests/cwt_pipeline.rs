//! End-to-end checks on a 1000-sample cosine over a 1200-scale bank

use approx::assert_abs_diff_eq;
use ndarray::Array1;
use rust_cwt::cwt::{CwtComponent, CwtEngine, ScaleBank};
use rust_cwt::smoothing::gaussian_convolution;
use rust_cwt::Error;
use std::f64::consts::PI;

fn cosine_signal() -> Array1<f64> {
    let constant = 1.0 / 1000.0 * 2.0 * PI;
    Array1::from_shape_fn(1000, |i| (i as f64 * constant).cos())
}

fn cosine_engine() -> CwtEngine {
    let bank = ScaleBank::new(1, 6, 200, 2.0 * PI, 4.0, false).unwrap();
    CwtEngine::new(cosine_signal(), bank).unwrap()
}

#[test]
fn test_perform_transform_shape() {
    let mut engine = cosine_engine();
    engine.perform_transform();

    let output = engine.output().unwrap();
    assert_eq!(output.nrows(), 200 * 6 * 2);
    assert_eq!(output.ncols(), 1000);
    assert!(output.iter().all(|v| v.is_finite()));
}

#[test]
fn test_split_modulus_phase_consistency() {
    let untouched = cosine_engine();
    assert!(matches!(
        untouched.split_real_and_imaginary(CwtComponent::Both),
        Err(Error::NotReady)
    ));
    assert!(matches!(untouched.compute_modulus(), Err(Error::NotReady)));
    assert!(matches!(untouched.compute_phase(), Err(Error::NotReady)));

    let mut engine = cosine_engine();
    engine.perform_transform();
    let output = engine.output().unwrap().clone();

    let split = engine.split_real_and_imaginary(CwtComponent::Both).unwrap();
    let real = split.real.unwrap();
    let imag = split.imaginary.unwrap();
    assert_eq!(imag[[0, 5]], output[[1, 5]]);
    assert_eq!(real[[0, 21]], output[[0, 21]]);

    let modulus = engine.compute_modulus().unwrap();
    let expected = (real[[25, 25]] * real[[25, 25]] + imag[[25, 25]] * imag[[25, 25]]).sqrt();
    assert_abs_diff_eq!(modulus[[25, 25]], expected, epsilon = 1e-3);

    let phase = engine.compute_phase().unwrap();
    let expected = (imag[[32, 32]] / real[[32, 32]]).atan();
    assert_abs_diff_eq!(phase[[32, 32]], expected, epsilon = 1e-3);
}

#[test]
fn test_smooth_square_modulus() {
    // 2 octaves x 32 voices over 64 samples
    let signal = Array1::from_shape_fn(64, |i| (i as f64 * 0.4).sin());
    let bank = ScaleBank::new(1, 2, 32, 2.0 * PI, 1.0, true).unwrap();
    let mut engine = CwtEngine::new(signal, bank).unwrap();
    engine.perform_transform();

    let modulus = engine.compute_modulus().unwrap();
    assert_eq!(modulus.dim(), (64, 64));

    let smoothed = gaussian_convolution(&modulus, 1.5).unwrap();
    assert_eq!(smoothed.dim(), (64, 64));
    assert!(smoothed.iter().all(|v| *v >= 0.0));
    assert!(smoothed.sum() <= modulus.sum());

    // the engine's field is untouched by downstream smoothing
    assert!(engine.is_ready());
}
