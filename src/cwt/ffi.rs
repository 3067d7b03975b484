//! Python FFI bindings for CWT
//!
//! Provides Python-callable functions using PyO3.

use ndarray::Array1;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::prelude::*;

use super::core::CwtEngine;
use super::utils::CwtMethod;
use super::wavelets::ScaleBank;
use crate::error::Error;

fn to_py_err(e: Error) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

#[allow(clippy::too_many_arguments)]
fn run_engine(
    signal: Array1<f64>,
    start_octave: u32,
    num_octaves: u32,
    voices_per_octave: u32,
    center_frequency: f64,
    shape_factor: f64,
    normalize: bool,
    direct: bool,
) -> Result<CwtEngine, Error> {
    let bank = ScaleBank::new(
        start_octave,
        num_octaves,
        voices_per_octave,
        center_frequency,
        shape_factor,
        normalize,
    )?;
    let method = if direct { CwtMethod::Conv } else { CwtMethod::Fft };
    let mut engine = CwtEngine::new(signal, bank)?.with_method(method);
    engine.perform_transform();
    Ok(engine)
}

/// Python-callable CWT function
///
/// # Arguments
/// * `signal` - Input signal (1D numpy array)
/// * `start_octave` - First octave, scale 2^start_octave (default: 1)
/// * `num_octaves` - Number of octaves (default: 6)
/// * `voices_per_octave` - Scales per octave (default: 32)
/// * `center_frequency` - Morlet carrier angular frequency (default: 2*pi)
/// * `shape_factor` - Morlet envelope deviation (default: 1.0)
/// * `normalize` - Unit-energy kernels (default: false)
/// * `direct` - Use direct correlation instead of FFT (default: false)
///
/// # Returns
/// Tuple of (field, scales):
/// - field: row-interleaved coefficients (2D array, [2 * num_scales, signal_len]),
///   row 2k real and row 2k+1 imaginary
/// - scales: dilation of each scale (1D array)
///
/// # Example (Python)
/// ```python
/// import _rust_cwt
/// import numpy as np
///
/// signal = np.cos(np.linspace(0, 2 * np.pi, 1000))
/// field, scales = _rust_cwt.cwt_py(signal, 1, 6, 200)
/// ```
#[pyfunction]
#[pyo3(signature = (signal, start_octave=1, num_octaves=6, voices_per_octave=32, center_frequency=std::f64::consts::TAU, shape_factor=1.0, normalize=false, direct=false))]
#[allow(clippy::too_many_arguments)]
pub fn cwt_py<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    start_octave: u32,
    num_octaves: u32,
    voices_per_octave: u32,
    center_frequency: f64,
    shape_factor: f64,
    normalize: bool,
    direct: bool,
) -> PyResult<(Bound<'py, PyArray2<f64>>, Bound<'py, PyArray1<f64>>)> {
    let signal = signal.as_array().to_owned();

    let engine = py
        .detach(|| {
            run_engine(
                signal,
                start_octave,
                num_octaves,
                voices_per_octave,
                center_frequency,
                shape_factor,
                normalize,
                direct,
            )
        })
        .map_err(to_py_err)?;

    let scales = engine.scale_bank().scales();
    let field = engine
        .field()
        .cloned()
        .ok_or_else(|| to_py_err(Error::NotReady))?
        .into_array();

    Ok((field.into_pyarray(py), scales.into_pyarray(py)))
}

/// CWT modulus, sqrt(re^2 + im^2), as a [num_scales, signal_len] array
#[pyfunction]
#[pyo3(signature = (signal, start_octave=1, num_octaves=6, voices_per_octave=32, center_frequency=std::f64::consts::TAU, shape_factor=1.0, normalize=false))]
#[allow(clippy::too_many_arguments)]
pub fn cwt_modulus_py<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    start_octave: u32,
    num_octaves: u32,
    voices_per_octave: u32,
    center_frequency: f64,
    shape_factor: f64,
    normalize: bool,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let signal = signal.as_array().to_owned();

    let modulus = py
        .detach(|| {
            run_engine(
                signal,
                start_octave,
                num_octaves,
                voices_per_octave,
                center_frequency,
                shape_factor,
                normalize,
                false,
            )?
            .compute_modulus()
        })
        .map_err(to_py_err)?;

    Ok(modulus.into_pyarray(py))
}

/// CWT phase, single-quadrant atan(im / re), as a [num_scales, signal_len] array
#[pyfunction]
#[pyo3(signature = (signal, start_octave=1, num_octaves=6, voices_per_octave=32, center_frequency=std::f64::consts::TAU, shape_factor=1.0, normalize=false))]
#[allow(clippy::too_many_arguments)]
pub fn cwt_phase_py<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    start_octave: u32,
    num_octaves: u32,
    voices_per_octave: u32,
    center_frequency: f64,
    shape_factor: f64,
    normalize: bool,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let signal = signal.as_array().to_owned();

    let phase = py
        .detach(|| {
            run_engine(
                signal,
                start_octave,
                num_octaves,
                voices_per_octave,
                center_frequency,
                shape_factor,
                normalize,
                false,
            )?
            .compute_phase()
        })
        .map_err(to_py_err)?;

    Ok(phase.into_pyarray(py))
}
