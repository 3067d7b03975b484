//! Python FFI bindings for Gaussian smoothing
//!
//! Provides Python-callable functions using PyO3.

use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;

use super::core::gaussian_convolution;

/// Blur a square 2D numpy array with an isotropic Gaussian.
///
/// # Arguments
/// * `field` - Square input field (2D numpy array)
/// * `deviation` - Gaussian standard deviation in cells (default: 1.0)
///
/// # Example (Python)
/// ```python
/// import _rust_cwt
/// import numpy as np
///
/// field = np.zeros((51, 51))
/// field[25, 25] = 1.0
/// blurred = _rust_cwt.gaussian_convolution_py(field, 1.0)
/// ```
#[pyfunction]
#[pyo3(signature = (field, deviation=1.0))]
pub fn gaussian_convolution_py<'py>(
    py: Python<'py>,
    field: PyReadonlyArray2<f64>,
    deviation: f64,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let field = field.as_array().to_owned();

    let blurred = py
        .detach(|| gaussian_convolution(&field, deviation))
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

    Ok(blurred.into_pyarray(py))
}
