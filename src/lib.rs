//! # Rust CWT - wavelet analysis and Gaussian smoothing
//!
//! Continuous wavelet transform of 1D signals over an octave/voice scale bank,
//! with split/modulus/phase views of the result, plus separable Gaussian
//! smoothing of square 2D fields.
//!
//! ```no_run
//! use ndarray::Array1;
//! use rust_cwt::cwt::{CwtEngine, ScaleBank};
//! use rust_cwt::smoothing::gaussian_convolution;
//!
//! let signal = Array1::from_shape_fn(256, |i| (i as f64 * 0.2).cos());
//! let bank = ScaleBank::new(1, 4, 64, std::f64::consts::TAU, 1.0, true)?;
//! let mut engine = CwtEngine::new(signal, bank)?;
//! engine.perform_transform();
//! let modulus = engine.compute_modulus()?;
//! // 4 octaves x 64 voices over 256 samples gives a square modulus field
//! let smoothed = gaussian_convolution(&modulus, 2.0)?;
//! assert_eq!(smoothed.dim(), (256, 256));
//! # Ok::<(), rust_cwt::Error>(())
//! ```

pub mod error;
pub mod cwt;
pub mod smoothing;

pub use error::{Error, Result};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn _rust_cwt(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // CWT
    m.add_function(wrap_pyfunction!(cwt::cwt_py, m)?)?;
    m.add_function(wrap_pyfunction!(cwt::cwt_modulus_py, m)?)?;
    m.add_function(wrap_pyfunction!(cwt::cwt_phase_py, m)?)?;

    // Smoothing
    m.add_function(wrap_pyfunction!(smoothing::gaussian_convolution_py, m)?)?;

    Ok(())
}
