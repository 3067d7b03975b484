//! # Gaussian Smoothing Module
//!
//! Separable Gaussian blur for square 2D scalar fields, e.g. a CWT modulus
//! field. Kernels are sampled from the continuous Gaussian and normalized to
//! unit sum; border taps are truncated without renormalization.

pub mod kernel;
pub mod core;
#[cfg(feature = "python")]
pub mod ffi;

pub use self::core::{gaussian_convolution, process_point};
pub use kernel::{build_1d_kernel, build_normalized_1d_kernel, normalize};
#[cfg(feature = "python")]
pub use ffi::gaussian_convolution_py;
