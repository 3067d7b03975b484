//! # CWT (Continuous Wavelet Transform) Module
//!
//! Octave/voice Morlet CWT of a real signal with FFT-based correlation.
//! The result is stored as a row-interleaved real/imaginary field from which
//! split, modulus and phase views are derived.

pub mod wavelets;
pub mod utils;
pub mod core;
#[cfg(feature = "python")]
pub mod ffi;

// Re-export main types
pub use self::core::{CwtComponent, CwtEngine, CwtField, SplitField};
pub use utils::{to_db, CwtMethod};
pub use wavelets::{generate, kernel_for_scale, kernel_window, morlet_kernel, ScaleBank, WaveletKernel};
#[cfg(feature = "python")]
pub use ffi::{cwt_modulus_py, cwt_phase_py, cwt_py};
