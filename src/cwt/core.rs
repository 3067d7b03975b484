//! Core CWT engine
//!
//! Correlates a real signal against every kernel of a scale bank and keeps the
//! result as a row-interleaved real/imaginary field.

use ndarray::{s, Array1, Array2, ArrayView1};
use num_complex::Complex64;
use rayon::prelude::*;
use std::time::Instant;

use super::utils::{correlate_direct, CwtMethod, FftCorrelator};
use super::wavelets::{kernel_window, ScaleBank};
use crate::error::{Error, Result};

/// Which part of the transform to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CwtComponent {
    Real,
    Imaginary,
    Both,
}

/// Transform output of shape `(2 * total_scales, signal_len)`.
///
/// Row `2k` holds the real part and row `2k + 1` the imaginary part of scale `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct CwtField {
    data: Array2<f64>,
}

impl CwtField {
    /// Interleave per-scale complex rows into a field.
    fn from_rows(rows: &[Array1<Complex64>], signal_len: usize) -> Self {
        let mut data = Array2::zeros((2 * rows.len(), signal_len));
        for (k, row) in rows.iter().enumerate() {
            data.row_mut(2 * k).assign(&row.mapv(|c| c.re));
            data.row_mut(2 * k + 1).assign(&row.mapv(|c| c.im));
        }
        Self { data }
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    pub fn total_scales(&self) -> usize {
        self.data.nrows() / 2
    }

    /// Signal length (number of columns)
    pub fn len(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn real_row(&self, k: usize) -> ArrayView1<'_, f64> {
        self.data.row(2 * k)
    }

    pub fn imag_row(&self, k: usize) -> ArrayView1<'_, f64> {
        self.data.row(2 * k + 1)
    }

    /// `(real, imaginary)` at scale `k`, sample `n`
    fn pair(&self, k: usize, n: usize) -> (f64, f64) {
        (self.data[[2 * k, n]], self.data[[2 * k + 1, n]])
    }

    /// Build a `(total_scales, len)` array from each `(real, imaginary)` pair.
    fn map_pairs(&self, f: impl Fn(f64, f64) -> f64) -> Array2<f64> {
        Array2::from_shape_fn((self.total_scales(), self.len()), |(k, n)| {
            let (re, im) = self.pair(k, n);
            f(re, im)
        })
    }
}

/// De-interleaved transform output
///
/// Only the arrays requested through [`CwtComponent`] are present.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitField {
    pub real: Option<Array2<f64>>,
    pub imaginary: Option<Array2<f64>>,
}

/// Continuous wavelet transform of one signal over one scale bank.
///
/// Construction records the parameters only; [`CwtEngine::perform_transform`]
/// computes and stores the field. Derived views fail with [`Error::NotReady`]
/// until then.
#[derive(Debug, Clone)]
pub struct CwtEngine {
    signal: Array1<f64>,
    bank: ScaleBank,
    method: CwtMethod,
    field: Option<CwtField>,
}

impl CwtEngine {
    /// # Errors
    /// `InvalidArgument` if the signal is empty.
    pub fn new(signal: Array1<f64>, bank: ScaleBank) -> Result<Self> {
        if signal.is_empty() {
            return Err(Error::invalid("signal length", 0));
        }
        Ok(Self {
            signal,
            bank,
            method: CwtMethod::default(),
            field: None,
        })
    }

    /// Choose how each scale is correlated (FFT by default).
    pub fn with_method(mut self, method: CwtMethod) -> Self {
        self.method = method;
        self
    }

    pub fn signal(&self) -> &Array1<f64> {
        &self.signal
    }

    pub fn scale_bank(&self) -> &ScaleBank {
        &self.bank
    }

    pub fn method(&self) -> CwtMethod {
        self.method
    }

    pub fn is_ready(&self) -> bool {
        self.field.is_some()
    }

    /// Stored field, if a transform has been performed
    pub fn field(&self) -> Option<&CwtField> {
        self.field.as_ref()
    }

    /// Stored field as a raw `(2 * total_scales, signal_len)` array
    pub fn output(&self) -> Option<&Array2<f64>> {
        self.field.as_ref().map(CwtField::as_array)
    }

    fn ready_field(&self) -> Result<&CwtField> {
        self.field.as_ref().ok_or(Error::NotReady)
    }

    /// Compute the transform and replace the stored field.
    ///
    /// # Algorithm
    /// 1. Sample the Morlet kernel of each scale, limited to lags within
    ///    `signal_len - 1` of the centre (farther taps never meet the signal)
    /// 2. Correlate the signal against it (FFT or direct), one scale per task
    /// 3. Interleave real/imaginary parts into rows `2k` / `2k + 1`
    ///
    /// Scales run in parallel on the rayon pool; the call returns once every
    /// row pair is written.
    pub fn perform_transform(&mut self) -> &CwtField {
        let n_scales = self.bank.total_scales();
        let n = self.signal.len();
        let started = Instant::now();
        log::debug!(
            "CWT: {} scales ({} octaves x {} voices) over {} samples, method {:?}",
            n_scales,
            self.bank.num_octaves(),
            self.bank.voices_per_octave(),
            n,
            self.method
        );

        let max_half = n - 1;
        let correlator = match self.method {
            CwtMethod::Fft => {
                let bank = &self.bank;
                let lens = (0..n_scales).map(|k| 2 * bank.half_width(k).min(max_half) + 1);
                let correlator = FftCorrelator::new(self.signal.view(), lens);
                log::trace!("CWT: prepared {} fft plans", correlator.num_plans());
                Some(correlator)
            }
            CwtMethod::Conv => None,
        };

        let bank = &self.bank;
        let signal = self.signal.view();
        let rows: Vec<Array1<Complex64>> = (0..n_scales)
            .into_par_iter()
            .map(|k| {
                let kernel = kernel_window(bank, k, max_half);
                log::trace!("CWT: scale {}/{} ({:.4})", k + 1, n_scales, kernel.scale);
                match &correlator {
                    Some(fft) => fft.correlate(kernel.coefficients.view()),
                    None => correlate_direct(signal, kernel.coefficients.view()),
                }
            })
            .collect();

        let field = self.field.insert(CwtField::from_rows(&rows, n));
        log::debug!("CWT: finished in {:?}", started.elapsed());
        field
    }

    /// Split the stored field into `(total_scales, signal_len)` arrays.
    ///
    /// Values are copied verbatim: `real[k, n] == field[2k, n]` and
    /// `imaginary[k, n] == field[2k + 1, n]`.
    ///
    /// # Errors
    /// `NotReady` if no transform has been performed.
    pub fn split_real_and_imaginary(&self, component: CwtComponent) -> Result<SplitField> {
        let field = self.ready_field()?.as_array();
        let real = || field.slice(s![0..;2, ..]).to_owned();
        let imaginary = || field.slice(s![1..;2, ..]).to_owned();

        Ok(match component {
            CwtComponent::Real => SplitField {
                real: Some(real()),
                imaginary: None,
            },
            CwtComponent::Imaginary => SplitField {
                real: None,
                imaginary: Some(imaginary()),
            },
            CwtComponent::Both => SplitField {
                real: Some(real()),
                imaginary: Some(imaginary()),
            },
        })
    }

    /// `sqrt(re^2 + im^2)` at every (scale, sample).
    ///
    /// # Errors
    /// `NotReady` if no transform has been performed.
    pub fn compute_modulus(&self) -> Result<Array2<f64>> {
        let field = self.ready_field()?;
        Ok(field.map_pairs(|re, im| (re * re + im * im).sqrt()))
    }

    /// `atan(im / re)` at every (scale, sample).
    ///
    /// This is the single-quadrant arctangent: values lie in `[-pi/2, pi/2]`
    /// and the sign of the real part is discarded. A zero coefficient gives NaN.
    ///
    /// # Errors
    /// `NotReady` if no transform has been performed.
    pub fn compute_phase(&self) -> Result<Array2<f64>> {
        let field = self.ready_field()?;
        Ok(field.map_pairs(|re, im| (im / re).atan()))
    }
}
