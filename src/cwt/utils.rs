//! Utility functions for CWT
//!
//! Signal/kernel correlation (FFT and direct), FFT sizing, and dB conversion.

use ndarray::{Array1, Array2, ArrayView1};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Correlation method used for each scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CwtMethod {
    /// Zero-padded FFT correlation (fast for large signals)
    #[default]
    Fft,
    /// Direct summation (simple but slower)
    Conv,
}

/// Compute next power of 2 (for FFT optimization)
pub fn next_fast_len(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Kernel window that can touch an output sample of a length-`signal_len` signal.
///
/// Lags beyond `signal_len - 1` on either side never overlap the signal, so
/// they are cropped before correlating. Returns `(start, len)` into the kernel.
pub fn effective_window(kernel_len: usize, signal_len: usize) -> (usize, usize) {
    let center = kernel_len / 2;
    let half = center.min(signal_len.saturating_sub(1));
    (center - half, 2 * half + 1)
}

/// Direct correlation of a real signal against a centred complex kernel.
///
/// ```text
/// out[n] = sum_t signal[n + t] * conj(kernel[c + t]),  c = kernel.len() / 2
/// ```
/// Samples outside the signal contribute nothing. The output has the signal's
/// length.
pub fn correlate_direct(signal: ArrayView1<f64>, kernel: ArrayView1<Complex64>) -> Array1<Complex64> {
    let n = signal.len();
    let m = kernel.len();
    let c = m / 2;

    Array1::from_shape_fn(n, |i| {
        let mut sum = Complex64::new(0.0, 0.0);
        for (j, k) in kernel.iter().enumerate() {
            // signal index i + j - c
            let idx = i + j;
            if idx < c || idx - c >= n {
                continue;
            }
            sum += k.conj() * signal[idx - c];
        }
        sum
    })
}

/// Forward/inverse plans plus the signal spectrum for one FFT size
struct SizedPlan {
    fft: Arc<dyn Fft<f64>>,
    ifft: Arc<dyn Fft<f64>>,
    signal_spectrum: Vec<Complex64>,
}

impl SizedPlan {
    fn new(signal: ArrayView1<f64>, size: usize, planner: &mut FftPlanner<f64>) -> Self {
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        let mut signal_spectrum: Vec<Complex64> =
            signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        signal_spectrum.resize(size, Complex64::new(0.0, 0.0));
        fft.process(&mut signal_spectrum);

        Self {
            fft,
            ifft,
            signal_spectrum,
        }
    }
}

/// FFT correlator for one signal.
///
/// Plans and the zero-padded signal spectrum are computed once per FFT size,
/// then shared read-only across scales (and threads).
pub struct FftCorrelator {
    signal: Array1<f64>,
    plans: HashMap<usize, SizedPlan>,
}

impl FftCorrelator {
    /// Prepare plans for every kernel length in `kernel_lens` (after cropping
    /// with [`effective_window`]).
    pub fn new(signal: ArrayView1<f64>, kernel_lens: impl IntoIterator<Item = usize>) -> Self {
        let n = signal.len();
        let sizes: HashSet<usize> = kernel_lens
            .into_iter()
            .map(|m| next_fast_len(n + m.max(1) - 1))
            .collect();

        let mut planner = FftPlanner::new();
        let plans = sizes
            .into_iter()
            .map(|size| (size, SizedPlan::new(signal, size, &mut planner)))
            .collect();

        Self {
            signal: signal.to_owned(),
            plans,
        }
    }

    /// Number of distinct FFT sizes prepared
    pub fn num_plans(&self) -> usize {
        self.plans.len()
    }

    /// Correlate the prepared signal against a centred kernel.
    ///
    /// Same contract as [`correlate_direct`]. The kernel is cropped with
    /// [`effective_window`] first.
    ///
    /// # Algorithm
    /// 1. Reverse and conjugate the kernel
    /// 2. Linear convolution with the signal via zero-padded FFT
    /// 3. Keep samples `c .. c + n` of the full convolution
    pub fn correlate(&self, kernel: ArrayView1<Complex64>) -> Array1<Complex64> {
        let n = self.signal.len();
        let (start, m) = effective_window(kernel.len(), n);
        let c = m / 2;
        let size = next_fast_len(n + m - 1);

        let on_demand;
        let plan = match self.plans.get(&size) {
            Some(plan) => plan,
            None => {
                // Fallback: size was not prepared, plan it for this call only
                log::trace!("fft plan for size {} not cached", size);
                on_demand = SizedPlan::new(self.signal.view(), size, &mut FftPlanner::new());
                &on_demand
            }
        };

        let mut spectrum: Vec<Complex64> = (0..m)
            .rev()
            .map(|j| kernel[start + j].conj())
            .collect();
        spectrum.resize(size, Complex64::new(0.0, 0.0));
        plan.fft.process(&mut spectrum);

        for (s, x) in spectrum.iter_mut().zip(plan.signal_spectrum.iter()) {
            *s *= x;
        }
        plan.ifft.process(&mut spectrum);

        let norm = 1.0 / size as f64;
        spectrum[c..c + n].iter().map(|&v| v * norm).collect()
    }
}

/// Convert a non-negative magnitude field to dB scale
///
/// dB = 20 * log10(value + epsilon)
pub fn to_db(magnitude: &Array2<f64>, epsilon: f64) -> Array2<f64> {
    magnitude.mapv(|v| 20.0 * (v + epsilon).log10())
}
