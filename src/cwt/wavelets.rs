//! Wavelet family generation
//!
//! Builds one sampled complex Morlet kernel per scale of an octave/voice
//! scale bank.

use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::PI;
use std::mem;

use crate::error::{Error, Result};

/// Kernel half-width in units of the scaled envelope deviation
const SUPPORT_DEVIATIONS: f64 = 3.0;

/// Largest half-width whose `2L + 1` complex taps fit in one allocation
pub const MAX_HALF_WIDTH: usize = (isize::MAX as usize / mem::size_of::<Complex64>() - 1) / 2;

/// Octave/voice scale bank parameters
///
/// Fields are validated once in [`ScaleBank::new`], including that the kernel
/// of the coarsest scale has a representable length.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBank {
    start_octave: u32,
    num_octaves: u32,
    voices_per_octave: u32,
    center_frequency: f64,
    shape_factor: f64,
    normalize: bool,
}

impl ScaleBank {
    /// Create a validated scale bank.
    ///
    /// # Errors
    /// `InvalidArgument` if `num_octaves` or `voices_per_octave` is zero, if
    /// `center_frequency` / `shape_factor` is not strictly positive and finite,
    /// or if the coarsest kernel length does not fit in memory addressing.
    pub fn new(
        start_octave: u32,
        num_octaves: u32,
        voices_per_octave: u32,
        center_frequency: f64,
        shape_factor: f64,
        normalize: bool,
    ) -> Result<Self> {
        if num_octaves == 0 {
            return Err(Error::invalid("num_octaves", num_octaves));
        }
        if voices_per_octave == 0 {
            return Err(Error::invalid("voices_per_octave", voices_per_octave));
        }
        if !(center_frequency.is_finite() && center_frequency > 0.0) {
            return Err(Error::invalid("center_frequency", center_frequency));
        }
        if !(shape_factor.is_finite() && shape_factor > 0.0) {
            return Err(Error::invalid("shape_factor", shape_factor));
        }

        let bank = Self {
            start_octave,
            num_octaves,
            voices_per_octave,
            center_frequency,
            shape_factor,
            normalize,
        };
        let coarsest = bank.scale(bank.total_scales() - 1);
        if kernel_half_width(coarsest, shape_factor).is_none() {
            let top_octave = start_octave as u64 + num_octaves as u64;
            return Err(Error::invalid(
                "start_octave + num_octaves",
                format!("{} (scale {:e} is too wide to sample)", top_octave, coarsest),
            ));
        }
        Ok(bank)
    }

    pub fn start_octave(&self) -> u32 {
        self.start_octave
    }

    pub fn num_octaves(&self) -> u32 {
        self.num_octaves
    }

    pub fn voices_per_octave(&self) -> u32 {
        self.voices_per_octave
    }

    /// Carrier angular frequency of the mother wavelet (rad per unit lag)
    pub fn center_frequency(&self) -> f64 {
        self.center_frequency
    }

    /// Gaussian envelope deviation of the mother wavelet
    pub fn shape_factor(&self) -> f64 {
        self.shape_factor
    }

    /// Whether every kernel is scaled to unit energy
    pub fn normalize(&self) -> bool {
        self.normalize
    }

    /// Number of scales, `num_octaves * voices_per_octave`
    pub fn total_scales(&self) -> usize {
        self.num_octaves as usize * self.voices_per_octave as usize
    }

    /// Dilation of scale index `k` (octave-major, voice-minor)
    pub fn scale(&self, k: usize) -> f64 {
        let voices = self.voices_per_octave as usize;
        let octave = self.start_octave as f64 + (k / voices) as f64;
        let voice = (k % voices) as f64 / voices as f64;
        2f64.powf(octave + voice)
    }

    /// All dilations in ascending order
    pub fn scales(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.total_scales(), |k| self.scale(k))
    }

    /// Centre frequency of each scale in cycles per unit time.
    ///
    /// frequency = center_frequency / (2 * pi * scale * sampling_period)
    pub fn frequencies(&self, sampling_period: f64) -> Array1<f64> {
        let base = self.center_frequency / (2.0 * PI * sampling_period);
        self.scales().mapv(|s| base / s)
    }

    /// Half-width of the full kernel at scale index `k`
    pub fn half_width(&self, k: usize) -> usize {
        // representable for every k, checked against the coarsest scale in `new`
        kernel_half_width(self.scale(k), self.shape_factor).unwrap_or(MAX_HALF_WIDTH)
    }

    fn morlet(&self, k: usize) -> Morlet {
        Morlet::new(self.scale(k), self.center_frequency, self.shape_factor)
    }
}

/// Sampled wavelet at one scale, centred at `coefficients.len() / 2`
#[derive(Debug, Clone)]
pub struct WaveletKernel {
    pub scale: f64,
    pub coefficients: Array1<Complex64>,
}

impl WaveletKernel {
    /// Index of the zero-lag sample
    pub fn center(&self) -> usize {
        self.coefficients.len() / 2
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

/// Half-width `L = ceil(3 * shape_factor * scale)` of the kernel sampled at
/// `scale`, or `None` when `2L + 1` taps cannot be allocated.
pub fn kernel_half_width(scale: f64, shape_factor: f64) -> Option<usize> {
    let half = (SUPPORT_DEVIATIONS * shape_factor * scale).ceil();
    if half.is_finite() && half >= 0.0 && half <= MAX_HALF_WIDTH as f64 {
        Some(half as usize)
    } else {
        None
    }
}

/// Complex Morlet dilated by one scale
struct Morlet {
    scale: f64,
    w0: f64,
    denom: f64,
    correction: f64,
}

impl Morlet {
    fn new(scale: f64, center_frequency: f64, shape_factor: f64) -> Self {
        let w0 = center_frequency;
        Self {
            scale,
            w0,
            denom: 2.0 * shape_factor * shape_factor,
            correction: (-(w0 * w0) * shape_factor * shape_factor / 2.0).exp(),
        }
    }

    /// Value at integer lag `t`, with the `1 / scale` amplitude
    fn sample(&self, t: f64) -> Complex64 {
        let tau = t / self.scale;
        let envelope = (-(tau * tau) / self.denom).exp() / self.scale;
        (Complex64::from_polar(1.0, self.w0 * tau) - self.correction) * envelope
    }

    /// Energy of the full kernel over lags `[-half, half]`, without storing it.
    ///
    /// |psi(t)| is even in `t`.
    fn energy(&self, half: usize) -> f64 {
        let tail: f64 = (1..=half).map(|t| self.sample(t as f64).norm_sqr()).sum();
        self.sample(0.0).norm_sqr() + 2.0 * tail
    }

    /// Sample lags `[-window, window]` of the kernel whose support is
    /// `[-half, half]`; `normalize` scales by the energy of the full support.
    fn window(&self, half: usize, window: usize, normalize: bool) -> WaveletKernel {
        let window = window.min(half);
        let gain = if normalize {
            let energy = self.energy(half);
            if energy > 0.0 {
                1.0 / energy.sqrt()
            } else {
                1.0
            }
        } else {
            1.0
        };

        let coefficients = Array1::from_shape_fn(2 * window + 1, |i| {
            self.sample(i as f64 - window as f64) * gain
        });

        WaveletKernel {
            scale: self.scale,
            coefficients,
        }
    }
}

/// Sample a complex Morlet wavelet dilated by `scale`.
///
/// # Formula
/// For integer lag `t` in `[-L, L]`, `L = ceil(3 * sigma * scale)`,
/// `tau = t / scale`:
/// ```text
/// psi(t) = (exp(i*w0*tau) - exp(-w0^2*sigma^2/2)) * exp(-tau^2 / (2*sigma^2)) / scale
/// ```
/// where `w0 = center_frequency` and `sigma = shape_factor`. The constant term
/// keeps the wavelet zero-mean. With `normalize`, the samples are rescaled to
/// unit energy instead of the `1 / scale` amplitude.
///
/// # Errors
/// `InvalidArgument` if `scale` is not strictly positive and finite, or if the
/// kernel is too long to allocate.
pub fn morlet_kernel(
    scale: f64,
    center_frequency: f64,
    shape_factor: f64,
    normalize: bool,
) -> Result<WaveletKernel> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(Error::invalid("scale", scale));
    }
    let half =
        kernel_half_width(scale, shape_factor).ok_or_else(|| Error::invalid("scale", scale))?;
    Ok(Morlet::new(scale, center_frequency, shape_factor).window(half, half, normalize))
}

/// Full kernel for scale index `k` of `bank`
pub fn kernel_for_scale(bank: &ScaleBank, k: usize) -> WaveletKernel {
    let half = bank.half_width(k);
    bank.morlet(k).window(half, half, bank.normalize)
}

/// Central lags `[-max_half, max_half]` of the kernel for scale index `k`.
///
/// Samples match [`kernel_for_scale`] on those lags, including the
/// unit-energy scaling, but only `2 * min(L, max_half) + 1` taps are stored.
pub fn kernel_window(bank: &ScaleBank, k: usize, max_half: usize) -> WaveletKernel {
    bank.morlet(k).window(bank.half_width(k), max_half, bank.normalize)
}

/// Generate every kernel of the bank, octave-major and voice-minor.
pub fn generate(bank: &ScaleBank) -> Vec<WaveletKernel> {
    (0..bank.total_scales())
        .map(|k| kernel_for_scale(bank, k))
        .collect()
}
