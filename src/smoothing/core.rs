//! Separable Gaussian convolution of square 2D fields
//!
//! Each pass evaluates one output cell at a time with [`process_point`].
//! Taps that fall outside the field are dropped and the remaining taps are
//! not rescaled, so cells near the border lose some intensity.

use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix2, Zip};

use super::kernel::build_normalized_1d_kernel;
use crate::error::{Error, Result};

/// Evaluate one output sample of a 1-axis convolution.
///
/// Sums `kernel[t] * field[x + dt, y]` (axis 0) or `kernel[t] * field[x, y + dt]`
/// (axis 1), with `dt = t - kernel_len / 2`, over the in-bounds taps only.
///
/// # Errors
/// * `OutOfRange` if `(x, y)` is not a valid index into `field`
/// * `InvalidArgument` if `axis` is not 0 or 1
/// * `ShapeMismatch` if `kernel` is not a single column
pub fn process_point<S, K>(
    field: &ArrayBase<S, Ix2>,
    x: usize,
    y: usize,
    kernel: &ArrayBase<K, Ix2>,
    axis: usize,
) -> Result<f64>
where
    S: Data<Elem = f64>,
    K: Data<Elem = f64>,
{
    let (rows, cols) = field.dim();
    if x >= rows || y >= cols {
        return Err(Error::OutOfRange { x, y, rows, cols });
    }
    if axis > 1 {
        return Err(Error::invalid("axis", axis));
    }
    if kernel.ncols() != 1 {
        return Err(Error::ShapeMismatch(format!(
            "kernel must be a single column, got shape {:?}",
            kernel.shape()
        )));
    }

    Ok(convolve_point(field.view(), x, y, kernel.view(), axis))
}

/// Unchecked core of [`process_point`]; `(x, y)` must be in bounds.
fn convolve_point(
    field: ArrayView2<f64>,
    x: usize,
    y: usize,
    kernel: ArrayView2<f64>,
    axis: usize,
) -> f64 {
    let (rows, cols) = field.dim();
    let (pos, limit) = if axis == 0 { (x, rows) } else { (y, cols) };
    let center = kernel.nrows() / 2;

    let mut acc = 0.0;
    for (t, &weight) in kernel.column(0).iter().enumerate() {
        // target = pos + t - center, skipped when it leaves [0, limit)
        let target = match (pos + t).checked_sub(center) {
            Some(target) if target < limit => target,
            _ => continue,
        };
        let value = if axis == 0 {
            field[[target, y]]
        } else {
            field[[x, target]]
        };
        acc += weight * value;
    }
    acc
}

/// Blur a square field with an isotropic Gaussian of the given deviation.
///
/// Runs a full pass along axis 0 into an intermediate field, then a pass along
/// axis 1 over that intermediate. Cells within each pass are computed in
/// parallel.
///
/// # Errors
/// * `ShapeMismatch` if the field is not square
/// * `InvalidArgument` if `deviation` is not strictly positive and finite, or
///   so large that its kernel cannot be allocated
pub fn gaussian_convolution<S>(field: &ArrayBase<S, Ix2>, deviation: f64) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    let (rows, cols) = field.dim();
    if rows != cols {
        return Err(Error::ShapeMismatch(format!(
            "gaussian convolution needs a square field, got {}x{}",
            rows, cols
        )));
    }

    let kernel = build_normalized_1d_kernel(deviation, None)?;
    log::debug!(
        "gaussian convolution: {}x{} field, deviation {}, kernel size {}",
        rows,
        cols,
        deviation,
        kernel.nrows()
    );

    let intermediate = convolve_pass(field.view(), kernel.view(), 0);
    Ok(convolve_pass(intermediate.view(), kernel.view(), 1))
}

fn convolve_pass(field: ArrayView2<f64>, kernel: ArrayView2<f64>, axis: usize) -> Array2<f64> {
    let mut out = Array2::zeros(field.dim());
    Zip::indexed(&mut out).par_for_each(|(x, y), cell| {
        *cell = convolve_point(field, x, y, kernel, axis);
    });
    out
}
