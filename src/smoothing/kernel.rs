//! Gaussian sample kernels
//!
//! Kernels are column-shaped `(size, 1)` arrays so they can be fed through
//! the same matrix normalization as any other 2D field.

use ndarray::{Array, Array2, ArrayBase, Data, Dimension};
use std::f64::consts::PI;
use std::mem;

use crate::error::{Error, Result};

/// Largest number of `f64` taps a single kernel allocation can hold
pub const MAX_KERNEL_LEN: usize = isize::MAX as usize / mem::size_of::<f64>();

/// Default kernel size for a deviation: `2 * ceil(3 * sigma) + 1`.
///
/// `None` if the deviation is not finite or the size exceeds [`MAX_KERNEL_LEN`].
pub fn default_kernel_size(deviation: f64) -> Option<usize> {
    let half = (3.0 * deviation).ceil();
    if !(half.is_finite() && half >= 0.0 && half <= MAX_KERNEL_LEN as f64) {
        return None;
    }
    (half as usize)
        .checked_mul(2)?
        .checked_add(1)
        .filter(|&size| size <= MAX_KERNEL_LEN)
}

/// Sample a 1D Gaussian into a `(size, 1)` column.
///
/// Entry `i` is `1 / (sqrt(2*pi) * sigma) * exp(-(i - size/2)^2 / (2 * sigma^2))`,
/// with `size / 2` rounded down. Entries are not normalized to unit sum;
/// see [`build_normalized_1d_kernel`] for that.
///
/// # Errors
/// `InvalidArgument` if `deviation` is not strictly positive and finite, if its
/// default size cannot be allocated, or if `size` is zero, even or larger than
/// [`MAX_KERNEL_LEN`].
pub fn build_1d_kernel(deviation: f64, size: Option<usize>) -> Result<Array2<f64>> {
    if !(deviation.is_finite() && deviation > 0.0) {
        return Err(Error::invalid("deviation", deviation));
    }
    let size = match size {
        Some(size) => size,
        None => default_kernel_size(deviation)
            .ok_or_else(|| Error::invalid("deviation", deviation))?,
    };
    if size == 0 || size % 2 == 0 || size > MAX_KERNEL_LEN {
        return Err(Error::invalid("size", size));
    }

    let center = (size / 2) as f64;
    let amplitude = 1.0 / ((2.0 * PI).sqrt() * deviation);
    let denom = 2.0 * deviation * deviation;

    Ok(Array2::from_shape_fn((size, 1), |(i, _)| {
        let d = i as f64 - center;
        amplitude * (-(d * d) / denom).exp()
    }))
}

/// Divide every entry by the sum of all entries.
///
/// Works for arrays of any dimensionality. Pairwise ratios between entries are
/// preserved up to rounding.
///
/// # Errors
/// `DegenerateInput` if the entries sum to zero.
pub fn normalize<S, D>(matrix: &ArrayBase<S, D>) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let total = matrix.sum();
    if total == 0.0 {
        return Err(Error::DegenerateInput(format!(
            "cannot normalize a matrix of shape {:?} whose entries sum to zero",
            matrix.shape()
        )));
    }
    Ok(matrix.mapv(|v| v / total))
}

/// [`build_1d_kernel`] followed by [`normalize`].
pub fn build_normalized_1d_kernel(deviation: f64, size: Option<usize>) -> Result<Array2<f64>> {
    let kernel = build_1d_kernel(deviation, size)?;
    normalize(&kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr2;

    #[test]
    fn test_default_size_matches_explicit() {
        let deviation_kernel = build_1d_kernel(1.0, None).unwrap();
        let explicit_kernel = build_1d_kernel(1.0, Some(7)).unwrap();

        assert_eq!(deviation_kernel.shape(), &[7, 1]);
        assert_eq!(deviation_kernel, explicit_kernel);
    }

    #[test]
    fn test_kernel_reference_points() {
        let kernel = build_1d_kernel(1.0, None).unwrap();
        let expected = |i: i32| {
            let d = (i - 3) as f64;
            1.0 / (2.0 * PI).sqrt() * (-(d * d) / 2.0).exp()
        };

        assert_relative_eq!(kernel[[1, 0]], expected(1), epsilon = 1e-15);
        assert_relative_eq!(kernel[[5, 0]], expected(5), epsilon = 1e-15);
        assert_relative_eq!(kernel[[3, 0]], 1.0 / (2.0 * PI).sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_kernel_is_symmetric() {
        let kernel = build_1d_kernel(2.5, None).unwrap();
        let n = kernel.nrows();
        assert_eq!(n, 17);
        for i in 0..n / 2 {
            assert_relative_eq!(kernel[[i, 0]], kernel[[n - 1 - i, 0]], epsilon = 1e-15);
        }
    }

    #[test]
    fn test_kernel_invalid_arguments() {
        assert!(matches!(
            build_1d_kernel(0.0, None),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            build_1d_kernel(-1.0, None),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            build_1d_kernel(f64::NAN, None),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            build_1d_kernel(1.0, Some(0)),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            build_1d_kernel(1.0, Some(6)),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_default_kernel_size() {
        assert_eq!(default_kernel_size(1.0), Some(7));
        assert_eq!(default_kernel_size(2.5), Some(17));
        assert_eq!(default_kernel_size(f64::INFINITY), None);
        assert_eq!(default_kernel_size(f64::NAN), None);
        assert_eq!(default_kernel_size(1e300), None);
        assert_eq!(default_kernel_size(MAX_KERNEL_LEN as f64), None);
    }

    #[test]
    fn test_huge_deviation_is_rejected() {
        for deviation in [1e19, 1e300, f64::MAX] {
            assert!(matches!(
                build_1d_kernel(deviation, None),
                Err(Error::InvalidArgument { .. })
            ));
            assert!(matches!(
                build_normalized_1d_kernel(deviation, None),
                Err(Error::InvalidArgument { .. })
            ));
        }
        assert!(matches!(
            build_1d_kernel(1.0, Some(usize::MAX)),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_size_one_kernel() {
        let kernel = build_1d_kernel(0.5, Some(1)).unwrap();
        assert_eq!(kernel.shape(), &[1, 1]);
        assert_relative_eq!(kernel[[0, 0]], 1.0 / ((2.0 * PI).sqrt() * 0.5), epsilon = 1e-15);
    }

    #[test]
    fn test_normalize_preserves_ratios() {
        let matrix = arr2(&[[5.0, 7.0, 9.0], [3.0, 4.0, 7.0], [5.0, 6.0, 7.0]]);
        let normalized = normalize(&matrix).unwrap();

        assert_relative_eq!(
            normalized[[0, 2]] / normalized[[1, 2]],
            matrix[[0, 2]] / matrix[[1, 2]],
            epsilon = 1e-3
        );
        assert_relative_eq!(
            normalized[[1, 2]] / normalized[[2, 2]],
            matrix[[1, 2]] / matrix[[2, 2]],
            epsilon = 1e-3
        );
        assert_relative_eq!(normalized.sum(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_normalize_zero_sum() {
        let matrix = arr2(&[[1.0, -1.0], [2.0, -2.0]]);
        assert!(matches!(normalize(&matrix), Err(Error::DegenerateInput(_))));
    }

    #[test]
    fn test_normalized_kernel_sums_to_one() {
        let kernel = build_normalized_1d_kernel(1.7, None).unwrap();
        assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-12);
    }
}
