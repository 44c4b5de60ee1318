//! Lossy compression with the Haar wavelet.
//!
//! Each channel is padded with zeros to a power-of-two square, transformed
//! with an iterative 2D Haar transform, thresholded, transformed back and
//! cropped. The compression percentage picks the threshold from the sorted
//! set of distinct rounded coefficients: 0 keeps everything, 100 keeps only
//! the largest.
//!
//! # Operations
//!
//! - [`haar1d`] / [`inverse_haar1d`] - One average/difference step on a vector
//! - [`haar2d`] / [`inverse_haar2d`] - Full multi-level transform of a square grid
//! - [`threshold_2d`] / [`threshold_1d`] - Coefficient culling
//! - [`compress`] - Whole-image compression
//! - [`compress_signal`] - Same pipeline on a 1D signal
//!
//! # Threshold rules
//!
//! The grid threshold drops coefficients whose rounded value is strictly
//! below the threshold. The vector threshold drops those at or below it.
//!
//! # Example
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//! use pixmill_ops::wavelet::compress;
//!
//! let img = PixelBuffer::from_fn(8, 8, 3, |c, row, col| (c * 40 + row * 8 + col) as u8).unwrap();
//! assert_eq!(compress(&img, 0.0).unwrap(), img);
//! ```

use crate::guard::{ensure_in_range, ensure_rgb};
use crate::{OpsError, OpsResult};
use pixmill_core::{round_half_up, PixelBuffer};
use std::f64::consts::SQRT_2;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Side of the zero-padded square for a `width` x `height` channel.
pub fn padded_size(width: usize, height: usize) -> usize {
    width.max(height).next_power_of_two().max(2)
}

/// Padded length for a 1D signal.
pub fn padded_len(len: usize) -> usize {
    len.next_power_of_two().max(2)
}

fn haar_step(data: &mut [f64], scratch: &mut Vec<f64>) {
    let n = data.len();
    let mid = n / 2;
    scratch.clear();
    scratch.resize(n, 0.0);
    for k in 0..mid {
        let (a, b) = (data[2 * k], data[2 * k + 1]);
        scratch[k] = (a + b) / SQRT_2;
        scratch[mid + k] = (a - b) / SQRT_2;
    }
    data.copy_from_slice(scratch);
}

fn inverse_haar_step(data: &mut [f64], scratch: &mut Vec<f64>) {
    let n = data.len();
    let mid = n / 2;
    scratch.clear();
    scratch.resize(n, 0.0);
    for k in 0..mid {
        let (avg, diff) = (data[k], data[mid + k]);
        scratch[2 * k] = (avg + diff) / SQRT_2;
        scratch[2 * k + 1] = (avg - diff) / SQRT_2;
    }
    data.copy_from_slice(scratch);
}

/// One Haar step: pair averages in the first half, differences in the second.
///
/// The input is zero-padded to [`padded_len`] first.
///
/// ```rust
/// use pixmill_ops::wavelet::{haar1d, inverse_haar1d};
///
/// let t = haar1d(&[1.0, 3.0]);
/// assert!((t[0] - 4.0 / 2f64.sqrt()).abs() < 1e-12);
/// let back = inverse_haar1d(&t);
/// assert!((back[1] - 3.0).abs() < 1e-12);
/// ```
pub fn haar1d(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.resize(padded_len(data.len()), 0.0);
    haar_step(&mut out, &mut Vec::new());
    out
}

/// Inverse of [`haar1d`].
pub fn inverse_haar1d(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.resize(padded_len(data.len()), 0.0);
    inverse_haar_step(&mut out, &mut Vec::new());
    out
}

fn transform_rows(grid: &mut [f64], n: usize, c: usize, scratch: &mut Vec<f64>, inverse: bool) {
    for row in grid.chunks_exact_mut(n).take(c) {
        if inverse {
            inverse_haar_step(&mut row[..c], scratch);
        } else {
            haar_step(&mut row[..c], scratch);
        }
    }
}

fn transform_cols(grid: &mut [f64], n: usize, c: usize, scratch: &mut Vec<f64>, inverse: bool) {
    let mut column = vec![0.0; c];
    for col in 0..c {
        for (i, v) in column.iter_mut().enumerate() {
            *v = grid[i * n + col];
        }
        if inverse {
            inverse_haar_step(&mut column, scratch);
        } else {
            haar_step(&mut column, scratch);
        }
        for (i, v) in column.iter().enumerate() {
            grid[i * n + col] = *v;
        }
    }
}

/// Forward multi-level 2D transform of an `n` x `n` row-major grid, in place.
///
/// While the active size `c > 1`: transform the first `c` entries of each of
/// the first `c` rows, then of each of the first `c` columns, then halve `c`.
///
/// # Panics
///
/// Panics if `grid.len() != n * n` or `n` is not a power of two.
pub fn haar2d(grid: &mut [f64], n: usize) {
    assert_eq!(grid.len(), n * n, "grid must be n x n");
    assert!(n.is_power_of_two(), "grid side must be a power of two");
    let mut scratch = Vec::with_capacity(n);
    let mut c = n;
    while c > 1 {
        transform_rows(grid, n, c, &mut scratch, false);
        transform_cols(grid, n, c, &mut scratch, false);
        c /= 2;
    }
}

/// Inverse of [`haar2d`]: block size doubles from 2, columns before rows.
///
/// # Panics
///
/// Panics if `grid.len() != n * n` or `n` is not a power of two.
pub fn inverse_haar2d(grid: &mut [f64], n: usize) {
    assert_eq!(grid.len(), n * n, "grid must be n x n");
    assert!(n.is_power_of_two(), "grid side must be a power of two");
    let mut scratch = Vec::with_capacity(n);
    let mut c = 2;
    while c <= n {
        transform_cols(grid, n, c, &mut scratch, true);
        transform_rows(grid, n, c, &mut scratch, true);
        c *= 2;
    }
}

/// Threshold for `percentage` from the distinct rounded values in `coeffs`.
///
/// Values are the signed rounded coefficients, sorted ascending; the pick is
/// at `max(floor(count * percentage / 100) - 1, 0)`.
pub fn threshold_value(coeffs: &[f64], percentage: f64) -> i64 {
    let mut distinct: Vec<i64> = coeffs.iter().map(|&v| round_half_up(v)).collect();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.is_empty() {
        return 0;
    }
    let idx = ((distinct.len() as f64 * (percentage / 100.0)) as i64 - 1).max(0) as usize;
    distinct[idx.min(distinct.len() - 1)]
}

/// Zeroes grid coefficients whose rounded value is below the threshold.
///
/// Returns the threshold used.
pub fn threshold_2d(coeffs: &mut [f64], percentage: f64) -> i64 {
    let t = threshold_value(coeffs, percentage);
    for v in coeffs.iter_mut() {
        if round_half_up(*v) < t {
            *v = 0.0;
        }
    }
    t
}

/// Zeroes vector coefficients whose rounded value is at or below the threshold.
///
/// Returns the threshold used.
pub fn threshold_1d(coeffs: &mut [f64], percentage: f64) -> i64 {
    let t = threshold_value(coeffs, percentage);
    for v in coeffs.iter_mut() {
        if round_half_up(*v) <= t {
            *v = 0.0;
        }
    }
    t
}

/// Compresses one `width` x `height` channel plane.
///
/// Results are rounded and clamped into `[0, max(plane)]`.
pub fn compress_channel(plane: &[u8], width: usize, height: usize, percentage: f64) -> Vec<u8> {
    let n = padded_size(width, height);
    let ceiling = plane.iter().copied().max().unwrap_or(0) as i64;

    let mut grid = vec![0.0; n * n];
    for (row, src_row) in plane.chunks_exact(width).enumerate() {
        for (col, &v) in src_row.iter().enumerate() {
            grid[row * n + col] = v as f64;
        }
    }

    haar2d(&mut grid, n);
    let t = threshold_2d(&mut grid, percentage);
    debug!(n, threshold = t, ceiling, "wavelet channel");
    inverse_haar2d(&mut grid, n);

    let mut out = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            out.push(round_half_up(grid[row * n + col]).clamp(0, ceiling) as u8);
        }
    }
    out
}

/// Compresses every channel of `src` by `percentage` in `[0, 100]`.
pub fn compress(src: &PixelBuffer, percentage: f64) -> OpsResult<PixelBuffer> {
    trace!(percentage, w = src.width(), h = src.height(), "compress");
    ensure_in_range("compression percentage", percentage, 0.0, 100.0)?;
    ensure_rgb(src, "compress")?;
    let (width, height) = src.dimensions();
    let planes = (0..src.channels())
        .map(|c| compress_channel(src.plane(c), width, height, percentage))
        .collect();
    Ok(PixelBuffer::from_planes(width, height, planes)?)
}

/// Compresses a 1D signal with the vector threshold rule.
///
/// The signal is padded to [`padded_len`], transformed level by level,
/// thresholded with [`threshold_1d`], inverted and cropped back.
pub fn compress_signal(data: &[f64], percentage: f64) -> OpsResult<Vec<f64>> {
    trace!(percentage, len = data.len(), "compress_signal");
    ensure_in_range("compression percentage", percentage, 0.0, 100.0)?;
    if data.is_empty() {
        return Err(OpsError::InvalidParameter("signal must not be empty".into()));
    }
    let n = padded_len(data.len());
    let mut coeffs = data.to_vec();
    coeffs.resize(n, 0.0);
    let mut scratch = Vec::with_capacity(n);

    let mut c = n;
    while c > 1 {
        haar_step(&mut coeffs[..c], &mut scratch);
        c /= 2;
    }
    let t = threshold_1d(&mut coeffs, percentage);
    debug!(n, threshold = t, "wavelet signal");
    let mut c = 2;
    while c <= n {
        inverse_haar_step(&mut coeffs[..c], &mut scratch);
        c *= 2;
    }
    coeffs.truncate(data.len());
    Ok(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{grid, rgb_4x4};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_padding_sizes() {
        assert_eq!(padded_size(1, 1), 2);
        assert_eq!(padded_size(4, 4), 4);
        assert_eq!(padded_size(5, 3), 8);
        assert_eq!(padded_len(3), 4);
        assert_eq!(haar1d(&[1.0, 2.0, 3.0]).len(), 4);
    }

    #[test]
    fn test_haar1d_pairs() {
        let t = haar1d(&[4.0, 2.0, 5.0, 5.0]);
        assert_abs_diff_eq!(t[0], 6.0 / SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(t[1], 10.0 / SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(t[2], 2.0 / SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(t[3], 0.0, epsilon = 1e-12);
        let back = inverse_haar1d(&t);
        for (a, b) in back.iter().zip([4.0, 2.0, 5.0, 5.0]) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_haar2d_inverse() {
        let n = 8;
        let orig: Vec<f64> = (0..n * n).map(|i| ((i * 37) % 251) as f64).collect();
        let mut g = orig.clone();
        haar2d(&mut g, n);
        // DC term: sum / n
        assert_abs_diff_eq!(g[0], orig.iter().sum::<f64>() / n as f64, epsilon = 1e-9);
        inverse_haar2d(&mut g, n);
        for (a, b) in g.iter().zip(&orig) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_threshold_rules_differ() {
        let coeffs = [-1.4, 0.4, 2.6, 5.0];
        // distinct rounded values: [-1, 0, 3, 5], pick index 1 -> 0
        let mut grid_rule = coeffs;
        assert_eq!(threshold_2d(&mut grid_rule, 50.0), 0);
        assert_eq!(grid_rule, [0.0, 0.4, 2.6, 5.0]);

        let mut vec_rule = coeffs;
        assert_eq!(threshold_1d(&mut vec_rule, 50.0), 0);
        assert_eq!(vec_rule, [0.0, 0.0, 2.6, 5.0]);
    }

    #[test]
    fn test_threshold_uses_signed_values() {
        // magnitudes would pick 1 here, signed values pick -3
        let mut coeffs = [-3.0, -1.0, 1.0, 2.0, 3.0];
        assert_eq!(threshold_2d(&mut coeffs, 20.0), -3);
        assert_eq!(coeffs, [-3.0, -1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_compress_zero_is_lossless() {
        let img = rgb_4x4();
        assert_eq!(compress(&img, 0.0).unwrap(), img);
    }

    #[test]
    fn test_compress_80_fixture() {
        let out = compress(&rgb_4x4(), 80.0).unwrap();
        assert_eq!(out, grid([
            [[132, 132, 132, 132], [132, 132, 132, 132], [132, 132, 255, 52], [132, 132, 52, 116]],
            [[215, 215, 128, 64], [152, 152, 64, 0], [128, 64, 184, 184], [64, 0, 184, 184]],
            [[168, 168, 232, 136], [168, 168, 136, 40], [232, 136, 104, 104], [136, 40, 104, 104]],
        ]));
    }

    #[test]
    fn test_compress_100_flattens() {
        let out = compress(&rgb_4x4(), 100.0).unwrap();
        for (c, level) in [132u8, 124, 136].into_iter().enumerate() {
            assert!(out.plane(c).iter().all(|&v| v == level), "channel {}", c);
        }
    }

    #[test]
    fn test_compress_clamps_to_channel_max() {
        let img = PixelBuffer::from_fn(3, 3, 3, |_, row, col| if (row, col) == (1, 1) { 100 } else { 0 }).unwrap();
        let out = compress(&img, 90.0).unwrap();
        assert!(out.plane(0).iter().all(|&v| v <= 100));
    }

    #[test]
    fn test_compress_rejects_percentage() {
        let img = rgb_4x4();
        assert!(matches!(compress(&img, -0.5), Err(OpsError::InvalidParameter(_))));
        assert!(matches!(compress(&img, 100.1), Err(OpsError::InvalidParameter(_))));
        assert!(compress(&img, f64::NAN).is_err());
    }

    #[test]
    fn test_compress_signal() {
        let signal = [10.0, 12.0, 14.0, 16.0, 9.0];
        // even at 0% the vector rule drops the smallest coefficient (-4)
        let out = compress_signal(&signal, 0.0).unwrap();
        assert_eq!(out.len(), 5);
        for (a, b) in out.iter().zip([12.0, 14.0, 12.0, 14.0, 9.0]) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-9);
        }
        // the vector rule drops the largest coefficient too
        let flat = compress_signal(&signal, 100.0).unwrap();
        assert!(flat.iter().all(|&v| v == 0.0));
        assert!(compress_signal(&[], 10.0).is_err());
    }
}
