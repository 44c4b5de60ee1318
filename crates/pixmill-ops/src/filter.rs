//! Image filtering and convolution operations.
//!
//! # Kernels
//!
//! - [`Kernel::blur`] - 3x3 Gaussian-like blur
//! - [`Kernel::sharpen`] - 5x5 sharpen (positive inner ring, negative outer ring)
//!
//! # Borders
//!
//! Pixels closer than the kernel radius to any edge are copied from the
//! source unchanged. No edge extension or wrapping takes place.
//!
//! # Example
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//! use pixmill_ops::filter::{convolve, Kernel};
//!
//! let src = PixelBuffer::from_fn(8, 8, 3, |_, _, _| 100).unwrap();
//! let blurred = convolve(&src, None, &Kernel::blur()).unwrap();
//! assert_eq!(blurred.get(0, 4, 4), 100);
//! ```

use crate::guard::ensure_mask;
use crate::{OpsError, OpsResult};
use pixmill_core::mask::included;
use pixmill_core::{clamp_u8, round_half_up, Mask, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Convolution kernel for image filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights, row-major.
    pub data: Vec<f64>,
    /// Kernel width (must be odd).
    pub width: usize,
    /// Kernel height (must be odd).
    pub height: usize,
}

impl Kernel {
    /// Creates a new kernel from data.
    ///
    /// Width and height must be odd numbers.
    pub fn new(data: Vec<f64>, width: usize, height: usize) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidParameter("kernel dimensions must be odd".into()));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    /// 3x3 blur: 1/4 centre, 1/8 edges, 1/16 corners.
    ///
    /// ```rust
    /// use pixmill_ops::filter::Kernel;
    ///
    /// let k = Kernel::blur();
    /// assert_eq!(k.radius(), (1, 1));
    /// assert_eq!(k.data.iter().sum::<f64>(), 1.0);
    /// ```
    pub fn blur() -> Self {
        #[rustfmt::skip]
        let data = vec![
            0.0625, 0.125, 0.0625,
            0.125,  0.25,  0.125,
            0.0625, 0.125, 0.0625,
        ];
        Self { data, width: 3, height: 3 }
    }

    /// 5x5 sharpen: 1.0 centre, 1/4 on the inner ring, -1/8 on the outer ring.
    pub fn sharpen() -> Self {
        let mut data = Vec::with_capacity(25);
        for ky in 0..5i32 {
            for kx in 0..5i32 {
                let ring = (ky - 2).abs().max((kx - 2).abs());
                data.push(match ring {
                    0 => 1.0,
                    1 => 0.25,
                    _ => -0.125,
                });
            }
        }
        Self { data, width: 5, height: 5 }
    }

    /// Returns kernel radius (half-width, half-height).
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

/// Applies a 2D convolution to every channel.
///
/// Interior pixels get `round_half_up(sum)` clamped to `[0, 255]`. Border
/// pixels and pixels excluded by `mask` keep their source value.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] if `mask` does not cover `src`.
pub fn convolve(src: &PixelBuffer, mask: Option<&Mask>, kernel: &Kernel) -> OpsResult<PixelBuffer> {
    let (width, height) = src.dimensions();
    trace!(width, height, kernel_w = kernel.width, kernel_h = kernel.height, masked = mask.is_some(), "convolve");
    ensure_mask(mask, src, "convolve")?;

    let (rx, ry) = kernel.radius();
    let interior = |row: usize, col: usize| row >= ry && row + ry < height && col >= rx && col + rx < width;

    Ok(PixelBuffer::from_fn(width, height, src.channels(), |c, row, col| {
        if !interior(row, col) || !included(mask, row, col) {
            return src.get(c, row, col);
        }
        let mut sum = 0.0;
        for ky in 0..kernel.height {
            for kx in 0..kernel.width {
                let sy = row + ky - ry;
                let sx = col + kx - rx;
                sum += src.get(c, sy, sx) as f64 * kernel.data[ky * kernel.width + kx];
            }
        }
        clamp_u8(round_half_up(sum))
    })?)
}

/// Blurs with [`Kernel::blur`].
pub fn blur(src: &PixelBuffer, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
    convolve(src, mask, &Kernel::blur())
}

/// Sharpens with [`Kernel::sharpen`].
pub fn sharpen(src: &PixelBuffer, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
    convolve(src, mask, &Kernel::sharpen())
}
