//! Monochrome error-diffusion dithering.
//!
//! The red channel is used as intensity. Each pixel is quantized to 0 or 255
//! in raster order and the quantization error is pushed onto unvisited
//! neighbours according to a [`DiffusionKernel`]. The result is written to
//! all three channels.
//!
//! # Example
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//! use pixmill_ops::dither::dither;
//!
//! let img = PixelBuffer::from_fn(4, 2, 3, |_, _, _| 128).unwrap();
//! let out = dither(&img).unwrap();
//! assert_eq!(out.plane(0), &[255, 0, 255, 0, 0, 255, 0, 255]);
//! ```

use crate::component::channel_component;
use crate::OpsResult;
use pixmill_core::{PixelBuffer, RGB_CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`; a neighbour receives
/// `error * weight / divisor` with truncating integer division.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionKernel {
    /// (dx, dy, weight) entries, `dy >= 0`.
    pub entries: &'static [(i32, i32, i32)],
    /// Divisor applied to every weighted error.
    pub divisor: i32,
}

/// Floyd-Steinberg kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: DiffusionKernel = DiffusionKernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

/// Nearer of 0 and 255; ties go to 0.
#[inline]
fn quantize(v: i32) -> i32 {
    if v.abs() <= (v - 255).abs() { 0 } else { 255 }
}

/// Dithers with an arbitrary kernel.
pub fn dither_with_kernel(src: &PixelBuffer, kernel: &DiffusionKernel) -> OpsResult<PixelBuffer> {
    let (width, height) = src.dimensions();
    trace!(width, height, taps = kernel.entries.len(), "dither");

    let intensity = channel_component(src, None, 0)?;
    let mut scratch: Vec<i32> = intensity.plane(0).iter().map(|&v| v as i32).collect();
    let mut out = Vec::with_capacity(width * height);

    for row in 0..height {
        for col in 0..width {
            let old = scratch[row * width + col];
            let new = quantize(old);
            out.push(new as u8);
            let err = old - new;

            for &(dx, dy, weight) in kernel.entries {
                let x = col as i64 + dx as i64;
                let y = row as i64 + dy as i64;
                if x < 0 || x >= width as i64 || y >= height as i64 {
                    continue;
                }
                scratch[y as usize * width + x as usize] += weight * err / kernel.divisor;
            }
        }
    }

    Ok(PixelBuffer::from_planes(width, height, vec![out; RGB_CHANNELS])?)
}

/// Floyd-Steinberg dither.
pub fn dither(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    dither_with_kernel(src, &FLOYD_STEINBERG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::rgb_4x4;

    #[test]
    fn test_quantize_tie_goes_dark() {
        assert_eq!(quantize(127), 0);
        assert_eq!(quantize(128), 255);
        assert_eq!(quantize(-40), 0);
        assert_eq!(quantize(300), 255);
    }

    #[test]
    fn test_fixture_red_channel() {
        let out = dither(&rgb_4x4()).unwrap();
        assert_eq!(
            out.plane(0),
            &[0, 0, 255, 255, 0, 255, 0, 255, 255, 255, 255, 0, 255, 255, 0, 0]
        );
    }

    #[test]
    fn test_monochrome_invariant() {
        let img = PixelBuffer::from_fn(9, 7, 3, |c, row, col| ((c * 50 + row * 29 + col * 13) % 256) as u8).unwrap();
        let out = dither(&img).unwrap();
        assert_eq!(out.plane(0), out.plane(1));
        assert_eq!(out.plane(1), out.plane(2));
        assert!(out.plane(0).iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_ignores_green_and_blue() {
        let a = PixelBuffer::from_fn(5, 5, 3, |c, row, col| if c == 0 { (row * 50 + col) as u8 } else { 0 }).unwrap();
        let b = PixelBuffer::from_fn(5, 5, 3, |c, row, col| if c == 0 { (row * 50 + col) as u8 } else { 255 }).unwrap();
        assert_eq!(dither(&a).unwrap(), dither(&b).unwrap());
    }
}
