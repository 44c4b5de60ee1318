//! # pixmill-ops
//!
//! Pixel transforms and compression for 8-bit RGB buffers.
//!
//! Every operation is a pure function of its inputs: it reads one or more
//! source [`PixelBuffer`]s (plus an optional [`Mask`] and numeric
//! parameters), validates them, and returns a freshly built buffer.
//!
//! # Modules
//!
//! - [`component`] - Greyscale views, channel isolation, sepia, split/combine, brighten
//! - [`transform`] - Horizontal and vertical flips
//! - [`filter`] - Blur and sharpen convolution
//! - [`histogram`] - Histograms, peak alignment, histogram charts
//! - [`levels`] - Quadratic tone curve
//! - [`wavelet`] - Haar wavelet compression
//! - [`dither`] - Error-diffusion dithering
//! - [`resize`] - Bilinear downscale
//! - [`preview`] - Split before/after composites
//!
//! The [`BasicOps`] and [`ExtendedOps`] traits expose the same operations as
//! methods on [`PixelBuffer`].
//!
//! # Example
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//! use pixmill_ops::{BasicOps, ExtendedOps, FlipDirection};
//!
//! let img = PixelBuffer::from_fn(8, 8, 3, |c, row, col| (c * 60 + row * 8 + col) as u8).unwrap();
//! let out = img.brighten(20).unwrap().flip(FlipDirection::Vertical).blur(None).unwrap();
//! assert_eq!(out.dimensions(), (8, 8));
//! let small = out.downscale(4, 4).unwrap();
//! assert_eq!(small.width(), 4);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod component;
pub mod dither;
pub mod draw;
pub mod filter;
pub mod guard;
pub mod histogram;
pub mod levels;
pub mod preview;
pub mod resize;
pub mod transform;
pub mod wavelet;

pub use error::{OpsError, OpsResult};
pub use filter::Kernel;
pub use histogram::HistogramTable;
pub use levels::ToneCurve;
pub use transform::FlipDirection;

use pixmill_core::{Mask, PixelBuffer};

/// Per-pixel and geometric operations.
pub trait BasicOps {
    /// See [`component::channel_component`].
    fn channel_component(&self, mask: Option<&Mask>, channel: usize) -> OpsResult<PixelBuffer>;
    /// See [`component::value_component`].
    fn value_component(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer>;
    /// See [`component::intensity_component`].
    fn intensity_component(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer>;
    /// See [`component::luma_component`].
    fn luma_component(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer>;
    /// See [`component::sepia`].
    fn sepia(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer>;
    /// See [`component::rgb_split`].
    fn rgb_split(&self) -> OpsResult<[PixelBuffer; 3]>;
    /// See [`transform::flip`].
    fn flip(&self, direction: FlipDirection) -> PixelBuffer;
    /// See [`component::brighten`].
    fn brighten(&self, delta: i32) -> OpsResult<PixelBuffer>;
}

/// Filters, tone, compression and analysis.
pub trait ExtendedOps {
    /// See [`filter::blur`].
    fn blur(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer>;
    /// See [`filter::sharpen`].
    fn sharpen(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer>;
    /// See [`histogram::plot_histogram`].
    fn histogram(&self) -> OpsResult<PixelBuffer>;
    /// See [`histogram::color_correct`].
    fn color_correct(&self) -> OpsResult<PixelBuffer>;
    /// See [`levels::levels_adjust`].
    fn levels_adjust(&self, black: i32, mid: i32, white: i32) -> OpsResult<PixelBuffer>;
    /// See [`wavelet::compress`].
    fn compress(&self, percentage: f64) -> OpsResult<PixelBuffer>;
    /// See [`dither::dither`].
    fn dither(&self) -> OpsResult<PixelBuffer>;
    /// See [`resize::downscale`].
    fn downscale(&self, width: usize, height: usize) -> OpsResult<PixelBuffer>;
    /// See [`preview::split_preview`]; `self` is the original.
    fn split_preview(&self, filtered: &PixelBuffer, percentage: f32) -> OpsResult<PixelBuffer>;
}

impl BasicOps for PixelBuffer {
    fn channel_component(&self, mask: Option<&Mask>, channel: usize) -> OpsResult<PixelBuffer> {
        component::channel_component(self, mask, channel)
    }

    fn value_component(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
        component::value_component(self, mask)
    }

    fn intensity_component(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
        component::intensity_component(self, mask)
    }

    fn luma_component(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
        component::luma_component(self, mask)
    }

    fn sepia(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
        component::sepia(self, mask)
    }

    fn rgb_split(&self) -> OpsResult<[PixelBuffer; 3]> {
        component::rgb_split(self)
    }

    fn flip(&self, direction: FlipDirection) -> PixelBuffer {
        transform::flip(self, direction)
    }

    fn brighten(&self, delta: i32) -> OpsResult<PixelBuffer> {
        component::brighten(self, delta)
    }
}

impl ExtendedOps for PixelBuffer {
    fn blur(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
        filter::blur(self, mask)
    }

    fn sharpen(&self, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
        filter::sharpen(self, mask)
    }

    fn histogram(&self) -> OpsResult<PixelBuffer> {
        histogram::plot_histogram(self)
    }

    fn color_correct(&self) -> OpsResult<PixelBuffer> {
        histogram::color_correct(self)
    }

    fn levels_adjust(&self, black: i32, mid: i32, white: i32) -> OpsResult<PixelBuffer> {
        levels::levels_adjust(self, black, mid, white)
    }

    fn compress(&self, percentage: f64) -> OpsResult<PixelBuffer> {
        wavelet::compress(self, percentage)
    }

    fn dither(&self) -> OpsResult<PixelBuffer> {
        dither::dither(self)
    }

    fn downscale(&self, width: usize, height: usize) -> OpsResult<PixelBuffer> {
        resize::downscale(self, width, height)
    }

    fn split_preview(&self, filtered: &PixelBuffer, percentage: f32) -> OpsResult<PixelBuffer> {
        preview::split_preview(self, filtered, percentage)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{grid, rgb_4x4};

    #[test]
    fn test_traits_match_free_functions() {
        let img = rgb_4x4();
        assert_eq!(img.sepia(None).unwrap(), component::sepia(&img, None).unwrap());
        assert_eq!(img.flip(FlipDirection::Horizontal), transform::flip_h(&img));
        assert_eq!(img.dither().unwrap(), dither::dither(&img).unwrap());
        assert_eq!(img.downscale(2, 2).unwrap(), resize::downscale(&img, 2, 2).unwrap());
    }

    #[test]
    fn test_levels_then_compress_chain() {
        let out = rgb_4x4().levels_adjust(10, 20, 120).unwrap().compress(20.0).unwrap();
        let g = [[255, 255, 255, 255], [255, 255, 255, 0], [255, 255, 0, 255], [255, 0, 255, 255]];
        assert_eq!(out, grid([
            [[0, 255, 255, 255], [255, 255, 255, 255], [255, 255, 255, 0], [255, 255, 0, 255]],
            g,
            g,
        ]));
    }

    #[test]
    fn test_split_preview_of_blur() {
        let img = rgb_4x4();
        let blurred = img.blur(None).unwrap();
        let out = img.split_preview(&blurred, 25.0).unwrap();
        assert!((0..4).all(|row| out.get(0, row, 1) == 0));
        assert_eq!(out.get(2, 1, 2), img.get(2, 1, 2));
    }
}
