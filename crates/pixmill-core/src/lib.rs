//! # pixmill-core
//!
//! Core types for raster image editing.
//!
//! This crate provides the foundational types used throughout pixmill:
//!
//! - [`PixelBuffer`] - Multi-channel 8-bit pixel store with fixed shape
//! - [`Mask`] - Boolean "operate here" map with its own dimensions
//! - [`Error`] / [`Result`] - Buffer construction and access errors
//! - [`pixel`] - Luma and sepia coefficients, rounding and clamping helpers
//!
//! ## Design Philosophy
//!
//! Buffers are built once and read afterwards. Operations in `pixmill-ops`
//! never mutate their source; they assemble a fresh destination buffer and
//! hand it back only when every channel has been produced:
//!
//! ```
//! use pixmill_core::PixelBuffer;
//!
//! let src = PixelBuffer::from_fn(4, 2, 3, |c, row, col| (c * 10 + row * 4 + col) as u8).unwrap();
//! let inverted = PixelBuffer::from_fn(src.width(), src.height(), src.channels(), |c, row, col| {
//!     255 - src.get(c, row, col)
//! })
//! .unwrap();
//! assert_eq!(inverted.get(0, 0, 0), 255);
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! pixmill-core (this crate)
//!    ^
//!    |
//!    +-- pixmill-ops (filters, tone, wavelet, dither, resample)
//!    +-- pixmill-io (PPM / PNG / JPEG codecs)
//!    +-- pixmill-cli (registry + command dispatch)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod mask;
pub mod pixel;

pub use buffer::{PixelBuffer, RGB_CHANNELS};
pub use error::{Error, Result};
pub use mask::Mask;
pub use pixel::{clamp_u8, round_half_up, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R, SEPIA};

/// Prelude module for convenient imports.
///
/// ```
/// use pixmill_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{PixelBuffer, RGB_CHANNELS};
    pub use crate::error::{Error, Result};
    pub use crate::mask::Mask;
}
