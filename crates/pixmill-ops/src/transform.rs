//! Geometric mirror transforms.
//!
//! # Operations
//!
//! - [`flip_h`] - Horizontal flip (mirror columns)
//! - [`flip_v`] - Vertical flip (mirror rows)
//! - [`flip`] - Dispatch on a [`FlipDirection`]
//!
//! # Example
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//! use pixmill_ops::transform::{flip, FlipDirection};
//!
//! let src = PixelBuffer::from_fn(3, 1, 3, |_, _, col| col as u8).unwrap();
//! let dir: FlipDirection = "horizontal".parse().unwrap();
//! let flipped = flip(&src, dir);
//! assert_eq!(flipped.plane(0), &[2, 1, 0]);
//! ```

use crate::OpsError;
use pixmill_core::PixelBuffer;
use std::fmt;
use std::str::FromStr;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    /// `col -> width - 1 - col`
    Horizontal,
    /// `row -> height - 1 - row`
    Vertical,
}

impl FromStr for FlipDirection {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown flip direction '{}' (expected horizontal or vertical)",
                other
            ))),
        }
    }
}

impl fmt::Display for FlipDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// Flips image horizontally (left-right mirror).
pub fn flip_h(src: &PixelBuffer) -> PixelBuffer {
    trace!(w = src.width(), h = src.height(), "flip_h");
    let width = src.width();
    let mut dst = src.clone();
    for c in 0..src.channels() {
        for row in dst.plane_mut(c).chunks_exact_mut(width) {
            row.reverse();
        }
    }
    dst
}

/// Flips image vertically (top-bottom mirror).
pub fn flip_v(src: &PixelBuffer) -> PixelBuffer {
    trace!(w = src.width(), h = src.height(), "flip_v");
    let (width, height) = src.dimensions();
    let mut dst = src.clone();
    for c in 0..src.channels() {
        let plane = src.plane(c);
        for (row, out) in dst.plane_mut(c).chunks_exact_mut(width).enumerate() {
            let from = (height - 1 - row) * width;
            out.copy_from_slice(&plane[from..from + width]);
        }
    }
    dst
}

/// Flips along `direction`.
pub fn flip(src: &PixelBuffer, direction: FlipDirection) -> PixelBuffer {
    match direction {
        FlipDirection::Horizontal => flip_h(src),
        FlipDirection::Vertical => flip_v(src),
    }
}
