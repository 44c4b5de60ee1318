//! Error types for pixmill-core.
//!
//! The [`Error`] enum covers the failure modes of building and addressing a
//! [`PixelBuffer`](crate::PixelBuffer) or a [`Mask`](crate::Mask):
//! bad shapes, mismatched operands and out-of-range coordinates.
//!
//! # Usage
//!
//! ```rust
//! use pixmill_core::{Error, Result};
//!
//! fn check(width: usize, height: usize) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_dimensions(width, height, "empty image"));
//!     }
//!     Ok(())
//! }
//! assert!(check(0, 4).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or addressing pixel buffers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sample address lies outside the buffer.
    #[error("sample (channel {channel}, row {row}, col {col}) out of bounds for {channels}x{width}x{height} buffer")]
    OutOfBounds {
        /// Channel index accessed
        channel: usize,
        /// Row accessed
        row: usize,
        /// Column accessed
        col: usize,
        /// Channel count of the buffer
        channels: usize,
        /// Buffer width
        width: usize,
        /// Buffer height
        height: usize,
    },

    /// Two operands that must share a shape do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First operand width
        a_width: usize,
        /// First operand height
        a_height: usize,
        /// Second operand width
        b_width: usize,
        /// Second operand height
        b_height: usize,
    },

    /// Channel count differs from what the operation needs.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: usize,
        /// Actual channel count
        got: usize,
    },

    /// Width, height or backing data length is unusable.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Why the shape was rejected
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error from `(width, height)` pairs.
    #[inline]
    pub fn dimension_mismatch(a: (usize, usize), b: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: usize, got: usize) -> Self {
        Self::ChannelMismatch { expected, got }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::dimension_mismatch((4, 4), (8, 2));
        let msg = err.to_string();
        assert!(msg.contains("4x4"));
        assert!(msg.contains("8x2"));
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::OutOfBounds {
            channel: 1,
            row: 9,
            col: 2,
            channels: 3,
            width: 4,
            height: 4,
        };
        assert!(err.to_string().contains("row 9"));
    }
}
