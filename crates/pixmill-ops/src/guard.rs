//! Argument guards shared by the operations.
//!
//! Every operation validates its inputs up front, before it allocates a
//! destination buffer, so a rejected call leaves nothing half-built behind.
//!
//! # Example
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//! use pixmill_ops::guard::{ensure_in_range, ensure_rgb};
//!
//! let img = PixelBuffer::rgb(2, 2).unwrap();
//! assert!(ensure_rgb(&img, "sepia").is_ok());
//! assert!(ensure_in_range("delta", 300, -255, 255).is_err());
//! ```

use crate::{OpsError, OpsResult};
use pixmill_core::{Mask, PixelBuffer, RGB_CHANNELS};
use std::fmt::Display;

/// Fails with [`OpsError::Unsupported`] unless `buffer` has exactly three channels.
pub fn ensure_rgb(buffer: &PixelBuffer, op: &str) -> OpsResult<()> {
    if buffer.channels() != RGB_CHANNELS {
        return Err(OpsError::Unsupported(format!(
            "{} needs a {}-channel RGB buffer, got {} channel(s)",
            op,
            RGB_CHANNELS,
            buffer.channels()
        )));
    }
    Ok(())
}

/// Fails with [`OpsError::SizeMismatch`] if a mask is given and does not cover `buffer`.
pub fn ensure_mask(mask: Option<&Mask>, buffer: &PixelBuffer, op: &str) -> OpsResult<()> {
    if let Some(m) = mask {
        m.ensure_matches(buffer)
            .map_err(|e| OpsError::SizeMismatch(format!("{} mask: {}", op, e)))?;
    }
    Ok(())
}

/// Fails with [`OpsError::InvalidParameter`] unless `lo <= value <= hi`.
///
/// NaN is always rejected.
pub fn ensure_in_range<T>(name: &str, value: T, lo: T, hi: T) -> OpsResult<()>
where
    T: PartialOrd + Display + Copy,
{
    if !(value >= lo && value <= hi) {
        return Err(OpsError::InvalidParameter(format!(
            "{} must be between {} and {}, got {}",
            name, lo, hi, value
        )));
    }
    Ok(())
}
