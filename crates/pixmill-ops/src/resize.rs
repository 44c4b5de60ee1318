//! Bilinear downscaling.
//!
//! Target pixel `(row, col)` maps to source coordinates
//! `x = col * src_w / dst_w`, `y = row * src_h / dst_h` in `f32`. The four
//! neighbours are blended horizontally, truncated, then blended vertically
//! and truncated again.
//!
//! # Example
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//! use pixmill_ops::resize::downscale;
//!
//! let src = PixelBuffer::from_fn(4, 4, 3, |_, row, col| (row * 4 + col) as u8).unwrap();
//! let dst = downscale(&src, 2, 2).unwrap();
//! assert_eq!(dst.plane(0), &[0, 2, 8, 10]);
//! ```

use crate::guard::ensure_rgb;
use crate::{OpsError, OpsResult};
use pixmill_core::{clamp_u8, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Shrinks `src` to `dst_w` x `dst_h`.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if a target dimension is 0 or larger than
/// the source. Equal dimensions are accepted.
pub fn downscale(src: &PixelBuffer, dst_w: usize, dst_h: usize) -> OpsResult<PixelBuffer> {
    let (src_w, src_h) = src.dimensions();
    trace!(src_w, src_h, dst_w, dst_h, "downscale");
    ensure_rgb(src, "downscale")?;
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "target size must be positive, got {}x{}",
            dst_w, dst_h
        )));
    }
    if dst_w > src_w || dst_h > src_h {
        return Err(OpsError::InvalidParameter(format!(
            "target {}x{} exceeds source {}x{}",
            dst_w, dst_h, src_w, src_h
        )));
    }

    Ok(PixelBuffer::from_fn(dst_w, dst_h, src.channels(), |c, row, col| {
        let x = col as f32 * src_w as f32 / dst_w as f32;
        let y = row as f32 * src_h as f32 / dst_h as f32;

        let x1 = x.floor() as usize;
        let y1 = y.floor() as usize;
        let x2 = (x.ceil() as usize).min(src_w - 1);
        let y2 = (y.ceil() as usize).min(src_h - 1);

        let a = src.get(c, y1, x1) as f32;
        let b = src.get(c, y1, x2) as f32;
        let cc = src.get(c, y2, x1) as f32;
        let d = src.get(c, y2, x2) as f32;

        let dx = x - x1 as f32;
        let dy = y - y1 as f32;

        let m = ((1.0 - dx) * a + dx * b) as i32;
        let n = ((1.0 - dx) * cc + dx * d) as i32;
        let v = ((1.0 - dy) * m as f32 + dy * n as f32) as i32;
        clamp_u8(v as i64)
    })?)
}
