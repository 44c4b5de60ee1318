//! Side-by-side before/after composites.

use crate::guard::ensure_in_range;
use crate::{OpsError, OpsResult};
use pixmill_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Column of the divider for a `width` wide image at `percentage`.
pub fn split_column(width: usize, percentage: f32) -> usize {
    (width as f32 * (percentage / 100.0)) as usize
}

/// Left of the split shows `filtered`, right shows `original`.
///
/// The divider column `floor(width * percentage / 100)` is black on every
/// channel. At 100% it falls just past the right edge.
///
/// ```rust
/// use pixmill_core::PixelBuffer;
/// use pixmill_ops::preview::split_preview;
///
/// let a = PixelBuffer::from_fn(4, 1, 3, |_, _, _| 10).unwrap();
/// let b = PixelBuffer::from_fn(4, 1, 3, |_, _, _| 200).unwrap();
/// let out = split_preview(&a, &b, 50.0).unwrap();
/// assert_eq!(out.plane(0), &[200, 200, 0, 10]);
/// ```
pub fn split_preview(original: &PixelBuffer, filtered: &PixelBuffer, percentage: f32) -> OpsResult<PixelBuffer> {
    trace!(percentage, w = original.width(), h = original.height(), "split_preview");
    ensure_in_range("split percentage", percentage, 0.0, 100.0)?;
    original
        .ensure_same_dimensions(filtered)
        .map_err(|e| OpsError::SizeMismatch(format!("split preview: {}", e)))?;
    original
        .ensure_channels(filtered.channels())
        .map_err(|e| OpsError::SizeMismatch(format!("split preview: {}", e)))?;

    let split = split_column(original.width(), percentage);
    debug!(split, "split column");
    Ok(PixelBuffer::from_fn(original.width(), original.height(), original.channels(), |c, row, col| {
        if col == split {
            0
        } else if col < split {
            filtered.get(c, row, col)
        } else {
            original.get(c, row, col)
        }
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::sepia;
    use crate::fixtures::rgb_4x4;

    #[test]
    fn test_split_column() {
        assert_eq!(split_column(10, 0.0), 0);
        assert_eq!(split_column(10, 55.0), 5);
        assert_eq!(split_column(10, 100.0), 10);
    }

    #[test]
    fn test_split_regions() {
        let img = rgb_4x4();
        let filtered = sepia(&img, None).unwrap();
        let out = split_preview(&img, &filtered, 50.0).unwrap();
        for c in 0..3 {
            for row in 0..4 {
                assert_eq!(out.get(c, row, 0), filtered.get(c, row, 0));
                assert_eq!(out.get(c, row, 1), filtered.get(c, row, 1));
                assert_eq!(out.get(c, row, 2), 0);
                assert_eq!(out.get(c, row, 3), img.get(c, row, 3));
            }
        }
    }

    #[test]
    fn test_split_extremes() {
        let img = rgb_4x4();
        let filtered = PixelBuffer::from_fn(4, 4, 3, |_, _, _| 77).unwrap();
        let zero = split_preview(&img, &filtered, 0.0).unwrap();
        assert!((0..4).all(|row| zero.get(1, row, 0) == 0));
        assert_eq!(zero.get(1, 0, 1), img.get(1, 0, 1));
        assert_eq!(split_preview(&img, &filtered, 100.0).unwrap(), filtered);
    }

    #[test]
    fn test_split_rejects() {
        let img = rgb_4x4();
        assert!(matches!(split_preview(&img, &img, 101.0), Err(OpsError::InvalidParameter(_))));
        let small = PixelBuffer::rgb(2, 2).unwrap();
        assert!(matches!(split_preview(&img, &small, 50.0), Err(OpsError::SizeMismatch(_))));
    }
}
