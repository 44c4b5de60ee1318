//! Per-pixel channel derivations.
//!
//! Greyscale views (value, intensity, luma), single-channel isolation, sepia,
//! RGB split/combine and brightness shifts. All functions read an RGB
//! [`PixelBuffer`] and return a new one.
//!
//! # Masks
//!
//! Masked variants only rewrite pixels the [`Mask`] includes. Excluded pixels
//! keep a fallback value: greyscale derivations replicate the source red
//! channel there, colour derivations keep each channel's own source value.
//!
//! # Example
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//! use pixmill_ops::component::{luma_component, value_component};
//!
//! let img = PixelBuffer::from_fn(1, 1, 3, |c, _, _| [200, 100, 50][c]).unwrap();
//! assert_eq!(value_component(&img, None).unwrap().get(2, 0, 0), 200);
//! assert_eq!(luma_component(&img, None).unwrap().get(0, 0, 0), 117);
//! ```

use crate::guard::{ensure_in_range, ensure_mask, ensure_rgb};
use crate::{OpsError, OpsResult};
use pixmill_core::mask::included;
use pixmill_core::{clamp_u8, Mask, PixelBuffer, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R, RGB_CHANNELS, SEPIA};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Builds an RGB destination pixel by pixel.
///
/// `apply` produces the pixel where the mask includes it, `keep` where it does not.
fn masked_map<F, G>(src: &PixelBuffer, mask: Option<&Mask>, op: &str, apply: F, keep: G) -> OpsResult<PixelBuffer>
where
    F: Fn(&PixelBuffer, usize, usize) -> [u8; 3],
    G: Fn(&PixelBuffer, usize, usize) -> [u8; 3],
{
    ensure_rgb(src, op)?;
    ensure_mask(mask, src, op)?;

    let (width, height) = src.dimensions();
    let mut planes = vec![Vec::with_capacity(width * height); RGB_CHANNELS];
    for row in 0..height {
        for col in 0..width {
            let px = if included(mask, row, col) {
                apply(src, row, col)
            } else {
                keep(src, row, col)
            };
            for (plane, v) in planes.iter_mut().zip(px) {
                plane.push(v);
            }
        }
    }
    Ok(PixelBuffer::from_planes(width, height, planes)?)
}

#[inline]
fn rgb_at(src: &PixelBuffer, row: usize, col: usize) -> [u8; 3] {
    [src.get(0, row, col), src.get(1, row, col), src.get(2, row, col)]
}

#[inline]
fn grey_from_red(src: &PixelBuffer, row: usize, col: usize) -> [u8; 3] {
    let r = src.get(0, row, col);
    [r, r, r]
}

/// Replicates source channel `channel` into all three output channels.
///
/// Pixels excluded by `mask` keep their own source values on every channel.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `channel` is not 0, 1 or 2.
pub fn channel_component(src: &PixelBuffer, mask: Option<&Mask>, channel: usize) -> OpsResult<PixelBuffer> {
    trace!(channel, w = src.width(), h = src.height(), masked = mask.is_some(), "channel_component");
    if channel >= RGB_CHANNELS {
        return Err(OpsError::InvalidParameter(format!(
            "channel index must be 0, 1 or 2, got {}",
            channel
        )));
    }
    masked_map(
        src,
        mask,
        "channel-component",
        |s, row, col| {
            let v = s.get(channel, row, col);
            [v, v, v]
        },
        rgb_at,
    )
}

/// Greyscale from `max(R, G, B)`.
pub fn value_component(src: &PixelBuffer, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
    trace!(w = src.width(), h = src.height(), masked = mask.is_some(), "value_component");
    masked_map(
        src,
        mask,
        "value-component",
        |s, row, col| {
            let [r, g, b] = rgb_at(s, row, col);
            let v = r.max(g).max(b);
            [v, v, v]
        },
        grey_from_red,
    )
}

/// Greyscale from `floor((R + G + B) / 3)`.
pub fn intensity_component(src: &PixelBuffer, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
    trace!(w = src.width(), h = src.height(), masked = mask.is_some(), "intensity_component");
    masked_map(
        src,
        mask,
        "intensity-component",
        |s, row, col| {
            let [r, g, b] = rgb_at(s, row, col);
            let v = ((r as u16 + g as u16 + b as u16) / 3) as u8;
            [v, v, v]
        },
        grey_from_red,
    )
}

/// Greyscale from Rec.709 luma, truncated toward zero.
pub fn luma_component(src: &PixelBuffer, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
    trace!(w = src.width(), h = src.height(), masked = mask.is_some(), "luma_component");
    masked_map(
        src,
        mask,
        "luma-component",
        |s, row, col| {
            let [r, g, b] = rgb_at(s, row, col);
            let y = REC709_LUMA_R * r as f64 + REC709_LUMA_G * g as f64 + REC709_LUMA_B * b as f64;
            let v = y as u8;
            [v, v, v]
        },
        grey_from_red,
    )
}

/// Sepia tone via the [`SEPIA`] matrix, each output truncated and clamped.
pub fn sepia(src: &PixelBuffer, mask: Option<&Mask>) -> OpsResult<PixelBuffer> {
    trace!(w = src.width(), h = src.height(), masked = mask.is_some(), "sepia");
    masked_map(
        src,
        mask,
        "sepia",
        |s, row, col| {
            let [r, g, b] = rgb_at(s, row, col);
            SEPIA.map(|w| clamp_u8((w[0] * r as f64 + w[1] * g as f64 + w[2] * b as f64) as i64))
        },
        rgb_at,
    )
}

/// Splits into red, green and blue greyscale buffers.
pub fn rgb_split(src: &PixelBuffer) -> OpsResult<[PixelBuffer; 3]> {
    trace!(w = src.width(), h = src.height(), "rgb_split");
    Ok([
        channel_component(src, None, 0)?,
        channel_component(src, None, 1)?,
        channel_component(src, None, 2)?,
    ])
}

/// Assembles an RGB buffer from channel 0 of three inputs.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] unless all three inputs share width and height.
pub fn rgb_combine(red: &PixelBuffer, green: &PixelBuffer, blue: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(w = red.width(), h = red.height(), "rgb_combine");
    for (name, other) in [("green", green), ("blue", blue)] {
        red.ensure_same_dimensions(other)
            .map_err(|e| OpsError::SizeMismatch(format!("rgb-combine {} input: {}", name, e)))?;
    }
    let (width, height) = red.dimensions();
    let planes = vec![red.plane(0).to_vec(), green.plane(0).to_vec(), blue.plane(0).to_vec()];
    Ok(PixelBuffer::from_planes(width, height, planes)?)
}

/// Adds `delta` to every sample, clamping the result.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `delta` is outside `[-255, 255]`.
pub fn brighten(src: &PixelBuffer, delta: i32) -> OpsResult<PixelBuffer> {
    trace!(delta, w = src.width(), h = src.height(), "brighten");
    ensure_in_range("brighten delta", delta, -255, 255)?;
    Ok(PixelBuffer::from_fn(src.width(), src.height(), src.channels(), |c, row, col| {
        clamp_u8(src.get(c, row, col) as i64 + delta as i64)
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::rgb_4x4;

    fn single(r: u8, g: u8, b: u8) -> PixelBuffer {
        PixelBuffer::from_fn(1, 1, 3, |c, _, _| [r, g, b][c]).unwrap()
    }

    #[test]
    fn test_channel_component_replicates() {
        let img = rgb_4x4();
        for k in 0..3 {
            let out = channel_component(&img, None, k).unwrap();
            for c in 0..3 {
                assert_eq!(out.plane(c), img.plane(k));
            }
        }
    }

    #[test]
    fn test_channel_component_bad_index() {
        assert!(matches!(
            channel_component(&rgb_4x4(), None, 3),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_channel_component_mask_keeps_own_channels() {
        let img = rgb_4x4();
        let mut flags = vec![true; 16];
        flags[0] = false;
        let mask = Mask::new(4, 4, flags).unwrap();
        let out = channel_component(&img, Some(&mask), 2).unwrap();
        // excluded pixel (0,0) keeps R=0, G=255, B=64
        assert_eq!([out.get(0, 0, 0), out.get(1, 0, 0), out.get(2, 0, 0)], [0, 255, 64]);
        // included pixel (0,1) takes blue=128 everywhere
        assert_eq!([out.get(0, 0, 1), out.get(1, 0, 1), out.get(2, 0, 1)], [128, 128, 128]);
    }

    #[test]
    fn test_value_intensity_luma() {
        let img = single(10, 200, 30);
        assert_eq!(value_component(&img, None).unwrap().plane(1), &[200]);
        assert_eq!(intensity_component(&img, None).unwrap().plane(2), &[80]);
        // 0.2126*10 + 0.7152*200 + 0.0722*30 = 147.37
        assert_eq!(luma_component(&img, None).unwrap().plane(0), &[147]);
        // the weights sum to just under 1.0 in f64
        let white = single(255, 255, 255);
        assert_eq!(luma_component(&white, None).unwrap().plane(0), &[254]);
    }

    #[test]
    fn test_greyscale_mask_fallback_is_red() {
        let img = single(10, 200, 30);
        let mask = Mask::new(1, 1, vec![false]).unwrap();
        let out = value_component(&img, Some(&mask)).unwrap();
        for c in 0..3 {
            assert_eq!(out.get(c, 0, 0), 10);
        }
    }

    #[test]
    fn test_sepia_values_and_clamp() {
        let out = sepia(&single(100, 100, 100), None).unwrap();
        // 135.1, 120.3, 93.7
        assert_eq!([out.get(0, 0, 0), out.get(1, 0, 0), out.get(2, 0, 0)], [135, 120, 93]);
        let out = sepia(&single(255, 255, 255), None).unwrap();
        assert_eq!([out.get(0, 0, 0), out.get(1, 0, 0), out.get(2, 0, 0)], [255, 255, 238]);
    }

    #[test]
    fn test_sepia_mask_excluded_untouched() {
        let img = single(100, 100, 100);
        let mask = Mask::new(1, 1, vec![false]).unwrap();
        assert_eq!(sepia(&img, Some(&mask)).unwrap(), img);
    }

    #[test]
    fn test_mask_size_mismatch() {
        let mask = Mask::all(2, 2).unwrap();
        assert!(matches!(
            sepia(&rgb_4x4(), Some(&mask)),
            Err(OpsError::SizeMismatch(_))
        ));
    }

    #[test]
    fn test_split_combine_roundtrip() {
        let img = rgb_4x4();
        let [r, g, b] = rgb_split(&img).unwrap();
        assert_eq!(rgb_combine(&r, &g, &b).unwrap(), img);
    }

    #[test]
    fn test_combine_size_mismatch() {
        let a = PixelBuffer::rgb(2, 2).unwrap();
        let b = PixelBuffer::rgb(3, 2).unwrap();
        assert!(matches!(rgb_combine(&a, &a, &b), Err(OpsError::SizeMismatch(_))));
    }

    #[test]
    fn test_brighten_clamps() {
        let img = rgb_4x4();
        let out = brighten(&img, 100).unwrap();
        assert_eq!(out.get(0, 0, 0), 100);
        assert_eq!(out.get(0, 0, 3), 255);
        let out = brighten(&img, -100).unwrap();
        assert_eq!(out.get(0, 0, 1), 0);
        assert_eq!(out.get(0, 0, 3), 92);
    }

    #[test]
    fn test_brighten_inverse_without_clipping() {
        let img = PixelBuffer::from_fn(8, 8, 3, |c, row, col| (40 + c * 10 + row * 8 + col) as u8).unwrap();
        for n in [-40, -1, 1, 50, 100] {
            let back = brighten(&brighten(&img, n).unwrap(), -n).unwrap();
            assert_eq!(back, img, "delta {}", n);
        }
    }

    #[test]
    fn test_brighten_rejects_out_of_range() {
        assert!(brighten(&rgb_4x4(), 256).is_err());
        assert!(brighten(&rgb_4x4(), -256).is_err());
        assert!(brighten(&rgb_4x4(), 255).is_ok());
    }
}
