//! Levels adjustment through a quadratic tone curve.
//!
//! The curve passes through `(black, 0)`, `(mid, 128)` and `(white, 255)`.
//! Values at or below `black` map to 0, values at or above `white` map to 255.
//!
//! # Example
//!
//! ```rust
//! use pixmill_ops::levels::ToneCurve;
//!
//! let curve = ToneCurve::fit(20, 120, 255).unwrap();
//! assert_eq!(curve.map(20), 0);
//! assert_eq!(curve.map(120), 128);
//! assert_eq!(curve.map(255), 255);
//! ```

use crate::guard::{ensure_in_range, ensure_rgb};
use crate::{OpsError, OpsResult};
use pixmill_core::{round_half_up, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Quadratic `a*x^2 + b*x + c` with its black and white cut-offs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    /// Quadratic coefficient.
    pub a: f64,
    /// Linear coefficient.
    pub b: f64,
    /// Constant term.
    pub c: f64,
    black: u8,
    white: u8,
}

impl ToneCurve {
    /// Fits the curve through the three anchor points.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if a value is outside `[0, 255]` or
    /// `black < mid < white` does not hold.
    pub fn fit(black: i32, mid: i32, white: i32) -> OpsResult<Self> {
        ensure_in_range("black", black, 0, 255)?;
        ensure_in_range("mid", mid, 0, 255)?;
        ensure_in_range("white", white, 0, 255)?;
        if !(black < mid && mid < white) {
            return Err(OpsError::InvalidParameter(format!(
                "levels must be strictly ascending, got black={} mid={} white={}",
                black, mid, white
            )));
        }

        let (b, m, w) = (black as f64, mid as f64, white as f64);
        let n = b * b * (m - w) - b * (m * m - w * w) + w * m * m - m * w * w;
        let x = -b * (128.0 - 255.0) + 128.0 * w - 255.0 * m;
        let y = b * b * (128.0 - 255.0) + 255.0 * m * m - 128.0 * w * w;
        let z = b * b * (255.0 * m - 128.0 * w) - b * (255.0 * m * m - 128.0 * w * w);

        let curve = Self {
            a: x / n,
            b: y / n,
            c: z / n,
            black: black as u8,
            white: white as u8,
        };
        debug!(a = curve.a, b = curve.b, c = curve.c, "tone curve");
        Ok(curve)
    }

    /// Raw curve value at `x`, unclamped.
    pub fn eval(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    /// Maps one sample through the curve.
    pub fn map(&self, v: u8) -> u8 {
        if v <= self.black {
            0
        } else if v >= self.white {
            255
        } else {
            round_half_up(self.eval(v as f64).clamp(0.0, 255.0)) as u8
        }
    }

    /// Lookup table of [`ToneCurve::map`] over all 256 inputs.
    pub fn lut(&self) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (v, out) in lut.iter_mut().enumerate() {
            *out = self.map(v as u8);
        }
        lut
    }
}

/// Applies the levels curve to every channel.
pub fn levels_adjust(src: &PixelBuffer, black: i32, mid: i32, white: i32) -> OpsResult<PixelBuffer> {
    trace!(black, mid, white, w = src.width(), h = src.height(), "levels_adjust");
    ensure_rgb(src, "levels-adjust")?;
    let lut = ToneCurve::fit(black, mid, white)?.lut();
    Ok(PixelBuffer::from_fn(src.width(), src.height(), src.channels(), |c, row, col| {
        lut[src.get(c, row, col) as usize]
    })?)
}
