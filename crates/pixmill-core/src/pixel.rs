//! Per-sample constants and helpers shared by every operation.
//!
//! # Constants
//!
//! - [`REC709_LUMA_R`], [`REC709_LUMA_G`], [`REC709_LUMA_B`] - Rec.709 luma weights
//! - [`SEPIA`] - 3x3 sepia tone matrix applied to (R, G, B)
//!
//! # Helpers
//!
//! - [`clamp_u8`] - Saturate an integer into the 8-bit sample range
//! - [`round_half_up`] - Round to nearest, ties toward positive infinity

// ============================================================================
// Rec.709 Luma Constants
// ============================================================================

/// Rec.709 luma coefficient for the red channel.
///
/// Used in `Y = 0.2126*R + 0.7152*G + 0.0722*B`.
pub const REC709_LUMA_R: f64 = 0.2126;

/// Rec.709 luma coefficient for the green channel.
pub const REC709_LUMA_G: f64 = 0.7152;

/// Rec.709 luma coefficient for the blue channel.
pub const REC709_LUMA_B: f64 = 0.0722;

/// Sepia tone matrix. Row `k` gives the weights of (R, G, B) for output channel `k`.
pub const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Largest representable sample value.
pub const MAX_SAMPLE: u8 = u8::MAX;

/// Saturates `value` into `[0, 255]`.
///
/// ```
/// use pixmill_core::clamp_u8;
///
/// assert_eq!(clamp_u8(-12), 0);
/// assert_eq!(clamp_u8(300), 255);
/// assert_eq!(clamp_u8(42), 42);
/// ```
#[inline]
pub fn clamp_u8(value: i64) -> u8 {
    value.clamp(0, MAX_SAMPLE as i64) as u8
}

/// Rounds to the nearest integer with ties going up (`floor(x + 0.5)`).
///
/// Unlike [`f64::round`], `-2.5` rounds to `-2`.
///
/// ```
/// use pixmill_core::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3);
/// assert_eq!(round_half_up(-2.5), -2);
/// assert_eq!(round_half_up(-2.6), -3);
/// ```
#[inline]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
