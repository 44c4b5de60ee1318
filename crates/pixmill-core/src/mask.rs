//! Region masks for masked operations.
//!
//! A [`Mask`] records, per pixel, whether an operation is allowed to rewrite
//! that pixel ("masked in"). It carries its own width and height and is
//! checked against the operand with [`Mask::ensure_matches`] before use.
//!
//! Masks are usually derived from an image with [`Mask::from_buffer`]: any
//! pixel that is not pure white on every channel is masked in, so a black
//! shape painted on a white canvas selects the shape.

use crate::{Error, PixelBuffer, Result};

/// Per-pixel "operate here" flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    included: Vec<bool>,
    width: usize,
    height: usize,
}

impl Mask {
    /// Creates a mask from row-major flags (`true` = masked in).
    pub fn new(width: usize, height: usize, included: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "mask must not be empty"));
        }
        if included.len() != width * height {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} mask flags, got {}", width * height, included.len()),
            ));
        }
        Ok(Self {
            included,
            width,
            height,
        })
    }

    /// A mask that includes every pixel.
    pub fn all(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, vec![true; width * height])
    }

    /// Derives a mask from an image: pure white pixels are excluded.
    ///
    /// ```rust
    /// use pixmill_core::{Mask, PixelBuffer};
    ///
    /// let img = PixelBuffer::from_fn(2, 1, 3, |_, _, col| if col == 0 { 255 } else { 0 }).unwrap();
    /// let mask = Mask::from_buffer(&img);
    /// assert!(!mask.includes(0, 0));
    /// assert!(mask.includes(0, 1));
    /// ```
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let (width, height) = buffer.dimensions();
        let mut included = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                included.push(!buffer.is_white(row, col));
            }
        }
        Self {
            included,
            width,
            height,
        }
    }

    /// Returns the mask width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the mask height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Whether the operation may rewrite `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the mask.
    #[inline]
    pub fn includes(&self, row: usize, col: usize) -> bool {
        assert!(row < self.height && col < self.width, "mask index ({row}, {col}) out of bounds");
        self.included[row * self.width + col]
    }

    /// Number of masked-in pixels.
    pub fn count_included(&self) -> usize {
        self.included.iter().filter(|&&b| b).count()
    }

    /// Fails with [`Error::DimensionMismatch`] if the mask does not cover `buffer` exactly.
    pub fn ensure_matches(&self, buffer: &PixelBuffer) -> Result<()> {
        if self.dimensions() != buffer.dimensions() {
            return Err(Error::dimension_mismatch(buffer.dimensions(), self.dimensions()));
        }
        Ok(())
    }
}

/// `None` means "operate everywhere".
#[inline]
pub fn included(mask: Option<&Mask>, row: usize, col: usize) -> bool {
    mask.is_none_or(|m| m.includes(row, col))
}
