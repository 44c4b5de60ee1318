//! The multi-channel pixel store.
//!
//! [`PixelBuffer`] owns `C` same-sized 2D grids of 8-bit samples. The channel
//! count is chosen at construction and never changes; there is no resize.
//! Every shape change happens by building a new buffer.
//!
//! # Memory Layout
//!
//! Samples are stored **planar**, one contiguous plane per channel, each plane
//! row-major top-to-bottom:
//!
//! ```text
//! Memory: [R R R R ... R]  <- channel 0, rows 0..height
//!         [G G G G ... G]  <- channel 1
//!         [B B B B ... B]  <- channel 2
//! ```
//!
//! Codecs that need interleaved `RGBRGB...` data use
//! [`PixelBuffer::from_interleaved`] and [`PixelBuffer::to_interleaved`].
//!
//! # Usage
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//!
//! let mut img = PixelBuffer::rgb(2, 2).unwrap();
//! img.set(0, 1, 1, 200);
//! assert_eq!(img.get(0, 1, 1), 200);
//! assert_eq!(img.channels(), 3);
//! ```

use crate::{Error, Result};

/// Channel count of an RGB buffer.
pub const RGB_CHANNELS: usize = 3;

/// Owned planar image buffer with 8-bit samples.
///
/// Samples are `u8`, so the `[0, 255]` invariant is carried by the type:
/// [`set`](Self::set) never clamps, callers convert computed values with
/// [`clamp_u8`](crate::clamp_u8) first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Planar sample storage, `channels * height * width` long
    data: Vec<u8>,
    /// Width in pixels
    width: usize,
    /// Height in pixels
    height: usize,
    /// Channel count, fixed for the buffer's lifetime
    channels: usize,
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if any of `width`, `height` or
    /// `channels` is zero.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        validate_shape(width, height, channels)?;
        Ok(Self {
            data: vec![0; channels * width * height],
            width,
            height,
            channels,
        })
    }

    /// Creates a zero-filled 3-channel (R, G, B) buffer.
    pub fn rgb(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, RGB_CHANNELS)
    }

    /// Creates a buffer by evaluating `f(channel, row, col)` for every sample.
    ///
    /// ```rust
    /// use pixmill_core::PixelBuffer;
    ///
    /// let ramp = PixelBuffer::from_fn(4, 1, 1, |_, _, col| (col * 64) as u8).unwrap();
    /// assert_eq!(ramp.get(0, 0, 3), 192);
    /// ```
    pub fn from_fn<F>(width: usize, height: usize, channels: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> u8,
    {
        validate_shape(width, height, channels)?;
        let mut data = Vec::with_capacity(channels * width * height);
        for c in 0..channels {
            for row in 0..height {
                for col in 0..width {
                    data.push(f(c, row, col));
                }
            }
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Assembles a buffer from one row-major plane per channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if no planes are given or a plane
    /// does not hold exactly `width * height` samples.
    pub fn from_planes(width: usize, height: usize, planes: Vec<Vec<u8>>) -> Result<Self> {
        validate_shape(width, height, planes.len())?;
        let expected = width * height;
        let mut data = Vec::with_capacity(expected * planes.len());
        for (c, plane) in planes.iter().enumerate() {
            if plane.len() != expected {
                return Err(Error::invalid_dimensions(
                    width,
                    height,
                    format!("plane {} has {} samples, expected {}", c, plane.len(), expected),
                ));
            }
            data.extend_from_slice(plane);
        }
        Ok(Self {
            data,
            width,
            height,
            channels: planes.len(),
        })
    }

    /// Creates a buffer from interleaved samples (`RGBRGB...` for 3 channels).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `samples.len()` is not
    /// `width * height * channels`.
    pub fn from_interleaved(width: usize, height: usize, channels: usize, samples: &[u8]) -> Result<Self> {
        validate_shape(width, height, channels)?;
        let expected = width * height * channels;
        if samples.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} interleaved samples, got {}", expected, samples.len()),
            ));
        }
        let plane_len = width * height;
        let mut data = vec![0u8; expected];
        for (i, pixel) in samples.chunks_exact(channels).enumerate() {
            for (c, &v) in pixel.iter().enumerate() {
                data[c * plane_len + i] = v;
            }
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Returns the samples interleaved pixel by pixel.
    pub fn to_interleaved(&self) -> Vec<u8> {
        let plane_len = self.width * self.height;
        let mut out = Vec::with_capacity(self.data.len());
        for i in 0..plane_len {
            for c in 0..self.channels {
                out.push(self.data[c * plane_len + i]);
            }
        }
        out
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn index(&self, channel: usize, row: usize, col: usize) -> usize {
        (channel * self.height + row) * self.width + col
    }

    #[inline]
    fn in_bounds(&self, channel: usize, row: usize, col: usize) -> bool {
        channel < self.channels && row < self.height && col < self.width
    }

    fn out_of_bounds(&self, channel: usize, row: usize, col: usize) -> Error {
        Error::OutOfBounds {
            channel,
            row,
            col,
            channels: self.channels,
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the sample at `(channel, row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the address is outside the buffer. Use
    /// [`try_get`](Self::try_get) for a checked read.
    #[inline]
    pub fn get(&self, channel: usize, row: usize, col: usize) -> u8 {
        assert!(
            self.in_bounds(channel, row, col),
            "{}",
            self.out_of_bounds(channel, row, col)
        );
        self.data[self.index(channel, row, col)]
    }

    /// Checked variant of [`get`](Self::get).
    pub fn try_get(&self, channel: usize, row: usize, col: usize) -> Result<u8> {
        if !self.in_bounds(channel, row, col) {
            return Err(self.out_of_bounds(channel, row, col));
        }
        Ok(self.data[self.index(channel, row, col)])
    }

    /// Writes the sample at `(channel, row, col)`. No clamping happens here.
    ///
    /// # Panics
    ///
    /// Panics if the address is outside the buffer.
    #[inline]
    pub fn set(&mut self, channel: usize, row: usize, col: usize, value: u8) {
        assert!(
            self.in_bounds(channel, row, col),
            "{}",
            self.out_of_bounds(channel, row, col)
        );
        let idx = self.index(channel, row, col);
        self.data[idx] = value;
    }

    /// Checked variant of [`set`](Self::set).
    pub fn try_set(&mut self, channel: usize, row: usize, col: usize, value: u8) -> Result<()> {
        if !self.in_bounds(channel, row, col) {
            return Err(self.out_of_bounds(channel, row, col));
        }
        let idx = self.index(channel, row, col);
        self.data[idx] = value;
        Ok(())
    }

    /// Returns one channel as a row-major slice.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= self.channels()`.
    pub fn plane(&self, channel: usize) -> &[u8] {
        let len = self.width * self.height;
        &self.data[channel * len..(channel + 1) * len]
    }

    /// Returns one channel as a mutable row-major slice.
    pub fn plane_mut(&mut self, channel: usize) -> &mut [u8] {
        let len = self.width * self.height;
        &mut self.data[channel * len..(channel + 1) * len]
    }

    /// Returns `true` when every channel at `(row, col)` is 255.
    pub fn is_white(&self, row: usize, col: usize) -> bool {
        (0..self.channels).all(|c| self.get(c, row, col) == u8::MAX)
    }

    /// Largest sample value in `channel`.
    pub fn max_value(&self, channel: usize) -> u8 {
        self.plane(channel).iter().copied().max().unwrap_or(0)
    }

    /// Fails with [`Error::DimensionMismatch`] unless `other` has the same width and height.
    pub fn ensure_same_dimensions(&self, other: &PixelBuffer) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()));
        }
        Ok(())
    }

    /// Fails with [`Error::ChannelMismatch`] unless the buffer has `expected` channels.
    pub fn ensure_channels(&self, expected: usize) -> Result<()> {
        if self.channels != expected {
            return Err(Error::channel_mismatch(expected, self.channels));
        }
        Ok(())
    }
}

fn validate_shape(width: usize, height: usize, channels: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    if channels == 0 {
        return Err(Error::invalid_dimensions(width, height, "at least one channel required"));
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows usize"))?;
    Ok(())
}
