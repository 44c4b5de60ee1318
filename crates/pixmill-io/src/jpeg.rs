//! JPEG format support.
//!
//! Decoding via `jpeg-decoder` (RGB24 and L8, greyscale replicated to RGB),
//! encoding via `jpeg-encoder` as baseline RGB.

use crate::{IoError, IoResult};
use pixmill_core::{PixelBuffer, RGB_CHANNELS};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as usize;
    let height = info.height as usize;
    trace!(width, height, format = ?info.pixel_format, "jpeg frame");

    let rgb = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!("JPEG pixel format {:?}", other)));
        }
    };

    Ok(PixelBuffer::from_interleaved(width, height, RGB_CHANNELS, &rgb)?)
}

/// Writes a JPEG file at [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    write_with_quality(path, image, DEFAULT_QUALITY)
}

/// Writes a JPEG file at `quality` (1-100).
pub fn write_with_quality<P: AsRef<Path>>(path: P, image: &PixelBuffer, quality: u8) -> IoResult<()> {
    let bytes = encode(image, quality)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encodes to JPEG bytes in memory.
pub fn encode(image: &PixelBuffer, quality: u8) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    if image.channels() != RGB_CHANNELS {
        return Err(IoError::EncodeError(format!(
            "unsupported channel count: {}",
            image.channels()
        )));
    }
    let width = u16::try_from(image.width()).map_err(|_| IoError::EncodeError("width too large for JPEG".into()))?;
    let height = u16::try_from(image.height()).map_err(|_| IoError::EncodeError("height too large for JPEG".into()))?;

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode(&image.to_interleaved(), width, height, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;
    Ok(buffer)
}
