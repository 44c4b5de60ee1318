//! PNG format support.
//!
//! Reads 8-bit greyscale, grey+alpha, RGB and RGBA images into a 3-channel
//! buffer (alpha is dropped, grey is replicated). Writes 8-bit RGB.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixmill_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{IoError, IoResult};
use pixmill_core::{PixelBuffer, RGB_CHANNELS};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let width = info.width as usize;
    let height = info.height as usize;
    let bytes = &buf[..info.buffer_size()];
    trace!(width, height, color = ?info.color_type, "png frame");

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "PNG bit depth {:?} (only 8-bit)",
            info.bit_depth
        )));
    }

    let rgb: Vec<u8> = match info.color_type {
        png::ColorType::Rgb => bytes.to_vec(),
        png::ColorType::Rgba => bytes.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]).collect(),
        png::ColorType::Grayscale => bytes.iter().flat_map(|&g| [g, g, g]).collect(),
        png::ColorType::GrayscaleAlpha => bytes.chunks_exact(2).flat_map(|p| [p[0], p[0], p[0]]).collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!("PNG color type {:?}", other)));
        }
    };

    Ok(PixelBuffer::from_interleaved(width, height, RGB_CHANNELS, &rgb)?)
}

/// Writes an 8-bit RGB PNG file to the given path.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    if image.channels() != RGB_CHANNELS {
        return Err(IoError::EncodeError(format!(
            "unsupported channel count: {}",
            image.channels()
        )));
    }
    let width = u32::try_from(image.width()).map_err(|_| IoError::EncodeError("width too large for PNG".into()))?;
    let height = u32::try_from(image.height()).map_err(|_| IoError::EncodeError("height too large for PNG".into()))?;

    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&image.to_interleaved())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}
