//! Plain PPM (`P3`) support.
//!
//! Header `P3`, then width, height and a maximum value of 255, then one
//! `r g b` triple per pixel in row-major order. Tokens are separated by any
//! whitespace and `#` starts a comment that runs to the end of the line.
//!
//! # Example
//!
//! ```rust
//! use pixmill_io::ppm;
//!
//! let img = ppm::decode("P3\n# tiny\n2 1\n255\n255 0 0  0 0 255\n").unwrap();
//! assert_eq!(img.get(2, 0, 1), 255);
//! assert!(ppm::encode(&img).unwrap().starts_with("P3\n2 1\n255\n"));
//! ```

use crate::{IoError, IoResult};
use pixmill_core::{PixelBuffer, RGB_CHANNELS};
use std::fmt::Write as _;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads a PPM file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let text = std::fs::read_to_string(path.as_ref())?;
    decode(&text)
}

/// Writes a PPM file to the given path.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    std::fs::write(path.as_ref(), encode(image)?)?;
    Ok(())
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(body, _)| body))
        .flat_map(str::split_whitespace)
}

fn next_number<'a, I>(tokens: &mut I, what: &str) -> IoResult<usize>
where
    I: Iterator<Item = &'a str>,
{
    let tok = tokens
        .next()
        .ok_or_else(|| IoError::InvalidFile(format!("unexpected end of file reading {}", what)))?;
    tok.parse::<usize>()
        .map_err(|_| IoError::InvalidFile(format!("bad {} '{}'", what, tok)))
}

/// Parses PPM text into a 3-channel buffer.
pub fn decode(text: &str) -> IoResult<PixelBuffer> {
    let mut toks = tokens(text);
    match toks.next() {
        Some("P3") => {}
        Some(other) => return Err(IoError::UnsupportedFormat(format!("PPM magic '{}'", other))),
        None => return Err(IoError::InvalidFile("empty PPM file".into())),
    }

    let width = next_number(&mut toks, "width")?;
    let height = next_number(&mut toks, "height")?;
    let max = next_number(&mut toks, "max value")?;
    if max != 255 {
        return Err(IoError::UnsupportedFormat(format!("PPM max value {} (only 255)", max)));
    }
    trace!(width, height, "ppm header");

    let count = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(RGB_CHANNELS))
        .ok_or_else(|| IoError::InvalidFile(format!("PPM size {}x{} overflows", width, height)))?;
    let mut samples = Vec::with_capacity(count.min(1 << 24));
    for _ in 0..count {
        let v = next_number(&mut toks, "sample")?;
        if v > 255 {
            return Err(IoError::InvalidFile(format!("PPM sample {} exceeds 255", v)));
        }
        samples.push(v as u8);
    }
    Ok(PixelBuffer::from_interleaved(width, height, RGB_CHANNELS, &samples)?)
}

/// Formats a 3-channel buffer as PPM text.
pub fn encode(image: &PixelBuffer) -> IoResult<String> {
    if image.channels() != RGB_CHANNELS {
        return Err(IoError::EncodeError(format!(
            "PPM needs 3 channels, got {}",
            image.channels()
        )));
    }
    let (width, height) = image.dimensions();
    let mut out = String::with_capacity(16 + width * height * 12);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "P3\n{} {}\n255", width, height);
    for row in 0..height {
        for col in 0..width {
            let _ = writeln!(
                out,
                "{} {} {}",
                image.get(0, row, col),
                image.get(1, row, col),
                image.get(2, row, col)
            );
        }
    }
    Ok(out)
}
