//! # pixmill-io
//!
//! Image codecs for pixmill.
//!
//! - **PPM** - Plain-text `P3`, always available
//! - **PNG** - 8-bit, alpha dropped on read (`png` feature)
//! - **JPEG** - Baseline RGB (`jpeg` feature)
//!
//! Every decoder produces a 3-channel [`PixelBuffer`]; every encoder expects one.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pixmill_io::{read, write};
//!
//! let image = read("koala.ppm")?;
//! write("koala.png", &image)?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;
pub mod ppm;

pub use detect::Format;
pub use error::{IoError, IoResult};

use pixmill_core::PixelBuffer;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Reads an image from a file, auto-detecting the format.
///
/// Magic bytes win over the extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), format = format.name(), "read");

    match format {
        Format::Ppm => ppm::read(path),

        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

/// Writes an image to a file, choosing the format from the extension.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), format = format.name(), "write");

    match format {
        Format::Ppm => ppm::write(path, image),

        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        PixelBuffer::from_fn(6, 4, 3, |c, row, col| (c * 70 + row * 6 + col) as u8).unwrap()
    }

    #[test]
    fn test_dispatch_ppm_and_png() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.ppm", "a.png"] {
            let path = dir.path().join(name);
            write(&path, &sample()).unwrap();
            assert_eq!(read(&path).unwrap(), sample(), "{}", name);
        }
    }

    #[test]
    fn test_dispatch_jpeg_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpeg");
        write(&path, &sample()).unwrap();
        assert_eq!(read(&path).unwrap().dimensions(), (6, 4));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.bmp");
        assert!(matches!(write(&path, &sample()), Err(IoError::UnsupportedFormat(e)) if e == "bmp"));
        std::fs::write(&path, b"BM....").unwrap();
        assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read(dir.path().join("nope.ppm")), Err(IoError::Io(_))));
    }
}
