//! Format detection utilities.
//!
//! Detects image formats from file extensions and magic bytes.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Plain-text PPM (`P3`).
    Ppm,
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (extension + magic bytes).
    ///
    /// First checks magic bytes, falls back to extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        if let Ok(format) = Self::from_magic_bytes(path) {
            if format != Format::Unknown {
                return Ok(format);
            }
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("ppm") => Format::Ppm,
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Detects format from file magic bytes.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];
        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // PNG: 0x89 'P' 'N' 'G' CR LF SUB LF
        if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }

        // JPEG: 0xFF 0xD8 0xFF
        if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
            return Format::Jpeg;
        }

        // PPM: "P3" followed by whitespace
        if bytes.len() >= 3 && &bytes[0..2] == b"P3" && bytes[2].is_ascii_whitespace() {
            return Format::Ppm;
        }

        Format::Unknown
    }

    /// Lowercase display name.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Ppm => "ppm",
            Format::Png => "png",
            Format::Jpeg => "jpeg",
            Format::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("a/b/koala.PPM"), Format::Ppm);
        assert_eq!(Format::from_extension("x.png"), Format::Png);
        assert_eq!(Format::from_extension("x.jpeg"), Format::Jpeg);
        assert_eq!(Format::from_extension("x.JPG"), Format::Jpeg);
        assert_eq!(Format::from_extension("x.bmp"), Format::Unknown);
        assert_eq!(Format::from_extension("noext"), Format::Unknown);
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(Format::from_bytes(b"P3\n2 2\n255\n"), Format::Ppm);
        assert_eq!(Format::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Format::Jpeg);
        assert_eq!(
            Format::from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            Format::Png
        );
        assert_eq!(Format::from_bytes(b"P6\n"), Format::Unknown);
        assert_eq!(Format::from_bytes(b""), Format::Unknown);
    }

    #[test]
    fn test_detect_prefers_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabelled.png");
        std::fs::write(&path, b"P3\n1 1\n255\n0 0 0\n").unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Ppm);

        let missing = dir.path().join("later.jpg");
        assert_eq!(Format::detect(&missing).unwrap(), Format::Jpeg);
    }
}
