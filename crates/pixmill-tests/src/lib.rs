//! Integration tests for pixmill crates.
//!
//! End-to-end checks that codecs, operations and the script interpreter
//! agree with each other on the shared 4x4 regression fixture.

use std::path::PathBuf;

/// Path of a file under `fixtures/`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
