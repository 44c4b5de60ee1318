//! Named image registry.
//!
//! Every script command reads its operands from and writes its results to an
//! [`ImageStore`]. Storing under an existing name replaces the old image.

use pixmill_core::PixelBuffer;
use std::collections::HashMap;
use thiserror::Error;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Registry lookup failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No image is registered under this name.
    #[error("no image named '{0}' has been loaded")]
    NotFound(String),
}

/// Images keyed by the names scripts give them.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: HashMap<String, PixelBuffer>,
}

impl ImageStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an image by name.
    pub fn get(&self, name: &str) -> Result<&PixelBuffer, StoreError> {
        self.images
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Registers `image` under `name`, returning the image it replaced.
    pub fn insert(&mut self, name: impl Into<String>, image: PixelBuffer) -> Option<PixelBuffer> {
        let name = name.into();
        trace!(name = %name, w = image.width(), h = image.height(), "store insert");
        self.images.insert(name, image)
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.images.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
