//! `load` and `save`.

use super::Invocation;
use crate::store::ImageStore;
use anyhow::{Context, Result};
use pixmill_core::PixelBuffer;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    pixmill_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    pixmill_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// `load <path> <name>`
pub fn load(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    inv.expect_len(2, "<path> <name>")?;
    let path = Path::new(inv.args[0]);
    let image = load_image(path)?;
    info!(path = %path.display(), name = inv.args[1], w = image.width(), h = image.height(), "Loaded image");
    store.insert(inv.args[1], image);
    Ok(())
}

/// `save <path> <name>`
pub fn save(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    inv.expect_len(2, "<path> <name>")?;
    let path = Path::new(inv.args[0]);
    save_image(path, store.get(inv.args[1])?)?;
    info!(path = %path.display(), name = inv.args[1], "Saved image");
    Ok(())
}
