//! Flip and downscale verbs.

use super::Invocation;
use crate::store::ImageStore;
use anyhow::Result;
use pixmill_ops::{BasicOps, ExtendedOps, FlipDirection};

fn flip(store: &mut ImageStore, inv: &Invocation<'_>, direction: FlipDirection) -> Result<()> {
    inv.expect_len(2, "<src> <dst>")?;
    let flipped = store.get(inv.args[0])?.flip(direction);
    store.insert(inv.args[1], flipped);
    Ok(())
}

/// `horizontal-flip <src> <dst>`
pub fn horizontal_flip(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    flip(store, inv, FlipDirection::Horizontal)
}

/// `vertical-flip <src> <dst>`
pub fn vertical_flip(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    flip(store, inv, FlipDirection::Vertical)
}

/// `downscale <height> <width> <src> <dst>`
pub fn downscale(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    inv.expect_len(4, "<height> <width> <src> <dst>")?;
    let height: usize = inv.number(0, "height")?;
    let width: usize = inv.number(1, "width")?;
    let scaled = store.get(inv.args[2])?.downscale(width, height)?;
    store.insert(inv.args[3], scaled);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use crate::verbs::CommandError;
    use pixmill_core::PixelBuffer;

    fn store_with_ramp() -> ImageStore {
        let mut store = ImageStore::new();
        let img = PixelBuffer::from_fn(3, 2, 3, |_, row, col| (row * 3 + col) as u8).unwrap();
        store.insert("img", img);
        store
    }

    #[test]
    fn test_flips() {
        let mut store = store_with_ramp();
        horizontal_flip(&mut store, &Invocation::new("horizontal-flip", &["img", "h"])).unwrap();
        vertical_flip(&mut store, &Invocation::new("vertical-flip", &["img", "v"])).unwrap();
        assert_eq!(store.get("h").unwrap().plane(0), &[2, 1, 0, 5, 4, 3]);
        assert_eq!(store.get("v").unwrap().plane(0), &[3, 4, 5, 0, 1, 2]);
    }

    #[test]
    fn test_flip_in_place_name() {
        let mut store = store_with_ramp();
        horizontal_flip(&mut store, &Invocation::new("horizontal-flip", &["img", "img"])).unwrap();
        horizontal_flip(&mut store, &Invocation::new("horizontal-flip", &["img", "img"])).unwrap();
        assert_eq!(store.get("img").unwrap().plane(2), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_downscale_height_first() {
        let mut store = store_with_ramp();
        downscale(&mut store, &Invocation::new("downscale", &["1", "2", "img", "small"])).unwrap();
        assert_eq!(store.get("small").unwrap().dimensions(), (2, 1));
    }

    #[test]
    fn test_downscale_errors() {
        let mut store = store_with_ramp();
        let err = downscale(&mut store, &Invocation::new("downscale", &["1", "2", "nope", "small"])).unwrap_err();
        assert_eq!(err.downcast_ref::<StoreError>(), Some(&StoreError::NotFound("nope".into())));
        let err = downscale(&mut store, &Invocation::new("downscale", &["-1", "2", "img", "small"])).unwrap_err();
        assert!(matches!(err.downcast_ref::<CommandError>(), Some(CommandError::Parse { what: "height", .. })));
    }
}
