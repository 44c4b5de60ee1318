//! Tone, filter and compression verbs.

use super::{filter_verb, store_result, Invocation, FILTER_USAGE};
use crate::store::ImageStore;
use anyhow::Result;
use pixmill_ops::{BasicOps, ExtendedOps};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// `brighten <delta> <src> <dst> [split <p>]`
pub fn brighten(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    let split = inv.optional_split(3, "<delta> <src> <dst> [split <percentage>]")?;
    let delta: i32 = inv.number(0, "delta")?;
    let filtered = store.get(inv.args[1])?.brighten(delta)?;
    store_result(store, inv.args[1], inv.args[2], filtered, split)
}

/// `blur`
pub fn blur(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    filter_verb(store, inv, FILTER_USAGE, |src, mask| src.blur(mask))
}

/// `sharpen`
pub fn sharpen(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    filter_verb(store, inv, FILTER_USAGE, |src, mask| src.sharpen(mask))
}

/// `compress <percentage> <src> <dst>`
pub fn compress(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    inv.expect_len(3, "<percentage> <src> <dst>")?;
    let percentage: f64 = inv.number(0, "percentage")?;
    let compressed = store.get(inv.args[1])?.compress(percentage)?;
    store.insert(inv.args[2], compressed);
    Ok(())
}

/// `histogram <src> <dst>`
pub fn histogram(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    inv.expect_len(2, "<src> <dst>")?;
    let plot = store.get(inv.args[0])?.histogram()?;
    store.insert(inv.args[1], plot);
    Ok(())
}

/// `color-correct <src> <dst> [split <p>]`
pub fn color_correct(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    let split = inv.optional_split(2, "<src> <dst> [split <percentage>]")?;
    let filtered = store.get(inv.args[0])?.color_correct()?;
    store_result(store, inv.args[0], inv.args[1], filtered, split)
}

/// `levels-adjust <black> <mid> <white> <src> <dst> [split <p>]`
pub fn levels_adjust(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    let split = inv.optional_split(5, "<black> <mid> <white> <src> <dst> [split <percentage>]")?;
    let black: i32 = inv.number(0, "black point")?;
    let mid: i32 = inv.number(1, "mid point")?;
    let white: i32 = inv.number(2, "white point")?;
    trace!(black, mid, white, ?split, "levels-adjust");
    let filtered = store.get(inv.args[3])?.levels_adjust(black, mid, white)?;
    store_result(store, inv.args[3], inv.args[4], filtered, split)
}

/// `dither <src> <dst> [split <p>]`
pub fn dither(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    let split = inv.optional_split(2, "<src> <dst> [split <percentage>]")?;
    let filtered = store.get(inv.args[0])?.dither()?;
    store_result(store, inv.args[0], inv.args[1], filtered, split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verbs::CommandError;
    use pixmill_core::PixelBuffer;
    use pixmill_ops::OpsError;

    fn store_with(img: PixelBuffer) -> ImageStore {
        let mut store = ImageStore::new();
        store.insert("img", img);
        store
    }

    fn flat(v: u8) -> PixelBuffer {
        PixelBuffer::from_fn(4, 4, 3, |_, _, _| v).unwrap()
    }

    #[test]
    fn test_brighten_and_split() {
        let mut store = store_with(flat(100));
        brighten(&mut store, &Invocation::new("brighten", &["50", "img", "up"])).unwrap();
        assert!(store.get("up").unwrap().plane(1).iter().all(|&v| v == 150));

        brighten(&mut store, &Invocation::new("brighten", &["-50", "img", "half", "split", "25"])).unwrap();
        let half = store.get("half").unwrap();
        assert_eq!(half.plane(0)[..4], [50, 0, 100, 100]);
    }

    #[test]
    fn test_brighten_out_of_range() {
        let mut store = store_with(flat(100));
        let err = brighten(&mut store, &Invocation::new("brighten", &["300", "img", "up"])).unwrap_err();
        assert!(matches!(err.downcast_ref::<OpsError>(), Some(OpsError::InvalidParameter(_))));
        let err = brighten(&mut store, &Invocation::new("brighten", &["lots", "img", "up"])).unwrap_err();
        assert!(matches!(err.downcast_ref::<CommandError>(), Some(CommandError::Parse { .. })));
    }

    #[test]
    fn test_compress_bounds() {
        let mut store = store_with(flat(77));
        compress(&mut store, &Invocation::new("compress", &["50", "img", "c"])).unwrap();
        assert_eq!(store.get("c").unwrap(), &flat(77));
        let err = compress(&mut store, &Invocation::new("compress", &["101", "img", "c"])).unwrap_err();
        assert!(matches!(err.downcast_ref::<OpsError>(), Some(OpsError::InvalidParameter(_))));
    }

    #[test]
    fn test_histogram_dimensions() {
        let mut store = store_with(flat(10));
        histogram(&mut store, &Invocation::new("histogram", &["img", "h"])).unwrap();
        assert_eq!(store.get("h").unwrap().dimensions(), (256, 256));
    }

    #[test]
    fn test_levels_identity() {
        let img = PixelBuffer::from_fn(4, 4, 3, |c, row, col| (c * 50 + row * 16 + col * 4) as u8).unwrap();
        let mut store = store_with(img.clone());
        levels_adjust(&mut store, &Invocation::new("levels-adjust", &["0", "128", "255", "img", "l"])).unwrap();
        let out = store.get("l").unwrap();
        for c in 0..3 {
            for (a, b) in out.plane(c).iter().zip(img.plane(c)) {
                assert!((*a as i32 - *b as i32).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_levels_rejects_unordered() {
        let mut store = store_with(flat(10));
        let err = levels_adjust(&mut store, &Invocation::new("levels-adjust", &["200", "100", "50", "img", "l"]))
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<OpsError>(), Some(OpsError::InvalidParameter(_))));
    }

    #[test]
    fn test_dither_is_binary() {
        let img = PixelBuffer::from_fn(4, 4, 3, |_, row, col| (row * 60 + col * 10) as u8).unwrap();
        let mut store = store_with(img);
        dither(&mut store, &Invocation::new("dither", &["img", "d"])).unwrap();
        let d = store.get("d").unwrap();
        assert!(d.plane(0).iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_color_correct_split_usage() {
        let mut store = store_with(flat(10));
        let err = color_correct(&mut store, &Invocation::new("color-correct", &["img", "out", "split"])).unwrap_err();
        assert!(matches!(err.downcast_ref::<CommandError>(), Some(CommandError::Usage { .. })));
        color_correct(&mut store, &Invocation::new("color-correct", &["img", "out", "split", "100"])).unwrap();
        assert_eq!(store.get("out").unwrap().dimensions(), (4, 4));
    }
}
