//! Script verbs and the table that maps names to handlers.
//!
//! Each handler takes the registry and one tokenized line. Argument shape
//! problems surface as [`CommandError`], missing images as
//! [`StoreError`](crate::store::StoreError), operation failures as the
//! underlying `pixmill_ops::OpsError` or `pixmill_io::IoError`.

pub mod adjust;
pub mod args;
pub mod channel;
pub mod file;
pub mod geometry;

pub use args::{CommandError, Coverage, FilterTarget, Invocation};

use crate::store::ImageStore;
use anyhow::Result;
use pixmill_core::{Mask, PixelBuffer};
use pixmill_ops::{ExtendedOps, OpsResult};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// A script verb implementation.
pub type Handler = fn(&mut ImageStore, &Invocation<'_>) -> Result<()>;

/// Every verb the table knows, in the order `help` lists them.
pub const VERBS: &[&str] = &[
    "load",
    "save",
    "brighten",
    "horizontal-flip",
    "vertical-flip",
    "red-component",
    "green-component",
    "blue-component",
    "luma-component",
    "value-component",
    "intensity-component",
    "sepia",
    "blur",
    "sharpen",
    "rgb-split",
    "rgb-combine",
    "compress",
    "histogram",
    "color-correct",
    "levels-adjust",
    "downscale",
    "dither",
];

/// Finds the handler for `verb`.
pub fn lookup(verb: &str) -> Option<Handler> {
    let handler: Handler = match verb {
        "load" => file::load,
        "save" => file::save,
        "brighten" => adjust::brighten,
        "horizontal-flip" => geometry::horizontal_flip,
        "vertical-flip" => geometry::vertical_flip,
        "red-component" => channel::red,
        "green-component" => channel::green,
        "blue-component" => channel::blue,
        "luma-component" => channel::luma,
        "value-component" => channel::value,
        "intensity-component" => channel::intensity,
        "sepia" => channel::sepia,
        "blur" => adjust::blur,
        "sharpen" => adjust::sharpen,
        "rgb-split" => channel::rgb_split,
        "rgb-combine" => channel::rgb_combine,
        "compress" => adjust::compress,
        "histogram" => adjust::histogram,
        "color-correct" => adjust::color_correct,
        "levels-adjust" => adjust::levels_adjust,
        "downscale" => geometry::downscale,
        "dither" => adjust::dither,
        _ => return None,
    };
    Some(handler)
}

/// Stores `filtered` under `dst`, composited against `src` when a split is asked for.
fn store_result(
    store: &mut ImageStore,
    src: &str,
    dst: &str,
    filtered: PixelBuffer,
    split: Option<f32>,
) -> Result<()> {
    let result = match split {
        Some(percentage) => store.get(src)?.split_preview(&filtered, percentage)?,
        None => filtered,
    };
    store.insert(dst, result);
    Ok(())
}

/// Runs a mask-aware operation in any of the three filter forms.
fn filter_verb<F>(store: &mut ImageStore, inv: &Invocation<'_>, usage: &'static str, op: F) -> Result<()>
where
    F: FnOnce(&PixelBuffer, Option<&Mask>) -> OpsResult<PixelBuffer>,
{
    let target = inv.filter_target(usage)?;
    let (mask, split) = match target.coverage {
        Coverage::Full => (None, None),
        Coverage::Masked(name) => (Some(Mask::from_buffer(store.get(name)?)), None),
        Coverage::Split(percentage) => (None, Some(percentage)),
    };
    trace!(verb = inv.verb, src = target.src, dst = target.dst, masked = mask.is_some(), "filter verb");
    let filtered = op(store.get(target.src)?, mask.as_ref())?;
    store_result(store, target.src, target.dst, filtered, split)
}

const FILTER_USAGE: &str = "<src> <dst> | <src> <mask> <dst> | <src> <dst> split <percentage>";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_verb_resolves() {
        for verb in VERBS {
            assert!(lookup(verb).is_some(), "{}", verb);
        }
        assert!(lookup("run").is_none());
        assert!(lookup("Blur").is_none());
    }
}
