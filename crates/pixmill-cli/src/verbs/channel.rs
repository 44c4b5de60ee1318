//! Per-pixel channel verbs: components, sepia, split and combine.

use super::{filter_verb, Invocation, FILTER_USAGE};
use crate::store::ImageStore;
use anyhow::Result;
use pixmill_ops::{component, BasicOps};

fn single_channel(store: &mut ImageStore, inv: &Invocation<'_>, channel: usize) -> Result<()> {
    filter_verb(store, inv, FILTER_USAGE, |src, mask| src.channel_component(mask, channel))
}

/// `red-component`
pub fn red(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    single_channel(store, inv, 0)
}

/// `green-component`
pub fn green(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    single_channel(store, inv, 1)
}

/// `blue-component`
pub fn blue(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    single_channel(store, inv, 2)
}

/// `luma-component`
pub fn luma(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    filter_verb(store, inv, FILTER_USAGE, |src, mask| src.luma_component(mask))
}

/// `value-component`
pub fn value(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    filter_verb(store, inv, FILTER_USAGE, |src, mask| src.value_component(mask))
}

/// `intensity-component`
pub fn intensity(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    filter_verb(store, inv, FILTER_USAGE, |src, mask| src.intensity_component(mask))
}

/// `sepia`
pub fn sepia(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    filter_verb(store, inv, FILTER_USAGE, |src, mask| src.sepia(mask))
}

/// `rgb-split <src> <red> <green> <blue>`
pub fn rgb_split(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    inv.expect_len(4, "<src> <red> <green> <blue>")?;
    let planes = store.get(inv.args[0])?.rgb_split()?;
    for (name, plane) in inv.args[1..].iter().zip(planes) {
        store.insert(*name, plane);
    }
    Ok(())
}

/// `rgb-combine <dst> <red> <green> <blue>`
///
/// Channel 0 of each operand becomes red, green and blue respectively.
pub fn rgb_combine(store: &mut ImageStore, inv: &Invocation<'_>) -> Result<()> {
    inv.expect_len(4, "<dst> <red> <green> <blue>")?;
    let combined = component::rgb_combine(
        store.get(inv.args[1])?,
        store.get(inv.args[2])?,
        store.get(inv.args[3])?,
    )?;
    store.insert(inv.args[0], combined);
    Ok(())
}
