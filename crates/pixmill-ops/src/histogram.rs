//! Histogram analysis, colour correction and histogram plots.
//!
//! # Operations
//!
//! - [`compute_histogram`] - 256-bin frequency table for one channel
//! - [`find_peak`] - Most frequent value, ignoring clipped tails
//! - [`compute_offsets`] - Per-channel shifts that align the three peaks
//! - [`color_correct`] - Applies those shifts
//! - [`plot_histogram`] - Renders the three histograms as a 256x256 chart
//!
//! # Example
//!
//! ```rust
//! use pixmill_core::PixelBuffer;
//! use pixmill_ops::histogram::{compute_histogram, find_peak};
//!
//! let img = PixelBuffer::from_fn(4, 4, 3, |_, row, _| if row == 0 { 0 } else { 120 }).unwrap();
//! let hist = compute_histogram(&img, 0).unwrap();
//! assert_eq!(hist.bins[0], 4);
//! assert_eq!(find_peak(&hist), 120);
//! ```

use crate::draw::render_line;
use crate::guard::ensure_rgb;
use crate::{OpsError, OpsResult};
use pixmill_core::{clamp_u8, PixelBuffer, RGB_CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Number of histogram bins, one per 8-bit value.
pub const BINS: usize = 256;

/// Lowest bin considered by [`find_peak`].
pub const PEAK_LO: usize = 10;

/// Highest bin considered by [`find_peak`].
pub const PEAK_HI: usize = 244;

/// Side length of the [`plot_histogram`] chart.
pub const PLOT_SIZE: usize = 256;

/// Spacing of the chart grid.
pub const GRID_STEP: usize = 32;

/// Grid colour.
pub const GRID_COLOR: [u8; 3] = [192, 192, 192];

/// Line colours, drawn in this order.
pub const CHANNEL_COLORS: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// Frequency table for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramTable {
    /// Count per value.
    pub bins: [u64; BINS],
}

impl Default for HistogramTable {
    fn default() -> Self {
        Self { bins: [0; BINS] }
    }
}

impl HistogramTable {
    /// Total number of samples counted.
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Largest bin count.
    pub fn max_count(&self) -> u64 {
        self.bins.iter().copied().max().unwrap_or(0)
    }
}

/// Counts the values of `channel` over every pixel.
pub fn compute_histogram(src: &PixelBuffer, channel: usize) -> OpsResult<HistogramTable> {
    if channel >= src.channels() {
        return Err(OpsError::InvalidParameter(format!(
            "channel {} out of range for {}-channel buffer",
            channel,
            src.channels()
        )));
    }
    let mut table = HistogramTable::default();
    for &v in src.plane(channel) {
        table.bins[v as usize] += 1;
    }
    Ok(table)
}

/// Index of the highest bin within `[PEAK_LO, PEAK_HI]`.
///
/// Ties keep the lowest index. Returns 0 when every bin in range is empty.
pub fn find_peak(hist: &HistogramTable) -> usize {
    let mut peak = 0;
    let mut max_count = 0;
    for i in PEAK_LO..=PEAK_HI {
        if hist.bins[i] > max_count {
            max_count = hist.bins[i];
            peak = i;
        }
    }
    peak
}

/// Offsets that move each channel's peak onto the floored mean peak.
pub fn compute_offsets(src: &PixelBuffer) -> OpsResult<[i32; 3]> {
    ensure_rgb(src, "compute-offsets")?;
    let mut peaks = [0i32; 3];
    for (c, peak) in peaks.iter_mut().enumerate() {
        *peak = find_peak(&compute_histogram(src, c)?) as i32;
    }
    let average = peaks.iter().sum::<i32>() / 3;
    let offsets = peaks.map(|p| average - p);
    debug!(?peaks, average, ?offsets, "histogram offsets");
    Ok(offsets)
}

/// Shifts every channel by its [`compute_offsets`] value, clamping.
pub fn color_correct(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(w = src.width(), h = src.height(), "color_correct");
    let offsets = compute_offsets(src)?;
    Ok(PixelBuffer::from_fn(src.width(), src.height(), RGB_CHANNELS, |c, row, col| {
        clamp_u8(src.get(c, row, col) as i64 + offsets[c] as i64)
    })?)
}

/// Renders the red, green and blue histograms as a 256x256 RGB line chart.
///
/// White background, a light grey grid every 32 pixels, then one polyline per
/// channel. All lines share `scale = 256 / max_count` over the three
/// channels; bin `i` is plotted at `(i, 256 - floor(count * scale))`.
pub fn plot_histogram(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(w = src.width(), h = src.height(), "plot_histogram");
    ensure_rgb(src, "histogram")?;
    let tables = [
        compute_histogram(src, 0)?,
        compute_histogram(src, 1)?,
        compute_histogram(src, 2)?,
    ];
    let max_count = tables.iter().map(HistogramTable::max_count).max().unwrap_or(0).max(1);
    let scale = PLOT_SIZE as f64 / max_count as f64;
    debug!(max_count, scale, "histogram plot scale");

    let mut chart = PixelBuffer::from_fn(PLOT_SIZE, PLOT_SIZE, RGB_CHANNELS, |_, _, _| 255)?;
    let edge = PLOT_SIZE as i64;
    for i in (0..=PLOT_SIZE).step_by(GRID_STEP) {
        let i = i as i64;
        render_line(&mut chart, i, 0, i, edge, &GRID_COLOR);
        render_line(&mut chart, 0, i, edge, i, &GRID_COLOR);
    }

    for (table, color) in tables.iter().zip(CHANNEL_COLORS) {
        let y = |i: usize| edge - (table.bins[i] as f64 * scale) as i64;
        for i in 0..BINS - 1 {
            render_line(&mut chart, i as i64, y(i), i as i64 + 1, y(i + 1), &color);
        }
    }
    Ok(chart)
}
