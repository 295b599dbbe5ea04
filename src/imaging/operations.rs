//! Batch card rendering.
//!
//! Readings are split into fixed-size batches. Each batch is rendered in
//! parallel on the rayon pool and fully written before the next one starts,
//! which caps how many pixmaps are alive at once. A failure anywhere in a
//! batch aborts the run; there is no per-card isolation.

use super::backend::{ImagingError, Rasterizer};
use super::layout::{card_layout, to_svg};
use crate::config::SiteConfig;
use crate::types::Reading;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::debug;

/// File name of the card inside each reading's directory.
pub const CARD_FILE: &str = "og.png";

fn write_card(
    reading: &Reading,
    config: &SiteConfig,
    rasterizer: &impl Rasterizer,
    dir: &Path,
) -> Result<(), ImagingError> {
    let svg = to_svg(
        &card_layout(reading, &config.site),
        &config.og,
        &config.colors.light,
    );
    let png = rasterizer.rasterize(&svg)?;
    fs::create_dir_all(dir)?;
    fs::write(dir.join(CARD_FILE), png)?;
    Ok(())
}

fn render_one(
    reading: &Reading,
    config: &SiteConfig,
    rasterizer: &impl Rasterizer,
    out_dir: &Path,
) -> Result<(), ImagingError> {
    let slug = reading.slug();
    write_card(reading, config, rasterizer, &out_dir.join(&slug)).map_err(|source| {
        ImagingError::Card {
            slug,
            source: Box::new(source),
        }
    })
}

/// Render a card for every reading into `out_dir/{slug}/og.png`.
///
/// Returns the number of cards written.
pub fn render_cards(
    readings: &[Reading],
    config: &SiteConfig,
    rasterizer: &impl Rasterizer,
    out_dir: &Path,
    batch_size: usize,
) -> Result<usize, ImagingError> {
    let batch_size = batch_size.max(1);
    let mut written = 0;
    for (n, batch) in readings.chunks(batch_size).enumerate() {
        batch
            .par_iter()
            .try_for_each(|reading| render_one(reading, config, rasterizer, out_dir))?;
        written += batch.len();
        debug!(batch = n + 1, cards = written, "card batch done");
    }
    Ok(written)
}
