//! # Daybook
//!
//! A static site generator for a daily recovery readings website. One reading
//! per day of the year, grouped by theme, by step of the month, and by month.
//!
//! # Architecture: Fetch, Assemble, Generate
//!
//! ```text
//! 1. Fetch     data store  →  Fetched     (readings required, the rest optional)
//! 2. Assemble  Fetched     →  SiteData    (merge onto defaults, aggregate ratings)
//! 3. Generate  SiteData    →  dist/       (pages, social cards, sitemap, assets)
//! ```
//!
//! Every run is a full rebuild. The fetch stage is the only place the network
//! is touched, and the only remote failure that stops a run is the readings
//! fetch. Steps, themes, feedback and shares fall back to empty collections,
//! and steps and themes then come entirely from the hardcoded [`defaults`].
//!
//! After assembly the [`dataset::SiteData`] snapshot is immutable. Every
//! renderer takes it by reference and returns markup; "today" is an explicit
//! argument, so nothing reads the clock below `main`.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`datastore`] | PostgREST client behind the [`datastore::DataStore`] trait, one-shot fetch with fallbacks |
//! | [`defaults`] | Hardcoded steps, themes, books and static pages |
//! | [`merge`] | Overlay remote steps and themes onto the defaults, non-empty fields only |
//! | [`dataset`] | The frozen snapshot: lookups, ratings, theme feature selection |
//! | [`calendar`] | Fixed 366-day calendar: slugs, month tables, week windows |
//! | [`text`] | Paragraphs, meta descriptions, quote attribution |
//! | [`render`] | Maud page renderers and the shared layout |
//! | [`imaging`] | 1200×630 social cards: layout, SVG, resvg rasterizer, batching |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` |
//! | [`assets`] | Stylesheet variant check and static asset copy |
//! | [`generate`] | Orchestrates a full build |
//! | [`admin`] | Action contract for the browser-side admin app |
//! | [`config`] | `daybook.toml` loading, merging, validation, color CSS |
//! | [`types`] | Shared data types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Merge on Non-Empty
//!
//! A remote step or theme field replaces the default only when it carries a
//! value. Blank strings and empty lists never clear a default; the merge logs
//! a warning instead. Remote records that match no default are ignored, so the
//! set of steps and themes is fixed by the defaults.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error, interpolation is escaped
//! by default, and there is no template directory to ship.
//!
//! ## Pure-Rust Social Cards
//!
//! Cards are laid out as SVG and rasterized with `resvg`. No headless browser
//! and no system image tools. Rendering runs on the rayon pool in fixed-size
//! batches, which bounds how many pixmaps are alive at once.

pub mod admin;
pub mod assets;
pub mod calendar;
pub mod config;
pub mod dataset;
pub mod datastore;
pub mod defaults;
pub mod generate;
pub mod imaging;
pub mod merge;
pub mod output;
pub mod render;
pub mod sitemap;
pub mod text;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
