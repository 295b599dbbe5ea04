//! Social preview cards: one 1200×630 PNG per reading.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Layout** | [`card_layout`]: three rows, quote truncated to 140 chars, `textwrap` |
//! | **SVG** | [`to_svg`]: `maud` |
//! | **Raster** | `usvg` + `resvg` + `tiny-skia` |
//! | **PNG** | `image` PNG encoder, best compression |
//!
//! The module is split into:
//! - **Layout**: what goes on a card and where (pure, unit testable)
//! - **Backend**: [`Rasterizer`] trait + error type
//! - **Resvg backend**: [`ResvgRasterizer`], the production rasterizer
//! - **Operations**: [`render_cards`], batched parallel rendering

pub mod backend;
pub mod layout;
pub mod operations;
pub mod resvg_backend;

pub use backend::{ImagingError, Rasterizer};
pub use layout::{CARD_HEIGHT, CARD_QUOTE_MAX, CARD_WIDTH, CardLayout, card_layout, to_svg};
pub use operations::{CARD_FILE, render_cards};
pub use resvg_backend::ResvgRasterizer;
