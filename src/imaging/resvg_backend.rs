//! Pure-Rust card rasterizer: usvg parses, resvg renders into a tiny-skia
//! pixmap, and the `image` crate encodes the PNG.
//!
//! Fonts come from `[og] fonts_dir` plus whatever the system provides. The
//! configured families are also registered as the generic serif and
//! sans-serif fallbacks, so a card still renders legibly when a named family
//! is missing.

use super::backend::{ImagingError, Rasterizer};
use super::layout::{CARD_HEIGHT, CARD_WIDTH};
use crate::config::OgConfig;
use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use resvg::tiny_skia;
use resvg::usvg::{self, fontdb};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ResvgRasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl ResvgRasterizer {
    pub fn new(fonts_dir: &Path, og: &OgConfig) -> Self {
        let mut db = fontdb::Database::new();
        if fonts_dir.is_dir() {
            db.load_fonts_dir(fonts_dir);
        } else {
            warn!(dir = %fonts_dir.display(), "fonts directory not found, using system fonts only");
        }
        db.load_system_fonts();
        db.set_serif_family(og.title_font.clone());
        db.set_sans_serif_family(og.label_font.clone());
        debug!(faces = db.len(), "font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str) -> Result<Vec<u8>, ImagingError> {
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree =
            usvg::Tree::from_str(svg, &options).map_err(|e| ImagingError::Svg(e.to_string()))?;

        let mut pixmap =
            tiny_skia::Pixmap::new(CARD_WIDTH, CARD_HEIGHT).ok_or(ImagingError::Pixmap {
                width: CARD_WIDTH,
                height: CARD_HEIGHT,
            })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        // The card paints an opaque background first, so premultiplied RGBA
        // is the same as straight RGBA here.
        let mut png = Vec::new();
        PngEncoder::new_with_quality(&mut png, CompressionType::Best, FilterType::Adaptive)
            .write_image(
                pixmap.data(),
                CARD_WIDTH,
                CARD_HEIGHT,
                image::ExtendedColorType::Rgba8,
            )?;
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::imaging::layout::{card_layout, to_svg};
    use crate::test_helpers::reading;

    #[test]
    fn renders_card_png() {
        let config = SiteConfig::default();
        let rasterizer = ResvgRasterizer::new(Path::new("does-not-exist"), &config.og);
        let svg = to_svg(
            &card_layout(&reading(1), &config.site),
            &config.og,
            &config.colors.light,
        );
        let png = rasterizer.rasterize(&svg).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), CARD_WIDTH);
        assert_eq!(decoded.height(), CARD_HEIGHT);
    }

    #[test]
    fn rejects_malformed_svg() {
        let config = SiteConfig::default();
        let rasterizer = ResvgRasterizer::new(Path::new("does-not-exist"), &config.og);
        assert!(matches!(
            rasterizer.rasterize("<svg"),
            Err(ImagingError::Svg(_))
        ));
    }
}
