//! Rasterizer trait and shared error type.
//!
//! The production implementation is
//! [`ResvgRasterizer`](super::resvg_backend::ResvgRasterizer). Tests use the
//! [`MockRasterizer`](tests::MockRasterizer), which records every call and
//! returns a fixed byte string instead of a PNG.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid card SVG: {0}")]
    Svg(String),
    #[error("could not allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("card for {slug}: {source}")]
    Card {
        slug: String,
        #[source]
        source: Box<ImagingError>,
    },
}

/// Turns a card SVG into encoded PNG bytes.
///
/// `Sync` because cards within a batch are rendered in parallel.
pub trait Rasterizer: Sync {
    fn rasterize(&self, svg: &str) -> Result<Vec<u8>, ImagingError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records each SVG it is given. Uses Mutex (not RefCell) so it is Sync
    /// and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockRasterizer {
        pub calls: Mutex<Vec<String>>,
        /// Fail when the SVG contains this text.
        pub fail_on: Option<String>,
    }

    impl MockRasterizer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(needle: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: Some(needle.to_string()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Rasterizer for MockRasterizer {
        fn rasterize(&self, svg: &str) -> Result<Vec<u8>, ImagingError> {
            self.calls.lock().unwrap().push(svg.to_string());
            match &self.fail_on {
                Some(needle) if svg.contains(needle.as_str()) => {
                    Err(ImagingError::Svg(format!("mock failure on {needle}")))
                }
                _ => Ok(b"PNG".to_vec()),
            }
        }
    }

    #[test]
    fn mock_records_calls() {
        let mock = MockRasterizer::new();
        assert_eq!(mock.rasterize("<svg/>").unwrap(), b"PNG");
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn mock_fails_on_needle() {
        let mock = MockRasterizer::failing_on("boom");
        assert!(mock.rasterize("<svg>boom</svg>").is_err());
        assert!(mock.rasterize("<svg/>").is_ok());
    }
}
