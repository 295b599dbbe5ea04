//! Static asset copy.
//!
//! ```text
//! static/                         dist/
//! ├── css/style-a.css   ─┐
//! ├── css/style-b.css   ─┴─ variant ─→  css/style.css
//! ├── js/**             ────────────→  js/**
//! ├── assets/**         ────────────→  assets/**
//! └── favicon.ico, ...  ── if present → favicon.ico, ...
//! ```
//!
//! The selected stylesheet is the only required file. Everything else is
//! copied when it exists and skipped quietly when it does not.

use crate::config::StyleVariant;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("stylesheet for variant '{variant}' not found at {}", path.display())]
    MissingStylesheet {
        variant: &'static str,
        path: PathBuf,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Directory trees mirrored into the output root.
const TREES: &[&str] = &["js", "assets"];

/// What [`copy_assets`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopyReport {
    pub files: usize,
    /// Optional files and trees that were not present.
    pub skipped: Vec<String>,
}

pub fn stylesheet_path(static_dir: &Path, variant: StyleVariant) -> PathBuf {
    static_dir
        .join("css")
        .join(format!("style-{}.css", variant.as_str()))
}

/// Fail early if the selected stylesheet variant is missing.
pub fn check_stylesheet(static_dir: &Path, variant: StyleVariant) -> Result<PathBuf, AssetError> {
    let path = stylesheet_path(static_dir, variant);
    if path.is_file() {
        Ok(path)
    } else {
        Err(AssetError::MissingStylesheet {
            variant: variant.as_str(),
            path,
        })
    }
}

fn copy_tree(src: &Path, dst: &Path) -> Result<usize, AssetError> {
    let mut files = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|source| AssetError::Walk {
            path: src.to_path_buf(),
            source,
        })?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            files += 1;
        }
    }
    Ok(files)
}

/// Copy the stylesheet variant, the asset trees and any optional files.
pub fn copy_assets(
    static_dir: &Path,
    out_dir: &Path,
    variant: StyleVariant,
    optional: &[String],
) -> Result<CopyReport, AssetError> {
    let mut report = CopyReport::default();

    let stylesheet = check_stylesheet(static_dir, variant)?;
    let css_dir = out_dir.join("css");
    fs::create_dir_all(&css_dir)?;
    fs::copy(&stylesheet, css_dir.join("style.css"))?;
    report.files += 1;

    for tree in TREES {
        let src = static_dir.join(tree);
        if src.is_dir() {
            report.files += copy_tree(&src, &out_dir.join(tree))?;
        } else {
            debug!(tree, "asset tree not present, skipping");
            report.skipped.push(format!("{tree}/"));
        }
    }

    for name in optional {
        let src = static_dir.join(name);
        if src.is_file() {
            fs::copy(&src, out_dir.join(name))?;
            report.files += 1;
        } else {
            debug!(file = %name, "optional asset not present, skipping");
            report.skipped.push(name.clone());
        }
    }

    Ok(report)
}
