//! Site configuration module.
//!
//! Handles loading, validating, and merging `daybook.toml`. User values are
//! layered over stock defaults, so a config file only needs the keys it
//! wants to change. A missing file means "all defaults".
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Daybook"
//! url = "https://daybook.example.org"   # Canonical origin, no trailing slash
//! domain = "daybook.example.org"        # Written to CNAME
//! tagline = "One day at a time."
//! description = "Daily readings for people in recovery."
//! admin_endpoint = "/api/admin"         # Handed to the admin app
//!
//! [build]
//! output = "dist"
//! static_dir = "static"                 # css/, js/, assets/ live here
//! style = "b"                           # Stylesheet variant: css/style-<style>.css
//! base_path = ""                        # Prefix for every internal link
//! og_batch_size = 50                    # Cards rendered per parallel batch
//! optional_assets = ["favicon.ico", "favicon-32x32.png", "apple-touch-icon.png", "logo.png"]
//!
//! [datastore]
//! url_env = "DAYBOOK_DATASTORE_URL"
//! key_env = "DAYBOOK_DATASTORE_KEY"
//! timeout_secs = 30                     # 0 = wait forever
//!
//! [og]
//! fonts_dir = "static/fonts"
//! title_font = "Playfair Display"
//! quote_font = "Lora"
//! label_font = "Inter"
//!
//! [colors.light]  /  [colors.dark]
//! background, text, text_muted, border, link, link_hover, accent
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `daybook.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity and canonical URLs.
    pub site: SiteInfo,
    /// Output layout and asset locations.
    pub build: BuildConfig,
    /// Where to find data store credentials.
    pub datastore: DatastoreConfig,
    /// Social preview card fonts.
    pub og: OgConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.site.url.starts_with("http://") && !self.site.url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "site.url must start with http:// or https://".into(),
            ));
        }
        if self.build.og_batch_size == 0 {
            return Err(ConfigError::Validation(
                "build.og_batch_size must be at least 1".into(),
            ));
        }
        if !self.build.base_path.is_empty() && !self.build.base_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "build.base_path must be empty or start with '/'".into(),
            ));
        }
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    /// Canonical origin used for absolute URLs, sitemap and Open Graph tags.
    pub url: String,
    /// Bare domain written to the `CNAME` marker file.
    pub domain: String,
    pub tagline: String,
    pub description: String,
    /// Action-dispatch endpoint the admin app talks to.
    pub admin_endpoint: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Daybook".to_string(),
            url: "https://daybook.example.org".to_string(),
            domain: "daybook.example.org".to_string(),
            tagline: "One day at a time.".to_string(),
            description: "Daily readings, the Twelve Steps and recovery themes for people in recovery."
                .to_string(),
            admin_endpoint: "/api/admin".to_string(),
        }
    }
}

/// Which stylesheet variant is copied to `css/style.css`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StyleVariant {
    A,
    #[default]
    B,
}

impl StyleVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleVariant::A => "a",
            StyleVariant::B => "b",
        }
    }
}

/// Output layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub output: String,
    /// Source directory holding `css/`, `js/`, `assets/` and optional files.
    pub static_dir: String,
    pub style: StyleVariant,
    /// Prefix for internal links, e.g. `/preview`. Empty for root deploys.
    pub base_path: String,
    /// Number of social cards rendered concurrently per batch.
    pub og_batch_size: usize,
    /// Files copied from `static_dir` to the output root when present.
    pub optional_assets: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "dist".to_string(),
            static_dir: "static".to_string(),
            style: StyleVariant::default(),
            base_path: String::new(),
            og_batch_size: 50,
            optional_assets: vec![
                "favicon.ico".to_string(),
                "favicon-32x32.png".to_string(),
                "apple-touch-icon.png".to_string(),
                "logo.png".to_string(),
            ],
        }
    }
}

/// Strip a trailing slash and make sure a non-empty prefix starts with one.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Data store connection settings. Credentials themselves only ever come
/// from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatastoreConfig {
    /// Environment variable holding the REST base URL.
    pub url_env: String,
    /// Environment variable holding the anonymous API key.
    pub key_env: String,
    /// Whole-request timeout. `0` disables it.
    pub timeout_secs: u64,
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            url_env: "DAYBOOK_DATASTORE_URL".to_string(),
            key_env: "DAYBOOK_DATASTORE_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Social preview card fonts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OgConfig {
    /// Directory scanned for font files in addition to system fonts.
    pub fonts_dir: String,
    pub title_font: String,
    pub quote_font: String,
    pub label_font: String,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            fonts_dir: "static/fonts".to_string(),
            title_font: "Playfair Display".to_string(),
            quote_font: "Lora".to_string(),
            label_font: "Inter".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel card rendering workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme, also used for social cards.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Dates, breadcrumbs, captions.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Quote rules, step numbers, the card's site mark.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fbf8f3".to_string(),
            text: "#1f1d1a".to_string(),
            text_muted: "#6b645a".to_string(),
            border: "#e4ddd1".to_string(),
            link: "#2f5d62".to_string(),
            link_hover: "#1d3c40".to_string(),
            accent: "#b5754c".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1c2321".to_string(),
            text: "#f2ede4".to_string(),
            text_muted: "#a8a296".to_string(),
            border: "#3a4441".to_string(),
            link: "#9cc5c9".to_string(),
            link_hover: "#ffffff".to_string(),
            accent: "#e0a272".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: SiteConfig = merged.try_into()?;
    config.build.base_path = normalize_base_path(&config.build.base_path);
    config.site.url = config.site.url.trim_end_matches('/').to_string();
    config.validate()?;
    Ok(config)
}

/// Load config from the given file path.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `daybook.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Daybook Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
name = "Daybook"
# Canonical origin, used for absolute URLs, sitemap.xml and Open Graph tags.
url = "https://daybook.example.org"
# Written verbatim to the CNAME file in the output root.
domain = "daybook.example.org"
tagline = "One day at a time."
description = "Daily readings, the Twelve Steps and recovery themes for people in recovery."
# Action-dispatch endpoint handed to the admin app.
admin_endpoint = "/api/admin"

# ---------------------------------------------------------------------------
# Build output
# ---------------------------------------------------------------------------
[build]
output = "dist"
# Holds css/style-a.css, css/style-b.css, js/, assets/ and optional files.
static_dir = "static"
# Stylesheet variant copied to css/style.css ("a" or "b"). --version overrides.
style = "b"
# Prefix for every internal link, e.g. "/preview". --base-path overrides.
base_path = ""
# Social cards rendered concurrently per batch.
og_batch_size = 50
# Copied from static_dir to the output root when present; skipped otherwise.
optional_assets = ["favicon.ico", "favicon-32x32.png", "apple-touch-icon.png", "logo.png"]

# ---------------------------------------------------------------------------
# Data store
# ---------------------------------------------------------------------------
[datastore]
# Environment variables holding the REST base URL and the anonymous key.
# A .env file in the working directory is read first when present.
url_env = "DAYBOOK_DATASTORE_URL"
key_env = "DAYBOOK_DATASTORE_KEY"
# Whole-request timeout in seconds. 0 waits forever.
timeout_secs = 30

# ---------------------------------------------------------------------------
# Social preview cards (1200x630 PNG per reading)
# ---------------------------------------------------------------------------
[og]
# Scanned for .ttf/.otf files in addition to system fonts.
fonts_dir = "static/fonts"
title_font = "Playfair Display"
quote_font = "Lora"
label_font = "Inter"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light, and social cards)
# ---------------------------------------------------------------------------
[colors.light]
background = "#fbf8f3"
text = "#1f1d1a"
text_muted = "#6b645a"    # Dates, breadcrumbs, captions
border = "#e4ddd1"
link = "#2f5d62"
link_hover = "#1d3c40"
accent = "#b5754c"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#1c2321"
text = "#f2ede4"
text_muted = "#a8a296"
border = "#3a4441"
link = "#9cc5c9"
link_hover = "#ffffff"
accent = "#e0a272"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel card-rendering workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
        dark_accent = colors.dark.accent,
    )
}
