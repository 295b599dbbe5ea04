//! Site generation.
//!
//! The final pipeline stage. Takes the assembled [`SiteData`] snapshot and
//! writes the complete static site.
//!
//! ## Sequence
//!
//! 1. Check the selected stylesheet variant exists (before anything is deleted)
//! 2. Remove and recreate the output directory
//! 3. Pre-create every page directory
//! 4. Render and write all HTML pages, counting them
//! 5. Render one social card per reading, in batches
//! 6. Write `sitemap.xml` and `robots.txt`
//! 7. Copy static assets
//! 8. Write the `CNAME` domain marker
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── january-1/
//! │   ├── index.html
//! │   └── og.png
//! ├── ...
//! ├── themes/{index.html, acceptance/index.html, ...}
//! ├── steps/{index.html, step-1/index.html, ...}
//! ├── months/{january/index.html, ...}
//! ├── literature/{index.html, daybook/index.html, ...}
//! ├── about/ privacy/ contact/ admin/
//! ├── css/style.css
//! ├── js/ assets/
//! ├── sitemap.xml
//! ├── robots.txt
//! └── CNAME
//! ```

use crate::assets::{self, AssetError, CopyReport};
use crate::calendar;
use crate::config::SiteConfig;
use crate::dataset::{FeatureSource, SiteData};
use crate::datastore::{self, DataError, DataStore};
use crate::defaults::Defaults;
use crate::imaging::{self, ImagingError, Rasterizer};
use crate::render::{self, RenderError, SiteContext};
use crate::sitemap;
use maud::Markup;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("image error: {0}")]
    Imaging(#[from] ImagingError),
    #[error("refusing to use {} as the output directory", .0.display())]
    UnsafeOutput(PathBuf),
}

/// Static page directories that exist regardless of data.
const FIXED_DIRS: &[&str] = &["themes", "steps", "months", "literature", "admin"];

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub pages: usize,
    pub cards: usize,
    /// Feature selection used by each theme page, in theme order.
    pub theme_sources: Vec<(String, FeatureSource)>,
    /// Optional collections replaced by fallbacks this run.
    pub degraded: Vec<&'static str>,
    pub assets: CopyReport,
    pub elapsed: Duration,
}

/// Map a site-relative page path to the file it is written to.
///
/// `/` and `/x/y/` map to `index.html` inside the directory; anything else
/// is taken as a file name.
fn page_file(out: &Path, path: &str) -> PathBuf {
    let rel = path.trim_start_matches('/');
    if rel.is_empty() || rel.ends_with('/') {
        out.join(rel).join("index.html")
    } else {
        out.join(rel)
    }
}

/// Writes pages and counts them.
struct PageWriter<'a> {
    out: &'a Path,
    count: usize,
}

impl PageWriter<'_> {
    fn write(&mut self, path: &str, page: Markup) -> Result<(), GenerateError> {
        let file = page_file(self.out, path);
        fs::write(&file, page.into_string())?;
        self.count += 1;
        debug!(path, "wrote page");
        Ok(())
    }
}

fn check_output_dir(out: &Path) -> Result<(), GenerateError> {
    let dangerous = out.as_os_str().is_empty() || out == Path::new("/") || out == Path::new(".");
    if dangerous {
        return Err(GenerateError::UnsafeOutput(out.to_path_buf()));
    }
    Ok(())
}

fn recreate_dir(out: &Path) -> Result<(), GenerateError> {
    check_output_dir(out)?;
    if out.exists() {
        fs::remove_dir_all(out)?;
    }
    fs::create_dir_all(out)?;
    Ok(())
}

/// One directory per reading, theme, step, month, book and static page, plus
/// the fixed section roots.
fn page_dirs(data: &SiteData) -> Vec<String> {
    let mut dirs: Vec<String> = FIXED_DIRS.iter().map(|d| d.to_string()).collect();
    dirs.extend(data.readings.iter().map(|r| r.slug()));
    dirs.extend(data.themes.iter().map(|t| format!("themes/{}", t.slug)));
    dirs.extend(data.steps.iter().map(|s| format!("steps/{}", s.slug())));
    dirs.extend((0..12).map(|m| format!("months/{}", calendar::month_slug(m))));
    dirs.extend(data.books.iter().map(|b| format!("literature/{}", b.slug)));
    dirs.extend(data.pages.iter().map(|p| p.slug.clone()));
    dirs
}

fn write_pages(
    ctx: &SiteContext,
    data: &SiteData,
    today: u16,
    out: &Path,
) -> Result<usize, GenerateError> {
    let mut pages = PageWriter { out, count: 0 };

    pages.write("/", render::home(ctx, data, today))?;

    for (i, reading) in data.readings.iter().enumerate() {
        pages.write(&render::reading_path(reading), render::reading(ctx, data, i))?;
    }
    info!(count = data.readings.len(), "reading pages written");

    pages.write("/themes/", render::themes_index(ctx, data))?;
    for theme in &data.themes {
        pages.write(&render::theme_path(theme), render::theme(ctx, data, theme))?;
    }

    for page in &data.pages {
        pages.write(&format!("/{}/", page.slug), render::static_page(ctx, page))?;
    }
    pages.write("/admin/", render::admin_shell(ctx)?)?;

    pages.write("/steps/", render::steps_index(ctx, data))?;
    for step in &data.steps {
        pages.write(&render::step_path(step), render::step(ctx, data, step))?;
    }

    for month in 0..12 {
        pages.write(&render::month_path(month), render::month(ctx, data, month))?;
    }

    pages.write("/literature/", render::literature_index(ctx, &data.books))?;
    for book in &data.books {
        pages.write(&render::book_path(book), render::book(ctx, book))?;
    }

    pages.write("/404.html", render::not_found(ctx))?;

    Ok(pages.count)
}

/// Write the whole site for `data` into `config.build.output`.
///
/// `today` is the day-of-year shown on the home page.
pub fn generate(
    data: &SiteData,
    config: &SiteConfig,
    rasterizer: &impl Rasterizer,
    today: u16,
    version: &str,
) -> Result<BuildSummary, GenerateError> {
    let start = Instant::now();
    let out = Path::new(&config.build.output);
    let static_dir = Path::new(&config.build.static_dir);

    assets::check_stylesheet(static_dir, config.build.style)?;

    recreate_dir(out)?;
    for dir in page_dirs(data) {
        fs::create_dir_all(out.join(dir))?;
    }

    let ctx = SiteContext::new(config, version);
    let pages = write_pages(&ctx, data, today, out)?;
    info!(pages, "pages written");

    let cards = imaging::render_cards(
        &data.readings,
        config,
        rasterizer,
        out,
        config.build.og_batch_size,
    )?;
    info!(cards, "social cards written");

    let entries = sitemap::sitemap_entries(data);
    fs::write(out.join("sitemap.xml"), sitemap::render_sitemap(&ctx, &entries))?;
    fs::write(out.join("robots.txt"), sitemap::robots_txt(&ctx))?;

    let assets = assets::copy_assets(
        static_dir,
        out,
        config.build.style,
        &config.build.optional_assets,
    )?;
    info!(files = assets.files, "static assets copied");

    fs::write(out.join("CNAME"), format!("{}\n", config.site.domain))?;

    let theme_sources = data
        .themes
        .iter()
        .map(|t| (t.slug.clone(), data.theme_readings(t).source))
        .collect();

    Ok(BuildSummary {
        output: out.to_path_buf(),
        pages,
        cards,
        theme_sources,
        degraded: Vec::new(),
        assets,
        elapsed: start.elapsed(),
    })
}

/// Fetch, assemble and generate in one run.
pub fn build(
    store: &impl DataStore,
    config: &SiteConfig,
    rasterizer: &impl Rasterizer,
    today: u16,
    version: &str,
) -> Result<BuildSummary, GenerateError> {
    let start = Instant::now();
    let fetched = datastore::fetch_all(store)?;
    let degraded = fetched.degraded.clone();
    let data = SiteData::assemble(fetched, Defaults::stock());

    let mut summary = generate(&data, config, rasterizer, today, version)?;
    summary.degraded = degraded;
    summary.elapsed = start.elapsed();
    Ok(summary)
}
