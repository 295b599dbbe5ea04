//! HTML page renderers.
//!
//! Every renderer is a plain function from the frozen [`SiteData`] snapshot
//! (plus whatever entity it is rendering) to [`Markup`]. None of them touch
//! the filesystem; [`crate::generate`] decides where the output goes.
//!
//! All pages share [`layout`], which owns the `<head>` (title, description,
//! canonical URL, Open Graph and Twitter tags, optional JSON-LD), the site
//! header and the footer. Optional sections are left out entirely when their
//! content is empty, never rendered as an empty shell.
//!
//! ## Page Map
//!
//! ```text
//! /                        home          today's reading, step of the month
//! /{month}-{day}/          reading       one per day, 366 total
//! /themes/                 themes_index
//! /themes/{slug}/          theme         featured + additional readings
//! /steps/                  steps_index
//! /steps/step-{n}/         step          first 5 readings of its month
//! /months/{month}/         month         four week windows
//! /literature/             literature_index
//! /literature/{slug}/      book
//! /{about|privacy|contact}/ static_page
//! /admin/                  admin_shell   noindex
//! /404.html                not_found     noindex
//! ```
//!
//! Internal links go through [`SiteContext::link`] so a `--base-path` prefix
//! applies everywhere.

mod home;
mod literature;
mod months;
mod pages;
mod reading;
mod steps;
mod themes;

pub use home::home;
pub use literature::{book, book_path, literature_index};
pub use months::{month, month_path};
pub use pages::{admin_shell, not_found, static_page};
pub use reading::{og_image_path, reading};
pub use steps::{step, step_path, steps_index};
pub use themes::{theme, theme_path, themes_index};

use crate::calendar;
use crate::config::{self, SiteConfig};
use crate::dataset::SiteData;
use crate::text;
use crate::types::Reading;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a renderer needs besides the data: config, link prefix and
/// the build version stamped into the generator tag.
pub struct SiteContext<'a> {
    pub config: &'a SiteConfig,
    pub version: &'a str,
    color_css: String,
}

impl<'a> SiteContext<'a> {
    pub fn new(config: &'a SiteConfig, version: &'a str) -> Self {
        Self {
            config,
            version,
            color_css: config::generate_color_css(&config.colors),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.config.build.base_path
    }

    /// Site-relative path with the base path prepended: `/themes/` → `/preview/themes/`.
    pub fn link(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_path(), path)
    }

    /// Absolute URL on the canonical origin.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.config.site.url, self.link(path))
    }

    pub fn site_name(&self) -> &str {
        &self.config.site.name
    }
}

/// Head metadata for one page.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    /// Already stripped and truncated for `<meta>`.
    pub description: String,
    /// Site-relative path of the page, e.g. `/january-1/`.
    pub path: String,
    /// Site-relative social image path.
    pub og_image: Option<String>,
    pub og_type: &'static str,
    pub json_ld: Option<serde_json::Value>,
    pub noindex: bool,
    pub body_class: &'static str,
}

impl PageMeta {
    pub fn new(title: &str, description: &str, path: &str) -> Self {
        Self {
            title: title.to_string(),
            description: text::meta_description(description),
            path: path.to_string(),
            og_image: None,
            og_type: "website",
            json_ld: None,
            noindex: false,
            body_class: "page",
        }
    }

    pub fn with_image(mut self, path: String) -> Self {
        self.og_image = Some(path);
        self
    }

    pub fn with_json_ld(mut self, value: serde_json::Value) -> Self {
        self.json_ld = Some(value);
        self
    }

    pub fn article(mut self) -> Self {
        self.og_type = "article";
        self
    }

    pub fn noindex(mut self) -> Self {
        self.noindex = true;
        self
    }

    pub fn class(mut self, body_class: &'static str) -> Self {
        self.body_class = body_class;
        self
    }
}

const NAV: &[(&str, &str)] = &[
    ("Today", "/"),
    ("Themes", "/themes/"),
    ("Steps", "/steps/"),
    ("Literature", "/literature/"),
    ("About", "/about/"),
];

fn is_current(item_path: &str, page_path: &str) -> bool {
    if item_path == "/" {
        page_path == "/"
    } else {
        page_path.starts_with(item_path)
    }
}

/// Wrap a page body in the shared document shell.
pub fn layout(ctx: &SiteContext, meta: &PageMeta, body: Markup) -> Markup {
    let site = &ctx.config.site;
    let full_title = if meta.title == site.name {
        meta.title.clone()
    } else {
        format!("{} | {}", meta.title, site.name)
    };
    let canonical = ctx.absolute(&meta.path);
    let og_image = meta.og_image.as_deref().map(|p| ctx.absolute(p));
    // `</script>` inside a JSON string would end the block early.
    let json_ld = meta
        .json_ld
        .as_ref()
        .map(|v| v.to_string().replace("</", "<\\/"));

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(canonical);
                @if meta.noindex {
                    meta name="robots" content="noindex";
                }
                meta property="og:site_name" content=(site.name);
                meta property="og:title" content=(meta.title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(canonical);
                meta property="og:type" content=(meta.og_type);
                @if let Some(image) = &og_image {
                    meta property="og:image" content=(image);
                    meta property="og:image:width" content="1200";
                    meta property="og:image:height" content="630";
                    meta name="twitter:card" content="summary_large_image";
                    meta name="twitter:image" content=(image);
                } @else {
                    meta name="twitter:card" content="summary";
                }
                meta name="twitter:title" content=(meta.title);
                meta name="twitter:description" content=(meta.description);
                meta name="generator" content={ "daybook " (ctx.version) };
                meta name="theme-color" content=(ctx.config.colors.light.background);
                link rel="icon" href=(ctx.link("/favicon.ico"));
                style { (PreEscaped(&ctx.color_css)) }
                link rel="stylesheet" href=(ctx.link("/css/style.css"));
                @if let Some(json) = json_ld {
                    script type="application/ld+json" { (PreEscaped(json)) }
                }
                script src=(ctx.link("/js/site.js")) defer {}
            }
            body class=(meta.body_class) data-base-path=(ctx.base_path()) {
                (site_header(ctx, &meta.path))
                main #content { (body) }
                (site_footer(ctx))
            }
        }
    }
}

fn site_header(ctx: &SiteContext, current: &str) -> Markup {
    html! {
        header.site-header {
            a.site-mark href=(ctx.link("/")) {
                span.site-name { (ctx.site_name()) }
                span.site-tagline { (ctx.config.site.tagline) }
            }
            nav.site-nav aria-label="Main" {
                ul {
                    @for (label, path) in NAV {
                        li class=[is_current(path, current).then_some("current")] {
                            a href=(ctx.link(path)) { (label) }
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(ctx: &SiteContext) -> Markup {
    html! {
        footer.site-footer {
            nav.month-nav aria-label="Months" {
                @for month in 0..12 {
                    a href=(ctx.link(&format!("/months/{}/", calendar::month_slug(month)))) {
                        (calendar::month_name(month))
                    }
                }
            }
            nav.footer-links {
                a href=(ctx.link("/about/")) { "About" }
                a href=(ctx.link("/privacy/")) { "Privacy" }
                a href=(ctx.link("/contact/")) { "Contact" }
            }
            p.footer-note { (ctx.site_name()) " · " (ctx.config.site.tagline) }
        }
    }
}

/// Render trusted markdown shipped with the binary.
pub fn markdown(source: &str) -> Markup {
    let parser = Parser::new(source);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

/// Site-relative path of a reading page.
pub fn reading_path(reading: &Reading) -> String {
    format!("/{}/", reading.slug())
}

/// Compact list of readings linking to their pages.
pub fn reading_list(ctx: &SiteContext, readings: &[&Reading]) -> Markup {
    html! {
        ul.reading-list {
            @for reading in readings {
                li {
                    a href=(ctx.link(&reading_path(reading))) {
                        span.reading-date { (reading.date_label()) }
                        " "
                        span.reading-title { (reading.display_title()) }
                    }
                }
            }
        }
    }
}

/// Bulleted list section, omitted when `items` is empty.
pub fn list_section(heading: &str, class: &str, items: &[String]) -> Markup {
    html! {
        @if !items.is_empty() {
            section class=(class) {
                h2 { (heading) }
                ul {
                    @for item in items {
                        li { (PreEscaped(text::inline_markdown(item))) }
                    }
                }
            }
        }
    }
}

/// Pull quote, omitted when empty.
pub fn pull_quote(quote: &str) -> Markup {
    html! {
        @if !quote.trim().is_empty() {
            aside.pull-quote { p { (quote) } }
        }
    }
}

/// Previous/next links around a reading.
pub fn reading_pager(ctx: &SiteContext, data: &SiteData, index: usize) -> Markup {
    if data.readings.len() < 2 {
        return html! {};
    }
    let (prev, next) = data.reading_neighbors(index);
    html! {
        nav.reading-pager aria-label="Adjacent readings" {
            a.prev rel="prev" href=(ctx.link(&reading_path(prev))) {
                span.label { "Previous" }
                span.date { (prev.date_label()) }
            }
            a.next rel="next" href=(ctx.link(&reading_path(next))) {
                span.label { "Next" }
                span.date { (next.date_label()) }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::SiteConfig;

    pub fn config_with_base(base: &str) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.base_path = base.to_string();
        config
    }

    #[test]
    fn link_respects_base_path() {
        let config = config_with_base("/preview");
        let ctx = SiteContext::new(&config, "test");
        assert_eq!(ctx.link("/themes/"), "/preview/themes/");
        assert_eq!(ctx.link("css/style.css"), "/preview/css/style.css");
        assert_eq!(ctx.link("/"), "/preview/");
    }

    #[test]
    fn link_without_base_path() {
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "test");
        assert_eq!(ctx.link("/"), "/");
        assert_eq!(
            ctx.absolute("/january-1/"),
            "https://daybook.example.org/january-1/"
        );
    }

    #[test]
    fn layout_head_metadata() {
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "1.2.3");
        let meta = PageMeta::new("Gratitude", "About gratitude.", "/themes/gratitude/")
            .with_image("/january-1/og.png".into());
        let html = layout(&ctx, &meta, html! { p { "body" } }).into_string();
        assert!(html.contains("<title>Gratitude | Daybook</title>"));
        assert!(html.contains(
            r#"<link rel="canonical" href="https://daybook.example.org/themes/gratitude/">"#
        ));
        assert!(html.contains(r#"content="https://daybook.example.org/january-1/og.png""#));
        assert!(html.contains("summary_large_image"));
        assert!(html.contains(r#"<meta name="generator" content="daybook 1.2.3">"#));
        assert!(html.contains("--color-bg"));
        assert!(!html.contains("noindex"));
        assert!(!html.contains("application/ld+json"));
    }

    #[test]
    fn layout_json_ld_cannot_close_script() {
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let meta = PageMeta::new("T", "D", "/")
            .with_json_ld(serde_json::json!({"name": "</script><b>"}));
        let html = layout(&ctx, &meta, html! {}).into_string();
        assert!(html.contains("application/ld+json"));
        assert!(html.contains(r"<\/script>"));
    }

    #[test]
    fn meta_description_is_truncated() {
        let long = "word ".repeat(100);
        let meta = PageMeta::new("T", &long, "/");
        assert!(meta.description.chars().count() <= text::META_DESCRIPTION_MAX);
    }

    #[test]
    fn nav_marks_current_section() {
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let html = site_header(&ctx, "/themes/hope/").into_string();
        assert!(html.contains(r#"<li class="current"><a href="/themes/">Themes</a>"#));
        assert!(!html.contains(r#"<li class="current"><a href="/">"#));
    }

    #[test]
    fn empty_sections_render_nothing() {
        assert_eq!(list_section("Tools", "tools", &[]).into_string(), "");
        assert_eq!(pull_quote("  ").into_string(), "");
    }
}
