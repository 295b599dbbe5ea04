//! `sitemap.xml` and `robots.txt`.
//!
//! The sitemap lists every indexable page with a priority and change
//! frequency hint. The admin shell and the 404 page are left out, and
//! robots.txt keeps crawlers out of `/admin/`.

use crate::calendar;
use crate::dataset::SiteData;
use crate::render::SiteContext;
use maud::html;

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Site-relative path.
    pub path: String,
    pub priority: &'static str,
    pub changefreq: &'static str,
}

fn entry(path: String, priority: &'static str, changefreq: &'static str) -> SitemapEntry {
    SitemapEntry {
        path,
        priority,
        changefreq,
    }
}

pub fn sitemap_entries(data: &SiteData) -> Vec<SitemapEntry> {
    let mut entries = vec![entry("/".into(), "1.0", "daily")];
    entries.extend(
        data.readings
            .iter()
            .map(|r| entry(format!("/{}/", r.slug()), "0.8", "yearly")),
    );
    entries.push(entry("/themes/".into(), "0.7", "weekly"));
    entries.extend(
        data.themes
            .iter()
            .map(|t| entry(format!("/themes/{}/", t.slug), "0.7", "weekly")),
    );
    entries.push(entry("/steps/".into(), "0.6", "monthly"));
    entries.extend(
        data.steps
            .iter()
            .map(|s| entry(format!("/steps/{}/", s.slug()), "0.6", "monthly")),
    );
    entries.extend(
        (0..12).map(|m| entry(format!("/months/{}/", calendar::month_slug(m)), "0.5", "monthly")),
    );
    entries.push(entry("/literature/".into(), "0.5", "monthly"));
    entries.extend(
        data.books
            .iter()
            .map(|b| entry(format!("/literature/{}/", b.slug), "0.5", "monthly")),
    );
    entries.extend(
        data.pages
            .iter()
            .map(|p| entry(format!("/{}/", p.slug), "0.3", "yearly")),
    );
    entries
}

pub fn render_sitemap(ctx: &SiteContext, entries: &[SitemapEntry]) -> String {
    let urls = html! {
        urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
            @for e in entries {
                url {
                    loc { (ctx.absolute(&e.path)) }
                    changefreq { (e.changefreq) }
                    priority { (e.priority) }
                }
            }
        }
    };
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n",
        urls.into_string()
    )
}

pub fn robots_txt(ctx: &SiteContext) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: {}\n\nSitemap: {}\n",
        ctx.link("/admin/"),
        ctx.absolute("/sitemap.xml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::config_with_base;
    use crate::test_helpers::{site_data, year_of_readings};

    #[test]
    fn one_entry_per_page() {
        let data = site_data(year_of_readings());
        let entries = sitemap_entries(&data);
        // home + readings + themes index + themes + steps index + steps
        // + months + literature index + books + static pages
        let expected = 1 + 366 + 1 + 12 + 1 + 12 + 12 + 1 + data.books.len() + data.pages.len();
        assert_eq!(entries.len(), expected);
        assert!(entries.iter().all(|e| !e.path.contains("admin")));
        assert_eq!(entries[1].path, "/january-1/");
    }

    #[test]
    fn sitemap_xml_uses_absolute_urls() {
        let config = config_with_base("/preview");
        let ctx = SiteContext::new(&config, "x");
        let xml = render_sitemap(&ctx, &[entry("/hope/".into(), "0.7", "weekly")]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://daybook.example.org/preview/hope/</loc>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
    }

    #[test]
    fn robots_blocks_admin_and_points_to_sitemap() {
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let robots = robots_txt(&ctx);
        assert!(robots.contains("Disallow: /admin/"));
        assert!(robots.contains("Sitemap: https://daybook.example.org/sitemap.xml"));
    }
}
