use super::{PageMeta, SiteContext, layout, list_section, pull_quote, reading_list};
use crate::dataset::SiteData;
use crate::text;
use crate::types::{MemberShare, Theme};
use maud::{Markup, html};
use serde_json::json;

pub fn theme_path(theme: &Theme) -> String {
    format!("/themes/{}/", theme.slug)
}

pub fn themes_index(ctx: &SiteContext, data: &SiteData) -> Markup {
    let meta = PageMeta::new(
        "Themes",
        "Recovery themes: acceptance, gratitude, fear, resentment and more, each with daily readings and tools for practice.",
        "/themes/",
    )
    .class("themes-index");

    let body = html! {
        h1 { "Themes" }
        ul.theme-grid {
            @for theme in &data.themes {
                li.theme-card {
                    a href=(ctx.link(&theme_path(theme))) {
                        h2 { (theme.name) }
                    }
                    @if !theme.short_description.trim().is_empty() {
                        p { (theme.short_description) }
                    }
                }
            }
        }
    };
    layout(ctx, &meta, body)
}

pub fn theme(ctx: &SiteContext, data: &SiteData, theme: &Theme) -> Markup {
    let picked = data.theme_readings(theme);
    let shares = data.shares_for_theme(&theme.slug);
    let path = theme_path(theme);

    let description = if theme.meta_description.trim().is_empty() {
        &theme.short_description
    } else {
        &theme.meta_description
    };
    let meta = PageMeta::new(&theme.name, description, &path)
        .with_json_ld(json!({
            "@context": "https://schema.org",
            "@type": "CollectionPage",
            "name": theme.name,
            "url": ctx.absolute(&path),
            "about": theme.theme_tags,
        }))
        .class("theme-page");

    let body = html! {
        article.theme {
            header {
                p.breadcrumb { a href=(ctx.link("/themes/")) { "Themes" } }
                h1 { (theme.name) }
                @if !theme.short_description.trim().is_empty() {
                    p.lede { (theme.short_description) }
                }
            }
            @if !theme.image.trim().is_empty() {
                figure.theme-image {
                    img src=(ctx.link(&theme.image)) alt=(theme.name) loading="lazy";
                }
            }
            @if !theme.body.trim().is_empty() {
                div.theme-body { (text::paragraphs(&theme.body)) }
            }
            (pull_quote(&theme.pull_quote))
            @if !picked.featured.is_empty() {
                section.featured-readings data-source=(picked.source.as_str()) {
                    h2 { "Featured readings" }
                    (reading_list(ctx, &picked.featured))
                }
            }
            @if !picked.additional.is_empty() {
                section.additional-readings {
                    h2 { "More readings on " (theme.name) }
                    (reading_list(ctx, &picked.additional))
                }
            }
            (list_section("Tools for practice", "tools", &theme.tools))
            @if !shares.is_empty() {
                section.member-shares {
                    h2 { "From the community" }
                    @for share in &shares {
                        (share_block(share))
                    }
                }
            }
        }
    };
    layout(ctx, &meta, body)
}

fn share_block(share: &MemberShare) -> Markup {
    html! {
        blockquote.share.featured[share.featured] {
            (text::paragraphs(&share.content))
            footer { cite { (share.author()) } }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::aggregate_ratings;
    use crate::render::tests::config_with_base;
    use crate::test_helpers::*;
    use crate::types::Sentiment;

    fn render(data: &SiteData, slug: &str) -> String {
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let theme = data.theme_by_slug(slug).unwrap();
        super::theme(&ctx, data, theme).into_string()
    }

    #[test]
    fn curated_theme_page() {
        let mut readings = year_of_readings();
        tag(&mut readings, &[7], "Acceptance");
        let data = site_data(readings);
        let html = render(&data, "acceptance");
        assert!(html.contains(r#"data-source="curated""#));
        assert!(html.contains("Featured readings"));
        assert!(html.contains("More readings on Acceptance"));
        assert!(html.contains(r#"href="/january-7/""#));
        assert!(html.contains("Tools for practice"));
        assert!(!html.contains("From the community"));
    }

    #[test]
    fn rated_theme_page() {
        let mut readings = year_of_readings();
        tag(&mut readings, &[7], "Acceptance");
        let mut data = site_data(readings);
        data.ratings = aggregate_ratings(&[feedback(7, Sentiment::Positive)]);
        let html = render(&data, "acceptance");
        assert!(html.contains(r#"data-source="ratings""#));
        assert!(!html.contains("More readings on"));
    }

    #[test]
    fn shares_render_with_author() {
        let mut data = site_data(year_of_readings());
        data.shares = vec![share("1", "hope", true, "2024-01-01")];
        let html = render(&data, "hope");
        assert!(html.contains("From the community"));
        assert!(html.contains("<cite>Member 1</cite>"));
        assert!(html.contains("share featured"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut data = site_data(vec![reading(1)]);
        for theme in &mut data.themes {
            theme.tools.clear();
            theme.pull_quote.clear();
            theme.image.clear();
        }
        let html = render(&data, "fear");
        assert!(!html.contains("Tools for practice"));
        assert!(!html.contains("pull-quote"));
        assert!(!html.contains("<figure"));
        // None of fear's curated days exist in this dataset.
        assert!(!html.contains("Featured readings"));
    }

    #[test]
    fn index_lists_every_theme() {
        let data = site_data(vec![reading(1)]);
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let html = themes_index(&ctx, &data).into_string();
        for theme in &data.themes {
            assert!(html.contains(&format!(r#"href="/themes/{}/""#, theme.slug)));
        }
    }
}
