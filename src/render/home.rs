use super::reading::{article, og_image_path};
use super::{PageMeta, SiteContext, layout, reading_pager};
use crate::calendar;
use crate::dataset::SiteData;
use maud::{Markup, html};
use serde_json::json;

/// The home page, built around the reading for `today` (day-of-year).
///
/// When no reading exists for `today` the first reading of the year is shown
/// instead. `today` is a parameter so the page can be rendered for any date.
pub fn home(ctx: &SiteContext, data: &SiteData, today: u16) -> Markup {
    let site = &ctx.config.site;
    let index = data.today_index(today);
    let featured = data.readings.get(index);

    let mut meta = PageMeta::new(&site.name, &site.description, "/")
        .with_json_ld(json!({
            "@context": "https://schema.org",
            "@type": "WebSite",
            "name": site.name,
            "url": ctx.absolute("/"),
            "description": site.description,
        }))
        .class("home-page");
    if let Some(reading) = featured {
        meta = meta.with_image(og_image_path(reading));
    }

    let month = featured
        .map(|r| calendar::day_to_month_index(r.day_of_year))
        .unwrap_or_else(|| calendar::day_to_month_index(today));
    let step = data.step_for_month(month);

    let body = html! {
        section.hero {
            h1 { (site.name) }
            p.tagline { (site.tagline) }
        }
        @if let Some(reading) = featured {
            section.today data-day=(reading.day_of_year) {
                h2.section-label { "Today's reading" }
                (article(ctx, data, reading))
                (reading_pager(ctx, data, index))
            }
        }
        @if let Some(step) = step {
            section.step-of-month {
                h2 { "This month: Step " (step.number) }
                p.step-text { (step.text) }
                @if !step.hook.trim().is_empty() {
                    p.hook { (step.hook) }
                }
                a href=(ctx.link(&format!("/steps/{}/", step.slug()))) {
                    "Explore Step " (step.number) ": " (step.principle)
                }
            }
        }
        @if !data.themes.is_empty() {
            section.theme-teaser {
                h2 { "Themes" }
                ul.theme-grid {
                    @for theme in &data.themes {
                        li {
                            a href=(ctx.link(&format!("/themes/{}/", theme.slug))) { (theme.name) }
                            @if !theme.short_description.trim().is_empty() {
                                p { (theme.short_description) }
                            }
                        }
                    }
                }
            }
        }
    };
    layout(ctx, &meta, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::config_with_base;
    use crate::test_helpers::{site_data, year_of_readings};

    #[test]
    fn picks_reading_for_today() {
        let data = site_data(year_of_readings());
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let html = home(&ctx, &data, 61).into_string();
        assert!(html.contains("<h1>Reading for day 61</h1>"));
        assert!(html.contains("This month: Step 3"));
        assert!(html.contains(r#"href="/steps/step-3/""#));
    }

    #[test]
    fn falls_back_to_first_reading() {
        let data = site_data(vec![
            crate::test_helpers::reading(5),
            crate::test_helpers::reading(6),
        ]);
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let html = home(&ctx, &data, 200).into_string();
        assert!(html.contains("<h1>Reading for day 5</h1>"));
        assert!(html.contains("This month: Step 1"));
    }

    #[test]
    fn title_is_site_name_only() {
        let data = site_data(year_of_readings());
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let html = home(&ctx, &data, 1).into_string();
        assert!(html.contains("<title>Daybook</title>"));
        assert!(html.contains(r#""@type":"WebSite""#));
    }
}
