use super::{PageMeta, SiteContext, layout, reading_pager, reading_path};
use crate::calendar;
use crate::dataset::SiteData;
use crate::text;
use crate::types::Reading;
use maud::{Markup, html};
use serde_json::json;

/// Site-relative path of a reading's social card.
pub fn og_image_path(reading: &Reading) -> String {
    format!("/{}/og.png", reading.slug())
}

/// HTML yearless date, e.g. `02-29`.
fn yearless_date(day: u16) -> String {
    format!(
        "{:02}-{:02}",
        calendar::day_to_month_index(day) + 1,
        calendar::day_within_month(day)
    )
}

/// First non-empty of opening, thought for the day, body.
fn description_source(reading: &Reading) -> &str {
    [&reading.opening, &reading.thought_for_day, &reading.body]
        .into_iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

/// A reading page. `index` is the reading's position in `data.readings`.
pub fn reading(ctx: &SiteContext, data: &SiteData, index: usize) -> Markup {
    let reading = &data.readings[index];
    let path = reading_path(reading);
    let json_ld = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": reading.display_title(),
        "url": ctx.absolute(&path),
        "image": ctx.absolute(&og_image_path(reading)),
        "articleSection": reading.date_label(),
        "publisher": {"@type": "Organization", "name": ctx.site_name()},
    });
    let meta = PageMeta::new(reading.display_title(), description_source(reading), &path)
        .article()
        .with_image(og_image_path(reading))
        .with_json_ld(json_ld)
        .class("reading-page");

    let body = html! {
        (article(ctx, data, reading))
        (reading_pager(ctx, data, index))
    };
    layout(ctx, &meta, body)
}

/// The reading itself, shared with the home page.
pub(super) fn article(ctx: &SiteContext, data: &SiteData, reading: &Reading) -> Markup {
    let theme_tag = reading.secondary_theme();
    let theme = theme_tag.and_then(|tag| data.theme_for_tag(tag));

    html! {
        article.reading data-day=(reading.day_of_year) {
            header.reading-header {
                p.reading-date {
                    time datetime=(yearless_date(reading.day_of_year)) { (reading.date_label()) }
                }
                h1 { (reading.display_title()) }
                @if !reading.step_theme.trim().is_empty() {
                    p.step-theme { (reading.step_theme) }
                }
            }
            @if !reading.opening.trim().is_empty() {
                div.opening { (text::paragraphs(&reading.opening)) }
            }
            @if !reading.body.trim().is_empty() {
                div.reading-body { (text::paragraphs(&reading.body)) }
            }
            @if !reading.quote.trim().is_empty() {
                (text::quote_block(&reading.quote))
            }
            @if !reading.thought_for_day.trim().is_empty() {
                section.thought {
                    h2 { "Thought for the day" }
                    (text::paragraphs(&reading.thought_for_day))
                }
            }
            @if let Some(application) = reading.application() {
                section.application {
                    h2 { "Putting it into practice" }
                    (text::paragraphs(application))
                }
            }
            @if let Some(tag) = theme_tag {
                p.reading-theme {
                    "Theme: "
                    @if let Some(theme) = theme {
                        a href=(ctx.link(&format!("/themes/{}/", theme.slug))) { (theme.name) }
                    } @else {
                        span { (tag) }
                    }
                }
            }
            form.rating-widget data-day=(reading.day_of_year) data-endpoint=(ctx.config.site.admin_endpoint) {
                p { "Was this reading helpful?" }
                button type="button" name="rating" value="positive" { "Yes" }
                button type="button" name="rating" value="neutral" { "Somewhat" }
                button type="button" name="rating" value="negative" { "Not today" }
            }
        }
    }
}
