use super::{PageMeta, SiteContext, layout, list_section, pull_quote, reading_list};
use crate::calendar;
use crate::dataset::SiteData;
use crate::text;
use crate::types::Step;
use maud::{Markup, PreEscaped, html};

/// Readings previewed on a step page.
pub const STEP_PREVIEW: usize = 5;

pub fn step_path(step: &Step) -> String {
    format!("/steps/{}/", step.slug())
}

fn month_label(step: &Step) -> &'static str {
    calendar::month_name(step.month_index())
}

pub fn steps_index(ctx: &SiteContext, data: &SiteData) -> Markup {
    let meta = PageMeta::new(
        "The Twelve Steps",
        "The Twelve Steps, one for each month of the year, with reflection questions, principles and daily readings.",
        "/steps/",
    )
    .class("steps-index");

    let body = html! {
        h1 { "The Twelve Steps" }
        ol.step-list {
            @for step in &data.steps {
                li {
                    a href=(ctx.link(&step_path(step))) {
                        span.step-number { "Step " (step.number) }
                        span.step-month { (month_label(step)) }
                    }
                    p.step-text { (step.text) }
                    @if !step.principle.trim().is_empty() {
                        p.step-principle { "Principle: " (step.principle) }
                    }
                }
            }
        }
    };
    layout(ctx, &meta, body)
}

pub fn step(ctx: &SiteContext, data: &SiteData, step: &Step) -> Markup {
    let month = step.month_index();
    let month_readings = data.readings_in_month(month);
    let preview: Vec<_> = month_readings.iter().take(STEP_PREVIEW).copied().collect();
    let title = format!("Step {}: {}", step.number, step.principle);
    let description = format!("{} {}", step.text, step.tagline);
    let meta = PageMeta::new(&title, &description, &step_path(step)).class("step-page");

    let body = html! {
        article.step {
            header {
                p.breadcrumb { a href=(ctx.link("/steps/")) { "The Twelve Steps" } }
                h1 { "Step " (step.number) }
                blockquote.step-text { p { (step.text) } }
                p.step-meta {
                    (month_label(step))
                    @if !step.principle.trim().is_empty() {
                        " · " (step.principle)
                    }
                }
                @if !step.tagline.trim().is_empty() {
                    p.tagline { (step.tagline) }
                }
            }
            @if !step.hook.trim().is_empty() {
                p.hook { (step.hook) }
            }
            @if !step.description.is_empty() {
                div.step-description {
                    @for para in &step.description {
                        p { (PreEscaped(text::inline_markdown(para))) }
                    }
                }
            }
            (pull_quote(&step.pull_quote))
            @if !step.questions.is_empty() {
                section.questions {
                    h2 { "Questions for reflection" }
                    ol {
                        @for question in &step.questions {
                            li { (question) }
                        }
                    }
                }
            }
            (list_section("Tools", "tools", &step.tools))
            @if !preview.is_empty() {
                section.month-preview {
                    h2 { (month_label(step)) " readings" }
                    (reading_list(ctx, &preview))
                    @if month_readings.len() > preview.len() {
                        a.more href=(ctx.link(&format!("/months/{}/", calendar::month_slug(month)))) {
                            "All " (month_readings.len()) " readings for " (month_label(step))
                        }
                    }
                }
            }
        }
    };
    layout(ctx, &meta, body)
}
