use super::steps::step_path;
use super::{PageMeta, SiteContext, layout, reading_list};
use crate::calendar;
use crate::dataset::SiteData;
use crate::types::Reading;
use maud::{Markup, html};

pub fn month_path(month: usize) -> String {
    format!("/months/{}/", calendar::month_slug(month))
}

/// Month archive, `month` 0-based. Readings are grouped into the four week
/// windows from [`calendar::week_windows`]; empty windows are skipped.
pub fn month(ctx: &SiteContext, data: &SiteData, month: usize) -> Markup {
    let name = calendar::month_name(month);
    let readings = data.readings_in_month(month);
    let step = data.step_for_month(month);
    let windows: Vec<(String, Vec<&Reading>)> = calendar::week_windows(calendar::month_len(month))
        .into_iter()
        .map(|window| {
            let label = format!("{name} {}–{}", window.start(), window.end());
            let days = readings
                .iter()
                .filter(|r| window.contains(&calendar::day_within_month(r.day_of_year)))
                .copied()
                .collect();
            (label, days)
        })
        .collect();

    let description = match step {
        Some(step) => format!("Daily readings for {name}, the month of Step {}: {}", step.number, step.text),
        None => format!("Daily readings for {name}."),
    };
    let meta = PageMeta::new(&format!("{name} readings"), &description, &month_path(month))
        .class("month-page");

    let prev = (month + 11) % 12;
    let next = (month + 1) % 12;

    let body = html! {
        h1 { (name) }
        @if let Some(step) = step {
            p.month-step {
                a href=(ctx.link(&step_path(step))) { "Step " (step.number) }
                ": " (step.text)
            }
        }
        @for (label, days) in &windows {
            @if !days.is_empty() {
                section.week {
                    h2 { (label) }
                    (reading_list(ctx, days))
                }
            }
        }
        nav.month-pager {
            a rel="prev" href=(ctx.link(&month_path(prev))) { (calendar::month_name(prev)) }
            a rel="next" href=(ctx.link(&month_path(next))) { (calendar::month_name(next)) }
        }
    };
    layout(ctx, &meta, body)
}
