//! CLI output formatting.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Fetched
//!     readings: 366
//!     steps: 12
//!     themes: fallback (fetch failed)
//!     feedback: 841
//!     shares: 17
//!
//! Site data
//!     366 readings (days 1-366)
//!     12 steps, 12 themes, 3 books, 3 pages
//!     204 rated days, 17 shares
//! ```
//!
//! ## Build
//!
//! ```text
//! Themes
//!     001 acceptance (ratings)
//!     002 gratitude (curated)
//!
//! Fallbacks: themes, feedback
//! Skipped assets: logo.png
//!
//! Generated 414 pages, 366 cards in 4.2s → dist
//! ```

use crate::dataset::SiteData;
use crate::datastore::Fetched;
use crate::generate::BuildSummary;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn collection_line(name: &str, count: usize, degraded: &[&'static str]) -> String {
    if degraded.contains(&name) {
        format!("    {}: fallback (fetch failed)", name)
    } else {
        format!("    {}: {}", name, count)
    }
}

/// Format what one fetch returned, before merging.
pub fn format_fetch_output(fetched: &Fetched) -> Vec<String> {
    let d = &fetched.degraded;
    vec![
        "Fetched".to_string(),
        format!("    readings: {}", fetched.readings.len()),
        collection_line("steps", fetched.steps.len(), d),
        collection_line("themes", fetched.themes.len(), d),
        collection_line("feedback", fetched.feedback.len(), d),
        collection_line("shares", fetched.shares.len(), d),
    ]
}

/// Format the assembled snapshot the pages will be rendered from.
pub fn format_dataset_output(data: &SiteData) -> Vec<String> {
    let days = match (data.readings.first(), data.readings.last()) {
        (Some(first), Some(last)) => format!(" (days {}-{})", first.day_of_year, last.day_of_year),
        _ => String::new(),
    };
    vec![
        "Site data".to_string(),
        format!("    {} readings{}", data.readings.len(), days),
        format!(
            "    {} steps, {} themes, {} books, {} pages",
            data.steps.len(),
            data.themes.len(),
            data.books.len(),
            data.pages.len()
        ),
        format!(
            "    {} rated days, {} shares",
            data.ratings.len(),
            data.shares.len()
        ),
    ]
}

/// Format the end-of-run summary.
pub fn format_generate_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec!["Themes".to_string()];
    for (i, (slug, source)) in summary.theme_sources.iter().enumerate() {
        lines.push(format!(
            "    {} {} ({})",
            format_index(i + 1),
            slug,
            source.as_str()
        ));
    }
    lines.push(String::new());

    if !summary.degraded.is_empty() {
        lines.push(format!("Fallbacks: {}", summary.degraded.join(", ")));
    }
    if !summary.assets.skipped.is_empty() {
        lines.push(format!(
            "Skipped assets: {}",
            summary.assets.skipped.join(", ")
        ));
    }
    if !summary.degraded.is_empty() || !summary.assets.skipped.is_empty() {
        lines.push(String::new());
    }

    lines.push(format!(
        "Generated {} pages, {} cards in {:.1}s → {}",
        summary.pages,
        summary.cards,
        summary.elapsed.as_secs_f64(),
        summary.output.display()
    ));
    lines
}

pub fn print_fetch_output(fetched: &Fetched) {
    for line in format_fetch_output(fetched) {
        println!("{}", line);
    }
}

pub fn print_dataset_output(data: &SiteData) {
    for line in format_dataset_output(data) {
        println!("{}", line);
    }
}

pub fn print_generate_output(summary: &BuildSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::CopyReport;
    use crate::dataset::FeatureSource;
    use crate::test_helpers::{site_data, year_of_readings};
    use std::path::PathBuf;
    use std::time::Duration;

    fn summary() -> BuildSummary {
        BuildSummary {
            output: PathBuf::from("dist"),
            pages: 414,
            cards: 366,
            theme_sources: vec![
                ("acceptance".into(), FeatureSource::Ratings),
                ("gratitude".into(), FeatureSource::Curated),
            ],
            degraded: Vec::new(),
            assets: CopyReport::default(),
            elapsed: Duration::from_millis(4200),
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn fetch_output_marks_fallbacks() {
        let fetched = Fetched {
            readings: year_of_readings(),
            degraded: vec!["themes", "shares"],
            ..Default::default()
        };
        let lines = format_fetch_output(&fetched);
        assert_eq!(lines[0], "Fetched");
        assert_eq!(lines[1], "    readings: 366");
        assert_eq!(lines[2], "    steps: 0");
        assert_eq!(lines[3], "    themes: fallback (fetch failed)");
        assert_eq!(lines[5], "    shares: fallback (fetch failed)");
    }

    #[test]
    fn dataset_output_shows_day_range() {
        let data = site_data(year_of_readings());
        let lines = format_dataset_output(&data);
        assert_eq!(lines[1], "    366 readings (days 1-366)");
        assert!(lines[2].starts_with("    12 steps, 12 themes"));
    }

    #[test]
    fn generate_output_clean_run() {
        let lines = format_generate_output(&summary());
        assert_eq!(
            lines,
            vec![
                "Themes",
                "    001 acceptance (ratings)",
                "    002 gratitude (curated)",
                "",
                "Generated 414 pages, 366 cards in 4.2s → dist",
            ]
        );
    }

    #[test]
    fn generate_output_lists_fallbacks_and_skips() {
        let mut s = summary();
        s.degraded = vec!["feedback"];
        s.assets.skipped = vec!["logo.png".into()];
        let lines = format_generate_output(&s);
        assert!(lines.contains(&"Fallbacks: feedback".to_string()));
        assert!(lines.contains(&"Skipped assets: logo.png".to_string()));
        assert!(lines.last().unwrap().starts_with("Generated 414 pages"));
    }
}
