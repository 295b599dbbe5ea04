//! Shared test utilities: reading and dataset builders.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut readings = year_of_readings();
//! tag(&mut readings, &[5, 6], "Acceptance");
//! let data = site_data(readings);
//! assert_eq!(data.readings.len(), 366);
//! ```

use crate::calendar;
use crate::datastore::Fetched;
use crate::dataset::SiteData;
use crate::defaults::Defaults;
use crate::types::{FeedbackRow, MemberShare, Reading, Sentiment};

/// A fully populated reading for `day`.
pub fn reading(day: u16) -> Reading {
    Reading {
        id: day.to_string(),
        day_of_year: day,
        title: format!("Reading for day {day}"),
        opening: format!("Opening for day {day}."),
        body: format!("First paragraph for day {day}.\n\nSecond paragraph with **strong** text."),
        quote: format!("Quote for day {day}. (Basic Text, p. {day})"),
        thought_for_day: format!("Thought for day {day}."),
        application: Some(format!("Application for day {day}.")),
        step_theme: "Honesty".to_string(),
        secondary_theme: None,
        display_date: calendar::display_date(day),
        ..Default::default()
    }
}

/// One reading per day, 1 through 366.
pub fn year_of_readings() -> Vec<Reading> {
    (1..=calendar::DAYS_IN_YEAR).map(reading).collect()
}

/// Set `secondary_theme` on the readings for `days`.
pub fn tag(readings: &mut [Reading], days: &[u16], theme: &str) {
    for r in readings.iter_mut().filter(|r| days.contains(&r.day_of_year)) {
        r.secondary_theme = Some(theme.to_string());
    }
}

/// Snapshot over `readings` and stock defaults, with nothing else fetched.
pub fn site_data(readings: Vec<Reading>) -> SiteData {
    let fetched = Fetched {
        readings,
        ..Default::default()
    };
    SiteData::assemble(fetched, Defaults::stock())
}

pub fn feedback(day: u16, rating: Sentiment) -> FeedbackRow {
    FeedbackRow {
        day_of_year: day,
        rating,
    }
}

pub fn share(id: &str, theme_slug: &str, featured: bool, created_at: &str) -> MemberShare {
    MemberShare {
        id: id.to_string(),
        theme_slug: theme_slug.to_string(),
        display_name: format!("Member {id}"),
        content: format!("Share {id} content."),
        approved: true,
        featured,
        created_at: created_at.to_string(),
    }
}
