//! The frozen site snapshot every renderer reads from.
//!
//! [`SiteData::assemble`] runs once per build: it validates and sorts the
//! readings, merges remote steps and themes onto the defaults, and folds raw
//! feedback into per-day aggregates. Nothing mutates the snapshot after that;
//! renderers borrow from it and return markup.
//!
//! ## Theme selection
//!
//! A theme page shows two groups of readings:
//!
//! ```text
//! featured    ratings mode: top 5 rated candidates
//!                           (positive desc, total desc, day asc)
//!             curated mode: theme.featured_days in listed order
//! additional  readings whose secondary theme is in theme_tags,
//!             minus anything already featured, by day
//! ```
//!
//! Candidates for ratings mode are tag matches plus the curated days. Ratings
//! mode needs at least one rated candidate; a theme nobody has rated yet
//! falls back to curated even when other days carry ratings.

use crate::calendar;
use crate::datastore::Fetched;
use crate::defaults::Defaults;
use crate::merge::{merge_steps, merge_themes};
use crate::types::{
    Book, FeedbackRow, MemberShare, RatingAggregate, Reading, StaticPage, Step, Theme,
};
use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};

/// Featured slots filled from ratings.
pub const FEATURED_LIMIT: usize = 5;

/// Fold raw feedback rows into per-day counts.
pub fn aggregate_ratings(rows: &[FeedbackRow]) -> BTreeMap<u16, RatingAggregate> {
    let mut ratings = BTreeMap::new();
    for row in rows {
        ratings
            .entry(row.day_of_year)
            .or_insert_with(RatingAggregate::default)
            .record(row.rating);
    }
    ratings
}

/// Previous and next index on a ring of `len` items.
///
/// `neighbors(366, 0)` is `(365, 1)`: the calendar wraps, so day 1's
/// previous reading is December 31.
pub fn neighbors(len: usize, index: usize) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    let index = index % len;
    ((index + len - 1) % len, (index + 1) % len)
}

/// Where a theme's featured readings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSource {
    Ratings,
    Curated,
}

impl FeatureSource {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureSource::Ratings => "ratings",
            FeatureSource::Curated => "curated",
        }
    }
}

/// The two reading groups shown on a theme page.
#[derive(Debug, Clone)]
pub struct ThemeReadings<'a> {
    pub featured: Vec<&'a Reading>,
    pub additional: Vec<&'a Reading>,
    pub source: FeatureSource,
}

#[derive(Debug, Clone)]
pub struct SiteData {
    /// Sorted by `day_of_year`, at most one per day.
    pub readings: Vec<Reading>,
    pub steps: Vec<Step>,
    pub themes: Vec<Theme>,
    pub books: Vec<Book>,
    pub pages: Vec<StaticPage>,
    pub ratings: BTreeMap<u16, RatingAggregate>,
    pub shares: Vec<MemberShare>,
}

impl SiteData {
    /// Build the snapshot from one run's fetch results.
    pub fn assemble(fetched: Fetched, defaults: Defaults) -> Self {
        let readings = normalize_readings(fetched.readings);
        let steps = merge_steps(&defaults.steps, &fetched.steps);
        let themes = merge_themes(&defaults.themes, &fetched.themes);
        let ratings = aggregate_ratings(&fetched.feedback);

        if readings.len() != usize::from(calendar::DAYS_IN_YEAR) {
            warn!(
                count = readings.len(),
                "reading set does not cover every day of the year"
            );
        }
        info!(
            readings = readings.len(),
            rated_days = ratings.len(),
            shares = fetched.shares.len(),
            "assembled site data"
        );

        Self {
            readings,
            steps,
            themes,
            books: defaults.books,
            pages: defaults.pages,
            ratings,
            shares: fetched.shares,
        }
    }

    pub fn reading_index(&self, day: u16) -> Option<usize> {
        self.readings
            .binary_search_by_key(&day, |r| r.day_of_year)
            .ok()
    }

    pub fn reading_by_day(&self, day: u16) -> Option<&Reading> {
        self.reading_index(day).map(|i| &self.readings[i])
    }

    /// Index of today's reading, or 0 when that day has no reading.
    pub fn today_index(&self, today: u16) -> usize {
        self.reading_index(today).unwrap_or(0)
    }

    /// Previous and next readings around `index`, wrapping at the ends.
    pub fn reading_neighbors(&self, index: usize) -> (&Reading, &Reading) {
        let (prev, next) = neighbors(self.readings.len(), index);
        (&self.readings[prev], &self.readings[next])
    }

    pub fn readings_in_month(&self, month: usize) -> Vec<&Reading> {
        self.readings
            .iter()
            .filter(|r| calendar::day_to_month_index(r.day_of_year) == month)
            .collect()
    }

    /// The step read during `month` (0-based).
    pub fn step_for_month(&self, month: usize) -> Option<&Step> {
        self.steps.iter().find(|s| s.month_index() == month)
    }

    /// First theme whose tag set contains `tag`.
    pub fn theme_for_tag(&self, tag: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.has_tag(tag))
    }

    pub fn theme_by_slug(&self, slug: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.slug == slug)
    }

    /// Approved shares for a theme: featured first, then newest first.
    pub fn shares_for_theme(&self, slug: &str) -> Vec<&MemberShare> {
        let mut shares: Vec<&MemberShare> = self
            .shares
            .iter()
            .filter(|s| s.approved && s.theme_slug == slug)
            .collect();
        shares.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        shares
    }

    fn tag_matches<'a>(&'a self, theme: &'a Theme) -> impl Iterator<Item = &'a Reading> + 'a {
        self.readings
            .iter()
            .filter(move |r| r.secondary_theme().is_some_and(|tag| theme.has_tag(tag)))
    }

    /// Featured and additional readings for a theme page. The two groups
    /// never share a day.
    pub fn theme_readings<'a>(&'a self, theme: &'a Theme) -> ThemeReadings<'a> {
        let (featured, source) = match self.rated_featured(theme) {
            Some(featured) => (featured, FeatureSource::Ratings),
            None => (self.curated_featured(theme), FeatureSource::Curated),
        };

        let featured_days: HashSet<u16> = featured.iter().map(|r| r.day_of_year).collect();
        let additional = self
            .tag_matches(theme)
            .filter(|r| !featured_days.contains(&r.day_of_year))
            .collect();

        ThemeReadings {
            featured,
            additional,
            source,
        }
    }

    fn rated_featured<'a>(&'a self, theme: &'a Theme) -> Option<Vec<&'a Reading>> {
        if self.ratings.is_empty() {
            return None;
        }
        let mut rated: Vec<(&Reading, RatingAggregate)> = self
            .readings
            .iter()
            .filter(|r| {
                theme.featured_days.contains(&r.day_of_year)
                    || r.secondary_theme().is_some_and(|tag| theme.has_tag(tag))
            })
            .filter_map(|r| {
                self.ratings
                    .get(&r.day_of_year)
                    .filter(|agg| agg.total > 0)
                    .map(|agg| (r, *agg))
            })
            .collect();
        if rated.is_empty() {
            return None;
        }
        rated.sort_by(|(ra, a), (rb, b)| {
            b.positive
                .cmp(&a.positive)
                .then_with(|| b.total.cmp(&a.total))
                .then_with(|| ra.day_of_year.cmp(&rb.day_of_year))
        });
        Some(
            rated
                .into_iter()
                .take(FEATURED_LIMIT)
                .map(|(r, _)| r)
                .collect(),
        )
    }

    fn curated_featured(&self, theme: &Theme) -> Vec<&Reading> {
        let mut seen = HashSet::new();
        theme
            .featured_days
            .iter()
            .filter(|day| seen.insert(**day))
            .filter_map(|day| self.reading_by_day(*day))
            .collect()
    }
}

/// Drop readings outside 1..=366 and duplicate days, then sort by day.
fn normalize_readings(mut readings: Vec<Reading>) -> Vec<Reading> {
    readings.retain(|r| {
        let valid = (1..=calendar::DAYS_IN_YEAR).contains(&r.day_of_year);
        if !valid {
            warn!(id = %r.id, day = r.day_of_year, "reading has an invalid day, skipping");
        }
        valid
    });
    // Stable sort keeps the store's order among duplicates, so the first
    // row the store returned for a day wins.
    readings.sort_by_key(|r| r.day_of_year);
    let before = readings.len();
    readings.dedup_by_key(|r| r.day_of_year);
    if readings.len() != before {
        warn!(
            dropped = before - readings.len(),
            "duplicate day_of_year rows dropped"
        );
    }
    readings
}
