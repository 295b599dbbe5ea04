//! Shared data model.
//!
//! Rows come from the data store as JSON and are deserialized straight into
//! these types. The store is loose about nulls, so text columns go through
//! [`null_as_default`] and collapse to empty strings; the renderers treat an
//! empty string and a missing value the same way.
//!
//! `RemoteStep` and `RemoteTheme` are the *overlay* shapes: every field is
//! optional, and [`crate::merge`] decides which ones win over the defaults.

use crate::calendar;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` (or a missing key, with `#[serde(default)]`) as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Row ids are integers in some tables and UUID strings in others.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Accept either a JSON array of strings or a single text blob split on blank lines.
fn string_or_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Text(String),
    }
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::List(items)) => Some(items),
        Some(Raw::Text(text)) => Some(crate::text::split_paragraphs(&text)),
        None => None,
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// One daily reading. `day_of_year` (1–366) is the stable key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reading {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub day_of_year: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub opening: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    /// Quote text, optionally ending in `(Source, p. N)`.
    #[serde(deserialize_with = "null_as_default")]
    pub quote: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thought_for_day: String,
    pub application: Option<String>,
    /// Step-theme label, e.g. "Honesty".
    #[serde(deserialize_with = "null_as_default")]
    pub step_theme: String,
    /// Free-text tag matched against each theme's `theme_tags`.
    pub secondary_theme: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub display_date: String,
    pub flagged_at: Option<String>,
    pub reviewed_at: Option<String>,
    pub admin_notes: Option<String>,
}

impl Reading {
    /// Title for display; `"Untitled"` when the row has none.
    pub fn display_title(&self) -> &str {
        match self.title.trim() {
            "" => "Untitled",
            t => t,
        }
    }

    /// URL slug, e.g. `"february-29"`.
    pub fn slug(&self) -> String {
        calendar::day_to_slug(self.day_of_year)
    }

    /// Human date, falling back to the calendar name of the day.
    pub fn date_label(&self) -> String {
        match self.display_date.trim() {
            "" => calendar::display_date(self.day_of_year),
            d => d.to_string(),
        }
    }

    pub fn application(&self) -> Option<&str> {
        non_empty(&self.application)
    }

    pub fn secondary_theme(&self) -> Option<&str> {
        non_empty(&self.secondary_theme)
    }
}

/// One of the Twelve Steps, bound to the month named in `month`, or the
/// month of the same number when that name is blank or unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub number: u8,
    pub text: String,
    /// Display month name, e.g. "January".
    pub month: String,
    pub principle: String,
    pub description: Vec<String>,
    pub questions: Vec<String>,
    pub hook: String,
    pub tagline: String,
    pub pull_quote: String,
    pub tools: Vec<String>,
}

impl Step {
    pub fn slug(&self) -> String {
        format!("step-{}", self.number)
    }

    /// 0-based month index this step is read in.
    pub fn month_index(&self) -> usize {
        calendar::month_index(&self.month)
            .unwrap_or_else(|| usize::from(self.number.clamp(1, 12)) - 1)
    }
}

/// Remote overlay for a [`Step`]; only present, non-empty fields apply.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RemoteStep {
    pub number: u8,
    pub text: Option<String>,
    pub month: Option<String>,
    pub principle: Option<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub description: Option<Vec<String>>,
    pub questions: Option<Vec<String>>,
    pub hook: Option<String>,
    pub tagline: Option<String>,
    pub pull_quote: Option<String>,
    pub tools: Option<Vec<String>>,
}

/// A recovery theme page, keyed by slug.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub slug: String,
    pub name: String,
    pub short_description: String,
    pub meta_description: String,
    /// Prose with light markdown, split into paragraphs on render.
    pub body: String,
    pub pull_quote: String,
    /// Readings whose `secondary_theme` is one of these belong to the theme.
    pub theme_tags: Vec<String>,
    pub tools: Vec<String>,
    /// Curated days shown when no rating data is available.
    pub featured_days: Vec<u16>,
    /// Optional hero image path under `/assets/`.
    pub image: String,
}

impl Theme {
    /// Case-insensitive membership test against `theme_tags`.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.theme_tags
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(tag))
    }
}

/// Remote overlay for a [`Theme`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RemoteTheme {
    pub slug: String,
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub meta_description: Option<String>,
    pub body: Option<String>,
    pub pull_quote: Option<String>,
    pub theme_tags: Option<Vec<String>>,
    pub tools: Option<Vec<String>>,
    pub featured_days: Option<Vec<u16>>,
    pub image: Option<String>,
}

/// Static literature catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub title: String,
    pub slug: String,
    pub subtitle: String,
    /// Markdown description.
    pub description: String,
    pub purchase_url: String,
    /// Cover path relative to the site root, e.g. `assets/books/x.jpg`.
    pub cover_image: String,
}

/// Informational page rendered from markdown at `/{slug}/`.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticPage {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
}

/// An approved member submission attached to a theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberShare {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub theme_slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub approved: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl MemberShare {
    pub fn author(&self) -> &str {
        match self.display_name.trim() {
            "" => "Anonymous",
            n => n,
        }
    }
}

/// Reader feedback on a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    #[serde(alias = "up", alias = "helpful")]
    Positive,
    Neutral,
    #[serde(alias = "down")]
    Negative,
    /// Anything else the feedback form may have recorded.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedbackRow {
    pub day_of_year: u16,
    pub rating: Sentiment,
}

/// Per-day feedback counts, derived from [`FeedbackRow`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingAggregate {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
    pub total: u32,
}

impl RatingAggregate {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Unknown => {}
        }
        self.total += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_nulls_become_empty_strings() {
        let json = r#"{"id": 7, "day_of_year": 60, "title": null, "quote": null,
                       "application": null, "secondary_theme": "Fear"}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.id, "7");
        assert_eq!(reading.title, "");
        assert_eq!(reading.display_title(), "Untitled");
        assert_eq!(reading.application(), None);
        assert_eq!(reading.secondary_theme(), Some("Fear"));
        assert_eq!(reading.slug(), "february-29");
    }

    #[test]
    fn reading_blank_application_is_none() {
        let reading = Reading {
            application: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(reading.application(), None);
    }

    #[test]
    fn reading_date_label_falls_back_to_calendar() {
        let reading = Reading {
            day_of_year: 32,
            ..Default::default()
        };
        assert_eq!(reading.date_label(), "February 1");
    }

    #[test]
    fn remote_step_description_accepts_text_blob() {
        let json = r#"{"number": 3, "description": "First.\n\nSecond."}"#;
        let step: RemoteStep = serde_json::from_str(json).unwrap();
        assert_eq!(
            step.description,
            Some(vec!["First.".to_string(), "Second.".to_string()])
        );
        assert_eq!(step.tools, None);
    }

    #[test]
    fn remote_step_description_accepts_list() {
        let json = r#"{"number": 3, "description": ["a", "b"]}"#;
        let step: RemoteStep = serde_json::from_str(json).unwrap();
        assert_eq!(step.description, Some(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn sentiment_aliases_and_unknown() {
        let rows: Vec<FeedbackRow> = serde_json::from_str(
            r#"[{"day_of_year": 1, "rating": "up"},
                {"day_of_year": 1, "rating": "negative"},
                {"day_of_year": 1, "rating": "meh"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].rating, Sentiment::Positive);
        assert_eq!(rows[1].rating, Sentiment::Negative);
        assert_eq!(rows[2].rating, Sentiment::Unknown);
    }

    #[test]
    fn rating_aggregate_counts_every_row_in_total() {
        let mut agg = RatingAggregate::default();
        agg.record(Sentiment::Positive);
        agg.record(Sentiment::Unknown);
        assert_eq!(agg.positive, 1);
        assert_eq!(agg.total, 2);
    }

    #[test]
    fn theme_tag_match_is_case_insensitive() {
        let theme = Theme {
            theme_tags: vec!["Letting Go".into()],
            ..Default::default()
        };
        assert!(theme.has_tag("letting go "));
        assert!(!theme.has_tag("letting"));
    }

    #[test]
    fn share_without_name_is_anonymous() {
        let share = MemberShare::default();
        assert_eq!(share.author(), "Anonymous");
    }
}
