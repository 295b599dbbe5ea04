//! Remote data store client.
//!
//! The data store speaks PostgREST-style REST: one collection per table,
//! column selection and ordering in the query string, and an API key sent
//! both as `apikey` and as a bearer token.
//!
//! ```text
//! GET {base}/rest/v1/readings?select=id,day_of_year,...&order=day_of_year.asc
//! apikey: <key>
//! Authorization: Bearer <key>
//! ```
//!
//! ## Failure policy
//!
//! Readings are mandatory: a transport error, a non-2xx status, a body that
//! is not a JSON array, or zero rows all fail the run. Steps, themes,
//! feedback and shares are enrichment: [`fetch_all`] logs a warning and
//! carries on with an empty collection. Every collection gets exactly one
//! attempt per run.
//!
//! The [`DataStore`] trait is the seam between the pipeline and the network
//! so the orchestrator can be exercised against in-memory data.

use crate::config::DatastoreConfig;
use crate::types::{FeedbackRow, MemberShare, Reading, RemoteStep, RemoteTheme};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use ureq::Agent;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("environment variable {0} is not set")]
    MissingEnv(String),
    #[error("HTTP request to {collection} failed: {source}")]
    Http {
        collection: &'static str,
        #[source]
        source: ureq::Error,
    },
    #[error("{collection}: HTTP {status} - {body}")]
    HttpStatus {
        collection: &'static str,
        status: u16,
        body: String,
    },
    #[error("{collection}: response body is not a JSON array")]
    NotArray { collection: &'static str },
    #[error("{collection}: unexpected row shape: {source}")]
    Decode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("readings collection returned no rows")]
    NoReadings,
}

pub const READING_COLUMNS: &[&str] = &[
    "id",
    "day_of_year",
    "title",
    "opening",
    "body",
    "quote",
    "thought_for_day",
    "application",
    "step_theme",
    "secondary_theme",
    "display_date",
    "flagged_at",
    "reviewed_at",
    "admin_notes",
];

pub const STEP_COLUMNS: &[&str] = &[
    "number",
    "text",
    "month",
    "principle",
    "description",
    "questions",
    "hook",
    "tagline",
    "pull_quote",
    "tools",
];

pub const THEME_COLUMNS: &[&str] = &[
    "slug",
    "name",
    "short_description",
    "meta_description",
    "body",
    "pull_quote",
    "theme_tags",
    "tools",
    "featured_days",
    "image",
];

pub const FEEDBACK_COLUMNS: &[&str] = &["day_of_year", "rating"];

pub const SHARE_COLUMNS: &[&str] = &[
    "id",
    "theme_slug",
    "display_name",
    "content",
    "approved",
    "featured",
    "created_at",
];

/// One read against a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: &'static str,
    pub columns: &'static [&'static str],
    /// Column name; ascending order.
    pub order: &'static str,
    /// Extra PostgREST filters, e.g. `("approved", "eq.true")`.
    pub filters: Vec<(&'static str, &'static str)>,
}

impl Query {
    pub fn readings() -> Self {
        Self::new("readings", READING_COLUMNS, "day_of_year")
    }

    pub fn steps() -> Self {
        Self::new("steps", STEP_COLUMNS, "number")
    }

    pub fn themes() -> Self {
        Self::new("themes", THEME_COLUMNS, "slug")
    }

    pub fn feedback() -> Self {
        Self::new("reading_feedback", FEEDBACK_COLUMNS, "day_of_year")
    }

    pub fn shares() -> Self {
        let mut query = Self::new("member_shares", SHARE_COLUMNS, "created_at");
        query.filters.push(("approved", "eq.true"));
        query
    }

    fn new(
        collection: &'static str,
        columns: &'static [&'static str],
        order: &'static str,
    ) -> Self {
        Self {
            collection,
            columns,
            order,
            filters: Vec::new(),
        }
    }

    /// Query-string pairs in the order they are sent.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("select", self.columns.join(",")),
            ("order", format!("{}.asc", self.order)),
        ];
        params.extend(self.filters.iter().map(|(k, v)| (*k, (*v).to_string())));
        params
    }
}

/// Read access to every collection the generator consumes.
pub trait DataStore {
    fn readings(&self) -> Result<Vec<Reading>, DataError>;
    fn steps(&self) -> Result<Vec<RemoteStep>, DataError>;
    fn themes(&self) -> Result<Vec<RemoteTheme>, DataError>;
    fn feedback(&self) -> Result<Vec<FeedbackRow>, DataError>;
    fn shares(&self) -> Result<Vec<MemberShare>, DataError>;
}

/// PostgREST client over `ureq`.
pub struct RestClient {
    agent: Agent,
    base_url: String,
    api_key: String,
}

impl RestClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    /// Build a client from the environment variables named in config.
    pub fn from_env(config: &DatastoreConfig) -> Result<Self, DataError> {
        let url = env_var(&config.url_env)?;
        let key = env_var(&config.key_env)?;
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        Ok(Self::new(&url, &key, timeout))
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    /// Run one query and decode the rows.
    pub fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, DataError> {
        let collection = query.collection;
        let url = self.collection_url(collection);
        debug!(collection, %url, "fetching collection");

        let mut request = self
            .agent
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Accept", "application/json");
        for (key, value) in query.params() {
            request = request.query(key, &value);
        }

        let response = request
            .call()
            .map_err(|source| DataError::Http { collection, source })?;

        let status = response.status().as_u16();
        let mut body = response.into_body();
        if !(200..300).contains(&status) {
            let body = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(DataError::HttpStatus {
                collection,
                status,
                body,
            });
        }

        let value: serde_json::Value = body
            .read_json()
            .map_err(|source| DataError::Http { collection, source })?;
        decode_rows(collection, value)
    }
}

fn env_var(name: &str) -> Result<String, DataError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DataError::MissingEnv(name.to_string()))
}

/// Decode a response body that must be a JSON array of rows.
pub fn decode_rows<T: DeserializeOwned>(
    collection: &'static str,
    value: serde_json::Value,
) -> Result<Vec<T>, DataError> {
    if !value.is_array() {
        return Err(DataError::NotArray { collection });
    }
    serde_json::from_value(value).map_err(|source| DataError::Decode { collection, source })
}

impl DataStore for RestClient {
    fn readings(&self) -> Result<Vec<Reading>, DataError> {
        self.select(&Query::readings())
    }

    fn steps(&self) -> Result<Vec<RemoteStep>, DataError> {
        self.select(&Query::steps())
    }

    fn themes(&self) -> Result<Vec<RemoteTheme>, DataError> {
        self.select(&Query::themes())
    }

    fn feedback(&self) -> Result<Vec<FeedbackRow>, DataError> {
        self.select(&Query::feedback())
    }

    fn shares(&self) -> Result<Vec<MemberShare>, DataError> {
        self.select(&Query::shares())
    }
}

/// Everything one run fetched, before merging with defaults.
#[derive(Debug, Clone, Default)]
pub struct Fetched {
    pub readings: Vec<Reading>,
    pub steps: Vec<RemoteStep>,
    pub themes: Vec<RemoteTheme>,
    pub feedback: Vec<FeedbackRow>,
    pub shares: Vec<MemberShare>,
    /// Names of optional collections that failed and were replaced by `[]`.
    pub degraded: Vec<&'static str>,
}

/// Fetch all collections once. Only the readings fetch can fail the run.
pub fn fetch_all(store: &impl DataStore) -> Result<Fetched, DataError> {
    let readings = store.readings()?;
    if readings.is_empty() {
        return Err(DataError::NoReadings);
    }
    info!(count = readings.len(), "fetched readings");

    let mut degraded = Vec::new();
    let steps = optional("steps", store.steps(), &mut degraded);
    let themes = optional("themes", store.themes(), &mut degraded);
    let feedback = optional("feedback", store.feedback(), &mut degraded);
    let shares = optional("shares", store.shares(), &mut degraded);

    Ok(Fetched {
        readings,
        steps,
        themes,
        feedback,
        // The query already filters, but a mock or a misconfigured view
        // might not.
        shares: shares.into_iter().filter(|s| s.approved).collect(),
        degraded,
    })
}

fn optional<T>(
    name: &'static str,
    result: Result<Vec<T>, DataError>,
    degraded: &mut Vec<&'static str>,
) -> Vec<T> {
    match result {
        Ok(rows) => {
            info!(collection = name, count = rows.len(), "fetched collection");
            rows
        }
        Err(err) => {
            warn!(collection = name, error = %err, "optional fetch failed, using fallback");
            degraded.push(name);
            Vec::new()
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::types::Sentiment;
    use std::cell::RefCell;

    /// In-memory store. Optional collections set to `None` fail on fetch.
    #[derive(Default)]
    pub struct MockStore {
        pub readings: Vec<Reading>,
        pub steps: Option<Vec<RemoteStep>>,
        pub themes: Option<Vec<RemoteTheme>>,
        pub feedback: Option<Vec<FeedbackRow>>,
        pub shares: Option<Vec<MemberShare>>,
        pub calls: RefCell<Vec<&'static str>>,
    }

    fn unavailable<T>(collection: &'static str, rows: &Option<Vec<T>>) -> Result<Vec<T>, DataError>
    where
        T: Clone,
    {
        rows.clone().ok_or(DataError::HttpStatus {
            collection,
            status: 503,
            body: "unavailable".into(),
        })
    }

    impl DataStore for MockStore {
        fn readings(&self) -> Result<Vec<Reading>, DataError> {
            self.calls.borrow_mut().push("readings");
            Ok(self.readings.clone())
        }
        fn steps(&self) -> Result<Vec<RemoteStep>, DataError> {
            self.calls.borrow_mut().push("steps");
            unavailable("steps", &self.steps)
        }
        fn themes(&self) -> Result<Vec<RemoteTheme>, DataError> {
            self.calls.borrow_mut().push("themes");
            unavailable("themes", &self.themes)
        }
        fn feedback(&self) -> Result<Vec<FeedbackRow>, DataError> {
            self.calls.borrow_mut().push("feedback");
            unavailable("feedback", &self.feedback)
        }
        fn shares(&self) -> Result<Vec<MemberShare>, DataError> {
            self.calls.borrow_mut().push("shares");
            unavailable("shares", &self.shares)
        }
    }

    fn reading(day: u16) -> Reading {
        Reading {
            day_of_year: day,
            title: format!("Day {day}"),
            ..Default::default()
        }
    }

    #[test]
    fn query_params_select_and_order() {
        let params = Query::steps().params();
        assert_eq!(params[0].0, "select");
        assert!(params[0].1.starts_with("number,text,month"));
        assert_eq!(params[1], ("order", "number.asc".to_string()));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn shares_query_filters_approved() {
        let params = Query::shares().params();
        assert!(params.contains(&("approved", "eq.true".to_string())));
    }

    #[test]
    fn decode_rows_rejects_non_array() {
        let err = decode_rows::<Reading>("readings", serde_json::json!({"message": "nope"}))
            .unwrap_err();
        assert!(matches!(err, DataError::NotArray { .. }));
    }

    #[test]
    fn decode_rows_reads_array() {
        let rows: Vec<FeedbackRow> = decode_rows(
            "feedback",
            serde_json::json!([{"day_of_year": 5, "rating": "positive"}]),
        )
        .unwrap();
        assert_eq!(rows[0].day_of_year, 5);
        assert_eq!(rows[0].rating, Sentiment::Positive);
    }

    #[test]
    fn fetch_all_requires_readings() {
        let store = MockStore::default();
        assert!(matches!(fetch_all(&store), Err(DataError::NoReadings)));
        // Optional collections are never attempted once readings fail.
        assert_eq!(*store.calls.borrow(), vec!["readings"]);
    }

    #[test]
    fn fetch_all_degrades_optional_collections() {
        let store = MockStore {
            readings: vec![reading(1), reading(2)],
            themes: Some(vec![]),
            ..Default::default()
        };
        let fetched = fetch_all(&store).unwrap();
        assert_eq!(fetched.readings.len(), 2);
        assert!(fetched.steps.is_empty());
        assert_eq!(fetched.degraded, vec!["steps", "feedback", "shares"]);
        // One attempt each, no retries.
        assert_eq!(
            *store.calls.borrow(),
            vec!["readings", "steps", "themes", "feedback", "shares"]
        );
    }

    #[test]
    fn fetch_all_drops_unapproved_shares() {
        let store = MockStore {
            readings: vec![reading(1)],
            shares: Some(vec![
                MemberShare {
                    id: "1".into(),
                    approved: true,
                    ..Default::default()
                },
                MemberShare {
                    id: "2".into(),
                    approved: false,
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };
        let fetched = fetch_all(&store).unwrap();
        assert_eq!(fetched.shares.len(), 1);
        assert_eq!(fetched.shares[0].id, "1");
    }

    #[test]
    fn from_env_reports_missing_variable() {
        let config = DatastoreConfig {
            url_env: "DAYBOOK_TEST_SURELY_UNSET_URL".into(),
            key_env: "DAYBOOK_TEST_SURELY_UNSET_KEY".into(),
            timeout_secs: 1,
        };
        match RestClient::from_env(&config) {
            Err(DataError::MissingEnv(name)) => assert_eq!(name, "DAYBOOK_TEST_SURELY_UNSET_URL"),
            _ => panic!("expected MissingEnv"),
        }
    }

    #[test]
    fn collection_url_trims_trailing_slash() {
        let client = RestClient::new("https://db.example.com/", "key", None);
        assert_eq!(
            client.collection_url("readings"),
            "https://db.example.com/rest/v1/readings"
        );
    }
}
