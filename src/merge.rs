//! Overlay remote step and theme rows onto the built-in defaults.
//!
//! The rule is merge-on-non-empty: a remote field replaces the default only
//! when it is present and carries something (non-blank string, non-empty
//! list). Remote rows whose key has no default are ignored, so the data store
//! can enrich records but never add new ones.
//!
//! Both merges are copy-on-merge. The defaults are cloned, the clone is
//! patched and returned, and the caller's slices are never touched.
//!
//! A present-but-empty remote value cannot clear a default. When that happens
//! over a non-empty default it is logged, since it usually means someone
//! tried to blank a field in the admin panel.

use crate::types::{RemoteStep, RemoteTheme, Step, Theme};
use tracing::{debug, warn};

/// Values that count as "nothing to overlay".
trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for Vec<String> {
    fn is_blank(&self) -> bool {
        self.iter().all(Blank::is_blank)
    }
}

impl Blank for Vec<u16> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Apply one remote field. Returns whether the target changed.
fn overlay<T>(target: &mut T, remote: Option<&T>, record: &str, field: &'static str) -> bool
where
    T: Blank + Clone + PartialEq,
{
    match remote {
        None => false,
        Some(value) if value.is_blank() => {
            if !target.is_blank() {
                warn!(record, field, "remote value is empty, keeping default");
            }
            false
        }
        Some(value) if value == target => false,
        Some(value) => {
            *target = value.clone();
            true
        }
    }
}

fn overlay_list(
    target: &mut Vec<String>,
    remote: Option<&Vec<String>>,
    record: &str,
    field: &'static str,
) -> bool {
    // Drop blank entries so `["", "x"]` does not render an empty bullet.
    let cleaned = remote.map(|items| {
        items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    });
    overlay(target, cleaned.as_ref(), record, field)
}

fn overlay_days(
    target: &mut Vec<u16>,
    remote: Option<&Vec<u16>>,
    record: &str,
    field: &'static str,
) -> bool {
    let cleaned = remote.map(|days| {
        days.iter()
            .copied()
            .filter(|d| (1..=crate::calendar::DAYS_IN_YEAR).contains(d))
            .collect::<Vec<_>>()
    });
    overlay(target, cleaned.as_ref(), record, field)
}

/// Merge remote steps onto `defaults`, keyed by step number.
pub fn merge_steps(defaults: &[Step], remote: &[RemoteStep]) -> Vec<Step> {
    let mut merged = defaults.to_vec();
    for row in remote {
        let Some(step) = merged.iter_mut().find(|s| s.number == row.number) else {
            debug!(number = row.number, "remote step has no default, ignoring");
            continue;
        };
        let key = step.slug();
        let mut changed = 0;
        changed += usize::from(overlay(&mut step.text, row.text.as_ref(), &key, "text"));
        changed += usize::from(overlay(&mut step.month, row.month.as_ref(), &key, "month"));
        changed += usize::from(overlay(
            &mut step.principle,
            row.principle.as_ref(),
            &key,
            "principle",
        ));
        changed += usize::from(overlay_list(
            &mut step.description,
            row.description.as_ref(),
            &key,
            "description",
        ));
        changed += usize::from(overlay_list(
            &mut step.questions,
            row.questions.as_ref(),
            &key,
            "questions",
        ));
        changed += usize::from(overlay(&mut step.hook, row.hook.as_ref(), &key, "hook"));
        changed += usize::from(overlay(&mut step.tagline, row.tagline.as_ref(), &key, "tagline"));
        changed += usize::from(overlay(
            &mut step.pull_quote,
            row.pull_quote.as_ref(),
            &key,
            "pull_quote",
        ));
        changed += usize::from(overlay_list(&mut step.tools, row.tools.as_ref(), &key, "tools"));
        debug!(step = %key, fields = changed, "merged remote step");
    }
    merged
}

/// Merge remote themes onto `defaults`, keyed by slug.
pub fn merge_themes(defaults: &[Theme], remote: &[RemoteTheme]) -> Vec<Theme> {
    let mut merged = defaults.to_vec();
    for row in remote {
        let slug = row.slug.trim();
        let Some(theme) = merged.iter_mut().find(|t| t.slug.eq_ignore_ascii_case(slug)) else {
            debug!(slug, "remote theme has no default, ignoring");
            continue;
        };
        let key = theme.slug.clone();
        let mut changed = 0;
        changed += usize::from(overlay(&mut theme.name, row.name.as_ref(), &key, "name"));
        changed += usize::from(overlay(
            &mut theme.short_description,
            row.short_description.as_ref(),
            &key,
            "short_description",
        ));
        changed += usize::from(overlay(
            &mut theme.meta_description,
            row.meta_description.as_ref(),
            &key,
            "meta_description",
        ));
        changed += usize::from(overlay(&mut theme.body, row.body.as_ref(), &key, "body"));
        changed += usize::from(overlay(
            &mut theme.pull_quote,
            row.pull_quote.as_ref(),
            &key,
            "pull_quote",
        ));
        changed += usize::from(overlay_list(
            &mut theme.theme_tags,
            row.theme_tags.as_ref(),
            &key,
            "theme_tags",
        ));
        changed += usize::from(overlay_list(&mut theme.tools, row.tools.as_ref(), &key, "tools"));
        changed += usize::from(overlay_days(
            &mut theme.featured_days,
            row.featured_days.as_ref(),
            &key,
            "featured_days",
        ));
        changed += usize::from(overlay(&mut theme.image, row.image.as_ref(), &key, "image"));
        debug!(theme = %key, fields = changed, "merged remote theme");
    }
    merged
}
