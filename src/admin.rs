//! The admin action endpoint, as seen from the generated site.
//!
//! The admin panel is a browser app that posts `{action, data}` envelopes to
//! a single server-side endpoint. The generator never calls it; it only
//! renders the admin shell page with a bootstrap block describing the
//! endpoint, the action set and which reading fields may be patched.
//!
//! ```json
//! {"action": "update_reading", "data": {"day_of_year": 60, "fields": {"title": "..."}}}
//! ```
//!
//! [`AdminAction`] is the one list of actions. The bootstrap block is built
//! from [`AdminAction::ALL`], and each action's wire name is its serde name.

use serde::Serialize;

/// Reading columns the admin panel may patch. Everything else (id, day,
/// moderation timestamps) is owned by the server.
pub const READING_EDITABLE_FIELDS: &[&str] = &[
    "title",
    "opening",
    "body",
    "quote",
    "thought_for_day",
    "application",
    "step_theme",
    "secondary_theme",
    "display_date",
    "admin_notes",
];

/// One operation the admin endpoint dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    GetReading,
    UpdateReading,
    MarkFeedbackAddressed,
    MarkReviewed,
    /// Address every open feedback row for a day and mark the reading reviewed.
    BulkAddressAndReview,
    ResetRatings,
    GetStep,
    UpdateStep,
    GetTheme,
    UpdateTheme,
    ListAppFeedback,
    DeleteAppFeedback,
    /// Public: sent by the rating widget on every reading page.
    SubmitRating,
}

impl AdminAction {
    pub const ALL: [AdminAction; 13] = [
        AdminAction::GetReading,
        AdminAction::UpdateReading,
        AdminAction::MarkFeedbackAddressed,
        AdminAction::MarkReviewed,
        AdminAction::BulkAddressAndReview,
        AdminAction::ResetRatings,
        AdminAction::GetStep,
        AdminAction::UpdateStep,
        AdminAction::GetTheme,
        AdminAction::UpdateTheme,
        AdminAction::ListAppFeedback,
        AdminAction::DeleteAppFeedback,
        AdminAction::SubmitRating,
    ];

    /// Wire name of the action.
    pub fn name(self) -> &'static str {
        match self {
            AdminAction::GetReading => "get_reading",
            AdminAction::UpdateReading => "update_reading",
            AdminAction::MarkFeedbackAddressed => "mark_feedback_addressed",
            AdminAction::MarkReviewed => "mark_reviewed",
            AdminAction::BulkAddressAndReview => "bulk_address_and_review",
            AdminAction::ResetRatings => "reset_ratings",
            AdminAction::GetStep => "get_step",
            AdminAction::UpdateStep => "update_step",
            AdminAction::GetTheme => "get_theme",
            AdminAction::UpdateTheme => "update_theme",
            AdminAction::ListAppFeedback => "list_app_feedback",
            AdminAction::DeleteAppFeedback => "delete_app_feedback",
            AdminAction::SubmitRating => "submit_rating",
        }
    }

    pub fn is_mutating(self) -> bool {
        !matches!(
            self,
            AdminAction::GetReading
                | AdminAction::GetStep
                | AdminAction::GetTheme
                | AdminAction::ListAppFeedback
        )
    }

    /// Needs a bearer credential with the admin role.
    pub fn requires_admin(self) -> bool {
        self != AdminAction::SubmitRating
    }
}

/// How one action is described to the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActionSpec {
    pub name: &'static str,
    pub mutating: bool,
    pub admin_only: bool,
}

impl From<AdminAction> for ActionSpec {
    fn from(action: AdminAction) -> Self {
        Self {
            name: action.name(),
            mutating: action.is_mutating(),
            admin_only: action.requires_admin(),
        }
    }
}

/// JSON handed to the admin panel in the shell page.
#[derive(Debug, Clone, Serialize)]
pub struct AdminBootstrap<'a> {
    pub endpoint: &'a str,
    pub actions: Vec<ActionSpec>,
    pub reading_fields: &'static [&'static str],
}

impl<'a> AdminBootstrap<'a> {
    pub fn new(endpoint: &'a str) -> Self {
        Self {
            endpoint,
            actions: AdminAction::ALL.into_iter().map(ActionSpec::from).collect(),
            reading_fields: READING_EDITABLE_FIELDS,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn wire_names_match_serde_names() {
        for action in AdminAction::ALL {
            assert_eq!(serde_json::to_value(action).unwrap(), json!(action.name()));
        }
    }

    #[test]
    fn only_rating_submission_is_public() {
        let public: Vec<_> = AdminAction::ALL
            .into_iter()
            .filter(|a| !a.requires_admin())
            .collect();
        assert_eq!(public, vec![AdminAction::SubmitRating]);
        assert!(AdminAction::SubmitRating.is_mutating());
    }

    #[test]
    fn reads_are_not_mutating() {
        assert!(!AdminAction::GetStep.is_mutating());
        assert!(!AdminAction::ListAppFeedback.is_mutating());
        assert!(AdminAction::ResetRatings.is_mutating());
        assert!(AdminAction::ResetRatings.requires_admin());
    }

    #[test]
    fn bootstrap_lists_every_action_once() {
        let json = AdminBootstrap::new("/api/admin").to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["endpoint"], "/api/admin");

        let actions = value["actions"].as_array().unwrap();
        assert_eq!(actions.len(), AdminAction::ALL.len());
        assert_eq!(
            actions[1],
            json!({"name": "update_reading", "mutating": true, "admin_only": true})
        );
        assert_eq!(
            actions[12],
            json!({"name": "submit_rating", "mutating": true, "admin_only": false})
        );

        let fields = value["reading_fields"].as_array().unwrap();
        assert!(fields.contains(&json!("admin_notes")));
        assert!(!fields.contains(&json!("day_of_year")));
    }
}
