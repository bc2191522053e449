//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from the changelog domain model
//! to keep this crate pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A milestone with the pull requests attached to it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Milestone {
    /// Milestone title (e.g., "1.2.0")
    pub title: String,

    /// Milestone number, used by the REST API
    pub number: u64,

    /// Milestone URL for opening in browser
    pub url: String,

    /// Current milestone description
    pub description: Option<String>,

    /// Open and merged pull requests in the milestone
    pub pull_requests: Vec<MilestonePullRequest>,
}

/// A pull request as listed in a milestone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MilestonePullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// PR body/description, empty when the author left it blank
    pub body: String,

    /// PR URL for opening in browser
    pub url: String,

    /// PR state as reported by GraphQL (`OPEN` or `MERGED`)
    pub state: String,

    /// Label names, e.g. `type: bug`
    pub labels: Vec<String>,
}

/// Fields to change on a milestone; `None` leaves a field as it is
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MilestoneUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Due date, sent as an ISO 8601 timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_milestone_update_sends_only_set_fields() {
        let update = MilestoneUpdate {
            title: Some("1.0.2".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "title": "1.0.2" })
        );
    }

    #[test]
    fn test_milestone_update_due_date_format() {
        let update = MilestoneUpdate {
            description: Some("text".to_string()),
            due_on: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "description": "text", "due_on": "2024-05-01T12:30:00Z" })
        );
    }
}
