//! GitHub client trait
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy.

use crate::types::{Milestone, MilestoneUpdate};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Defines the interface for the milestone operations of a release.
/// Implementations can hit the API directly or be replaced by a mock
/// in tests.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, Milestone};
///
/// async fn milestone(client: &dyn GitHubClient) -> anyhow::Result<Option<Milestone>> {
///     client.fetch_milestone("ynput", "ayon-core", "1.0.1").await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch a milestone and all of its open and merged pull requests
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner (user or organization)
    /// * `repo` - Repository name
    /// * `title` - Exact milestone title (e.g., "1.0.1")
    ///
    /// # Returns
    ///
    /// The milestone, `None` if no milestone has exactly this title.
    async fn fetch_milestone(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
    ) -> anyhow::Result<Option<Milestone>>;

    /// Assign a milestone to an issue or pull request
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `issue_number` - Issue or pull request number
    /// * `milestone_number` - Milestone number
    async fn assign_milestone_to_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        milestone_number: u64,
    ) -> anyhow::Result<()>;

    /// Edit the title, description or due date of a milestone
    ///
    /// Only the fields set in `update` are sent.
    async fn update_milestone(
        &self,
        owner: &str,
        repo: &str,
        milestone_number: u64,
        update: &MilestoneUpdate,
    ) -> anyhow::Result<()>;
}
