//! GitHub API client for release automation
//!
//! This crate provides a trait-based GitHub API client covering the
//! milestone operations of a release: reading a milestone with its pull
//! requests, assigning milestones to issues and editing a milestone's
//! title, description and due date.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_milestone()                             │
//! │  - assign_milestone_to_issue()                   │
//! │  - update_milestone()                            │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ OctocrabClient  │         │ test doubles        │
//! │ (GraphQL+REST)  │         │                     │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{create_client, GitHubClient, TokenResolver};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = create_client(&TokenResolver::new(), None).await?;
//! if let Some(milestone) = client.fetch_milestone("owner", "repo", "1.0.1").await? {
//!     println!("{} PRs", milestone.pull_requests.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod client_manager;
mod graphql;
pub mod octocrab_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use client::GitHubClient;
pub use client_manager::{create_client, TokenResolver};
pub use octocrab_client::OctocrabClient;
pub use types::{Milestone, MilestonePullRequest, MilestoneUpdate};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
