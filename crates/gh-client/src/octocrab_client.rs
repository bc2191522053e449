//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! Milestones are read over GraphQL, edits go through the REST API.

use crate::client::GitHubClient;
use crate::graphql::{
    GraphQlResponse, MilestoneData, LABEL_LIMIT, MILESTONE_LIMIT, MILESTONE_QUERY, PAGE_SIZE,
};
use crate::types::{Milestone, MilestonePullRequest, MilestoneUpdate};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde_json::json;
use std::sync::Arc;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    async fn query_milestone_page(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        after: Option<&str>,
    ) -> anyhow::Result<MilestoneData> {
        let payload = json!({
            "query": MILESTONE_QUERY,
            "variables": {
                "owner": owner,
                "repo": repo,
                "milestone": title,
                "first": PAGE_SIZE,
                "labels": LABEL_LIMIT,
                "milestones": MILESTONE_LIMIT,
                "after": after,
            },
        });

        let response: GraphQlResponse<MilestoneData> = self
            .octocrab
            .post("/graphql", Some(&payload))
            .await
            .context("Milestone query failed")?;
        response.into_data()
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_milestone(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
    ) -> anyhow::Result<Option<Milestone>> {
        debug!("Fetching milestone '{}' for {}/{}", title, owner, repo);

        let data = self.query_milestone_page(owner, repo, title, None).await?;
        let Some(node) = data.take_milestone(title) else {
            debug!("No milestone titled '{}' in {}/{}", title, owner, repo);
            return Ok(None);
        };
        let (mut milestone, mut page) = node.into_milestone();

        while page.has_next_page {
            let Some(cursor) = page.end_cursor.take() else {
                break;
            };
            debug!(
                "Fetching next page of milestone '{}' after {} PRs",
                title,
                milestone.pull_requests.len()
            );

            let data = self
                .query_milestone_page(owner, repo, title, Some(&cursor))
                .await?;
            let node = data.take_milestone(title).with_context(|| {
                format!("Milestone '{}' disappeared while paginating", title)
            })?;

            page = node.pull_requests.page_info;
            milestone.pull_requests.extend(
                node.pull_requests
                    .nodes
                    .into_iter()
                    .map(MilestonePullRequest::from),
            );
        }

        debug!(
            "Fetched milestone '{}' with {} PRs for {}/{}",
            title,
            milestone.pull_requests.len(),
            owner,
            repo
        );
        Ok(Some(milestone))
    }

    async fn assign_milestone_to_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        milestone_number: u64,
    ) -> anyhow::Result<()> {
        debug!(
            "Assigning milestone #{} to issue #{} in {}/{}",
            milestone_number, issue_number, owner, repo
        );

        let route = format!("/repos/{}/{}/issues/{}", owner, repo, issue_number);
        let _: serde_json::Value = self
            .octocrab
            .patch(route, Some(&json!({ "milestone": milestone_number })))
            .await
            .with_context(|| format!("Failed to assign milestone to issue #{}", issue_number))?;

        Ok(())
    }

    async fn update_milestone(
        &self,
        owner: &str,
        repo: &str,
        milestone_number: u64,
        update: &MilestoneUpdate,
    ) -> anyhow::Result<()> {
        debug!(
            "Updating milestone #{} in {}/{}: {:?}",
            milestone_number, owner, repo, update
        );

        let route = format!("/repos/{}/{}/milestones/{}", owner, repo, milestone_number);
        let _: serde_json::Value = self
            .octocrab
            .patch(route, Some(update))
            .await
            .with_context(|| format!("Failed to update milestone #{}", milestone_number))?;

        Ok(())
    }
}
