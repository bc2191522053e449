//! GraphQL wire format for the milestone query

use serde::Deserialize;

use crate::types::{Milestone, MilestonePullRequest};

/// Pull requests fetched per request
pub(crate) const PAGE_SIZE: u32 = 100;

/// Labels fetched per pull request
pub(crate) const LABEL_LIMIT: u32 = 20;

/// Milestones searched per request; the title search is fuzzy
pub(crate) const MILESTONE_LIMIT: u32 = 20;

pub(crate) const MILESTONE_QUERY: &str = r#"
query ($owner: String!, $repo: String!, $milestone: String!, $first: Int!, $labels: Int!, $milestones: Int!, $after: String) {
  repository(owner: $owner, name: $repo) {
    milestones(query: $milestone, first: $milestones) {
      nodes {
        title
        number
        url
        description
        pullRequests(states: [OPEN, MERGED], first: $first, after: $after) {
          pageInfo { hasNextPage endCursor }
          nodes {
            number
            title
            body
            url
            state
            labels(first: $labels) { nodes { name } }
          }
        }
      }
    }
  }
}
"#;

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Turn reported errors or missing data into an error
    pub fn into_data(self) -> anyhow::Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<_> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(anyhow::anyhow!("GraphQL error: {}", messages.join("; ")));
        }
        self.data
            .ok_or_else(|| anyhow::anyhow!("GraphQL response without data"))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MilestoneData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryNode {
    pub milestones: Connection<MilestoneNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MilestoneNode {
    pub title: String,
    pub number: u64,
    pub url: String,
    pub description: Option<String>,
    pub pull_requests: PagedConnection<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PagedConnection<T> {
    pub page_info: PageInfo,
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestNode {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub url: String,
    pub state: String,
    pub labels: Option<Connection<LabelNode>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelNode {
    pub name: String,
}

impl From<PullRequestNode> for MilestonePullRequest {
    fn from(node: PullRequestNode) -> Self {
        Self {
            number: node.number,
            title: node.title,
            body: node.body.unwrap_or_default(),
            url: node.url,
            state: node.state,
            labels: node
                .labels
                .map(|labels| labels.nodes.into_iter().map(|l| l.name).collect())
                .unwrap_or_default(),
        }
    }
}

impl MilestoneData {
    /// The milestone whose title equals `title` exactly
    pub fn take_milestone(self, title: &str) -> Option<MilestoneNode> {
        self.repository?
            .milestones
            .nodes
            .into_iter()
            .find(|m| m.title == title)
    }
}

impl MilestoneNode {
    /// Start a milestone from the first page; further pages are appended
    pub fn into_milestone(self) -> (Milestone, PageInfo) {
        let milestone = Milestone {
            title: self.title,
            number: self.number,
            url: self.url,
            description: self.description,
            pull_requests: self
                .pull_requests
                .nodes
                .into_iter()
                .map(MilestonePullRequest::from)
                .collect(),
        };
        (milestone, self.pull_requests.page_info)
    }
}
