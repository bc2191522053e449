//! Release operations on top of a [`GitHubClient`]

use std::sync::OnceLock;

use anyhow::{Context, Result};
use gh_changelog::{assemble, release_header, ChangelogRenderer, PullRequest};
use gh_client::{GitHubClient, Milestone, MilestonePullRequest, MilestoneUpdate};
use gh_release_config::ChangelogRules;
use log::{debug, info};
use regex::Regex;

use crate::cli::RepoRef;

/// Tags bounding a release
#[derive(Debug, Clone)]
pub struct ReleaseTags<'a> {
    pub old: &'a str,
    pub new: &'a str,
}

fn to_pull_request(pr: MilestonePullRequest) -> PullRequest {
    PullRequest::new(pr.title, pr.body, pr.url, pr.number, pr.labels)
}

async fn require_milestone(
    client: &dyn GitHubClient,
    repo: &RepoRef,
    title: &str,
) -> Result<Milestone> {
    client
        .fetch_milestone(&repo.owner, &repo.name, title)
        .await
        .with_context(|| format!("Failed to fetch milestone '{}'", title))?
        .with_context(|| format!("Milestone '{}' not found in {}", title, repo.path()))
}

/// Render the changelog of a milestone, headed by a link to the full diff
pub async fn generate_changelog(
    client: &dyn GitHubClient,
    repo: &RepoRef,
    milestone: &str,
    tags: ReleaseTags<'_>,
    rules: &ChangelogRules,
) -> Result<String> {
    let milestone = require_milestone(client, repo, milestone).await?;
    info!(
        "Collected {} pull requests from milestone '{}'",
        milestone.pull_requests.len(),
        milestone.title
    );

    let pulls: Vec<PullRequest> = milestone
        .pull_requests
        .into_iter()
        .map(to_pull_request)
        .collect();
    for pull in &pulls {
        debug!(
            "#{} types={:?} hosts={:?} modules={:?}",
            pull.number,
            pull.types(),
            pull.hosts(),
            pull.modules()
        );
    }

    let changelog = assemble(pulls, rules);
    let body = ChangelogRenderer::new(rules).render(&changelog);

    let mut document = release_header(&repo.path(), tags.old, tags.new, rules.line_ending);
    document.push_str(&body);
    Ok(document)
}

/// Append a changelog to the description of a milestone
///
/// Returns `false` without touching the milestone when the description
/// already contains the changelog.
pub async fn set_milestone_changelog(
    client: &dyn GitHubClient,
    repo: &RepoRef,
    milestone: &str,
    changelog: &str,
) -> Result<bool> {
    let milestone = require_milestone(client, repo, milestone).await?;
    let description = milestone.description.unwrap_or_default();
    if description.contains(changelog) {
        info!("Milestone '{}' already holds this changelog", milestone.title);
        return Ok(false);
    }

    let update = MilestoneUpdate {
        description: Some(format!("{}{}", description, changelog)),
        ..Default::default()
    };
    client
        .update_milestone(&repo.owner, &repo.name, milestone.number, &update)
        .await?;
    info!("Changelog added to milestone '{}'", milestone.title);
    Ok(true)
}

/// Marker of the line recording the commit that closed a milestone
const CLOSING_COMMIT_MARKER: &str = "closing-commit-hash:";

/// Last commit hash recorded in a milestone description
fn closing_commit(description: &str) -> Option<&str> {
    static COMMIT_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

    let re = COMMIT_REGEX
        .get_or_init(|| Regex::new(&format!(r"{}\s([a-z0-9]+)", CLOSING_COMMIT_MARKER)).ok())
        .as_ref()?;

    re.captures_iter(description)
        .last()
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Commit hash recorded as closing a milestone, if any
pub async fn milestone_commit(
    client: &dyn GitHubClient,
    repo: &RepoRef,
    milestone: &str,
) -> Result<Option<String>> {
    let milestone = require_milestone(client, repo, milestone).await?;
    let description = milestone.description.unwrap_or_default();
    Ok(closing_commit(&description).map(str::to_string))
}

/// Record the commit closing a milestone and set its due date to now
///
/// The commit line is put in front of the description. Returns `false`
/// without touching the milestone when a commit is already recorded.
pub async fn set_milestone_commit(
    client: &dyn GitHubClient,
    repo: &RepoRef,
    milestone: &str,
    commit_sha: &str,
) -> Result<bool> {
    let sha = commit_sha.trim().to_ascii_lowercase();
    if sha.is_empty() || !sha.chars().all(|c| c.is_ascii_alphanumeric()) {
        anyhow::bail!("Invalid commit hash '{}'", commit_sha);
    }

    let milestone = require_milestone(client, repo, milestone).await?;
    let description = milestone.description.unwrap_or_default();
    if let Some(existing) = closing_commit(&description) {
        info!(
            "Milestone '{}' already records commit {}",
            milestone.title, existing
        );
        return Ok(false);
    }

    let update = MilestoneUpdate {
        description: Some(format!(
            "{} {}\n{}",
            CLOSING_COMMIT_MARKER, sha, description
        )),
        due_on: Some(chrono::Utc::now()),
        ..Default::default()
    };
    client
        .update_milestone(&repo.owner, &repo.name, milestone.number, &update)
        .await?;
    info!("Recorded commit {} on milestone '{}'", sha, milestone.title);
    Ok(true)
}

/// Rename a milestone
pub async fn set_milestone_title(
    client: &dyn GitHubClient,
    repo: &RepoRef,
    milestone: &str,
    new_title: &str,
) -> Result<()> {
    if new_title.trim().is_empty() {
        anyhow::bail!("New milestone title must not be empty");
    }

    let milestone = require_milestone(client, repo, milestone).await?;
    let update = MilestoneUpdate {
        title: Some(new_title.to_string()),
        ..Default::default()
    };
    client
        .update_milestone(&repo.owner, &repo.name, milestone.number, &update)
        .await?;
    info!("Renamed milestone '{}' to '{}'", milestone.title, new_title);
    Ok(())
}

/// Put an issue or pull request into a milestone
pub async fn assign_milestone(
    client: &dyn GitHubClient,
    repo: &RepoRef,
    milestone_number: u64,
    issue_number: u64,
) -> Result<()> {
    client
        .assign_milestone_to_issue(&repo.owner, &repo.name, issue_number, milestone_number)
        .await?;
    info!(
        "Assigned milestone #{} to #{} in {}",
        milestone_number,
        issue_number,
        repo.path()
    );
    Ok(())
}
