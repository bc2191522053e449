mod cli;
mod pipeline;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use gh_client::{create_client, OctocrabClient, TokenResolver};
use gh_release_config::{ChangelogRules, ReleaseConfig};

use cli::{Cli, Command};
use pipeline::ReleaseTags;

#[tokio::main]
async fn main() -> Result<()> {
    // Loaded before parsing so `.env` can provide the repository arguments
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match dotenv {
        Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
        Err(_) => log::debug!(".env file not found, will rely on environment variables"),
    }

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Generate {
            milestone,
            old_tag,
            new_tag,
            output,
        } => {
            let rules = load_rules(&cli)?;
            let repo = cli.repo_ref()?;
            let client = client(&cli).await?;
            let tags = ReleaseTags {
                old: old_tag,
                new: new_tag,
            };

            let document =
                pipeline::generate_changelog(&client, &repo, milestone, tags, &rules).await?;
            let path = match output {
                Some(path) => {
                    std::fs::write(path, &document)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    path.clone()
                }
                None => write_temp_changelog(&document)?,
            };
            println!("{}", path.display());
        }
        Command::AddToChangelog {
            new_changelog_path,
            changelog_path,
        } => {
            let addition = read_changelog(new_changelog_path)?;
            let changed = gh_changelog::add_to_changelog_file(changelog_path, &addition)
                .with_context(|| format!("Failed to update {}", changelog_path.display()))?;
            println!("{}", changed);
        }
        Command::AssignMilestone {
            milestone_id,
            issue_id,
        } => {
            let repo = cli.repo_ref()?;
            let client = client(&cli).await?;
            pipeline::assign_milestone(&client, &repo, *milestone_id, *issue_id).await?;
        }
        Command::SetMilestoneChangelog {
            milestone,
            changelog_path,
        } => {
            let repo = cli.repo_ref()?;
            let changelog = read_changelog(changelog_path)?;
            let client = client(&cli).await?;
            let changed =
                pipeline::set_milestone_changelog(&client, &repo, milestone, &changelog).await?;
            println!("{}", changed);
        }
        Command::GetMilestoneCommit { milestone } => {
            let repo = cli.repo_ref()?;
            let client = client(&cli).await?;
            if let Some(commit) = pipeline::milestone_commit(&client, &repo, milestone).await? {
                println!("{}", commit);
            }
        }
        Command::SetMilestoneCommit {
            milestone,
            commit_sha,
        } => {
            let repo = cli.repo_ref()?;
            let client = client(&cli).await?;
            let changed =
                pipeline::set_milestone_commit(&client, &repo, milestone, commit_sha).await?;
            println!("{}", changed);
        }
        Command::SetMilestoneTitle {
            milestone,
            new_title,
        } => {
            let repo = cli.repo_ref()?;
            let client = client(&cli).await?;
            pipeline::set_milestone_title(&client, &repo, milestone, new_title).await?;
        }
    }

    Ok(())
}

/// Load and validate the changelog configuration
///
/// An explicit `--config` must load; implicit locations fall back to defaults.
fn load_rules(cli: &Cli) -> Result<ChangelogRules> {
    let config = match &cli.config {
        Some(path) => ReleaseConfig::load_from(path)?,
        None => ReleaseConfig::load(),
    };
    config
        .changelog
        .validate()
        .context("Invalid changelog configuration")
}

async fn client(cli: &Cli) -> Result<OctocrabClient> {
    create_client(&TokenResolver::new(), cli.host.as_deref()).await
}

fn read_changelog(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read changelog {}", path.display()))
}

/// Write to a temporary file that outlives the process and return its path
fn write_temp_changelog(document: &str) -> Result<std::path::PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("changelog-")
        .suffix(".md")
        .tempfile()
        .context("Failed to create temporary changelog file")?;
    file.write_all(document.as_bytes())
        .context("Failed to write temporary changelog file")?;
    let (_, path) = file
        .keep()
        .context("Failed to keep temporary changelog file")?;
    Ok(path)
}
