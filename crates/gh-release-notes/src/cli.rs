use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Milestone changelog generation for GitHub repositories
#[derive(Debug, Parser)]
#[command(name = "gh-release-notes", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file; defaults to the usual locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Repository owner
    #[arg(long, global = true, env = "GITHUB_REPOSITORY_OWNER")]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, global = true, env = "GITHUB_REPOSITORY_NAME")]
    pub repo: Option<String>,

    /// GitHub host for GitHub Enterprise installations
    #[arg(long, global = true, env = "GITHUB_HOST")]
    pub host: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a changelog from the pull requests of a milestone
    Generate {
        /// Milestone title, e.g. `1.0.1`
        #[arg(long)]
        milestone: String,
        /// Tag of the previous release
        #[arg(long)]
        old_tag: String,
        /// Tag of the new release
        #[arg(long)]
        new_tag: String,
        /// Write the changelog here instead of a temporary file
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Merge a generated changelog into a changelog file
    AddToChangelog {
        /// Generated changelog
        #[arg(long, value_name = "PATH")]
        new_changelog_path: PathBuf,
        /// Changelog file to update, usually `CHANGELOG.md`
        #[arg(long, value_name = "PATH", default_value = "CHANGELOG.md")]
        changelog_path: PathBuf,
    },
    /// Assign a milestone to an issue or pull request
    AssignMilestone {
        /// Milestone number
        #[arg(long)]
        milestone_id: u64,
        /// Issue or pull request number
        #[arg(long)]
        issue_id: u64,
    },
    /// Append a generated changelog to a milestone description
    SetMilestoneChangelog {
        /// Milestone title, e.g. `1.0.1`
        #[arg(long)]
        milestone: String,
        /// Generated changelog
        #[arg(long, value_name = "PATH")]
        changelog_path: PathBuf,
    },
    /// Print the closing commit recorded in a milestone description
    GetMilestoneCommit {
        /// Milestone title, e.g. `1.0.1`
        #[arg(long)]
        milestone: String,
    },
    /// Record the closing commit of a milestone and set its due date
    SetMilestoneCommit {
        /// Milestone title, e.g. `1.0.1`
        #[arg(long)]
        milestone: String,
        /// Commit hash closing the milestone
        #[arg(long)]
        commit_sha: String,
    },
    /// Rename a milestone
    SetMilestoneTitle {
        /// Current milestone title
        #[arg(long)]
        milestone: String,
        /// New milestone title
        #[arg(long)]
        new_title: String,
    },
}

/// Owner and name of the repository the commands act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// `owner/name`, as used in GitHub URLs
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl Cli {
    /// Repository from `--owner`/`--repo` or the environment
    pub fn repo_ref(&self) -> anyhow::Result<RepoRef> {
        let owner = self.owner.clone().ok_or_else(|| {
            anyhow::anyhow!("Repository owner missing, pass --owner or set GITHUB_REPOSITORY_OWNER")
        })?;
        let name = self.repo.clone().ok_or_else(|| {
            anyhow::anyhow!("Repository name missing, pass --repo or set GITHUB_REPOSITORY_NAME")
        })?;
        Ok(RepoRef { owner, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "gh-release-notes",
            "--owner",
            "ynput",
            "--repo",
            "ayon-core",
            "generate",
            "--milestone",
            "1.0.1",
            "--old-tag",
            "1.0.0",
            "--new-tag",
            "1.0.1",
        ])
        .unwrap();

        assert_eq!(cli.repo_ref().unwrap().path(), "ynput/ayon-core");
        match cli.command {
            Command::Generate {
                milestone, output, ..
            } => {
                assert_eq!(milestone, "1.0.1");
                assert!(output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gh-release-notes",
            "assign-milestone",
            "--milestone-id",
            "3",
            "--issue-id",
            "42",
            "--debug",
        ])
        .unwrap();
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Command::AssignMilestone {
                milestone_id: 3,
                issue_id: 42
            }
        ));
    }

    #[test]
    fn test_add_to_changelog_default_path() {
        let cli = Cli::try_parse_from([
            "gh-release-notes",
            "add-to-changelog",
            "--new-changelog-path",
            "/tmp/new.md",
        ])
        .unwrap();
        match cli.command {
            Command::AddToChangelog { changelog_path, .. } => {
                assert_eq!(changelog_path, PathBuf::from("CHANGELOG.md"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_milestone_commands() {
        let cli = Cli::try_parse_from([
            "gh-release-notes",
            "set-milestone-commit",
            "--milestone",
            "1.0.1",
            "--commit-sha",
            "9f3a2c1",
        ])
        .unwrap();
        match cli.command {
            Command::SetMilestoneCommit {
                milestone,
                commit_sha,
            } => {
                assert_eq!(milestone, "1.0.1");
                assert_eq!(commit_sha, "9f3a2c1");
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from([
            "gh-release-notes",
            "set-milestone-title",
            "--milestone",
            "next-patch",
            "--new-title",
            "1.0.2",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::SetMilestoneTitle { ref new_title, .. } if new_title == "1.0.2"
        ));

        let cli =
            Cli::try_parse_from(["gh-release-notes", "get-milestone-commit", "--milestone", "1.0.1"])
                .unwrap();
        assert!(matches!(cli.command, Command::GetMilestoneCommit { .. }));
    }

    #[test]
    fn test_missing_required_argument() {
        let result = Cli::try_parse_from(["gh-release-notes", "generate", "--milestone", "1.0"]);
        assert!(result.is_err());
    }
}
