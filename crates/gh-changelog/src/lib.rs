//! Milestone changelog assembly
//!
//! Turns the pull requests of a milestone into a markdown changelog:
//!
//! ```text
//! PullRequest ──▶ classify labels ──▶ assemble (sections, domains)
//!      │                                      │
//!      ▼                                      ▼
//! description ──▶ extract ──▶ flatten ──▶ ChangelogRenderer ──▶ markdown
//! ```
//!
//! Everything here is synchronous and free of network access. The only I/O
//! is [`add_to_changelog_file`], which merges a rendered release into an
//! existing `CHANGELOG.md`.
//!
//! # Example
//!
//! ```rust
//! use gh_changelog::{assemble, ChangelogRenderer, PullRequest};
//! use gh_release_config::ChangelogConfig;
//!
//! let rules = ChangelogConfig::default().validate().unwrap();
//! let pulls = vec![PullRequest::new(
//!     "Fix crash on load",
//!     "## Description\n\nLoader no longer crashes.",
//!     "https://github.com/owner/repo/pull/1",
//!     1,
//!     vec!["type: bug".to_string(), "host: maya".to_string()],
//! )];
//!
//! let changelog = assemble(pulls, &rules);
//! let markdown = ChangelogRenderer::new(&rules).render(&changelog);
//! assert!(markdown.starts_with("### **🐛 Bug fixes**"));
//! ```

pub mod changelog_file;
pub mod classify;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod markdown;
pub mod render;
pub mod sort;
pub mod types;

pub use changelog_file::{add_to_changelog_file, merge_into_changelog};
pub use classify::{classify_labels, Facets};
pub use error::ChangelogError;
pub use extract::{extract_sections, Body, SectionBody};
pub use flatten::{Flattener, Fragment};
pub use markdown::{parse_markdown, Node, NodeKind};
pub use render::{release_header, ChangelogRenderer};
pub use sort::{assemble, sort_by_domain};
pub use types::{Changelog, ChangelogSection, PullRequest};
