//! Configuration for gh-release-notes
//!
//! This crate provides:
//! - The TOML configuration model (sections, domains, heading labels, badges)
//! - Configuration file discovery and loading
//! - Fail-fast validation into compiled [`ChangelogRules`]

pub mod config_file;
pub mod paths;
pub mod release_config;
pub mod validation;

/// Label or host value that matches anything not claimed by an earlier entry
pub const WILDCARD: &str = "*";

pub use config_file::load_config_file;
pub use release_config::{
    BadgeStyle, BadgeStyles, ChangelogConfig, DomainConfig, LineEnding, ReleaseConfig,
    SectionConfig,
};
pub use validation::{ChangelogRules, ConfigError, SectionRule};
