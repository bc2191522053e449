//! Release notes configuration
//!
//! Configuration loaded from `.gh-release-notes.toml`. Every field has a
//! default so an empty file (or no file at all) yields the stock changelog
//! layout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::validation::{ChangelogRules, ConfigError};

/// Top-level configuration file
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ReleaseConfig {
    /// Changelog generation settings
    #[serde(default)]
    pub changelog: ChangelogConfig,
}

/// Settings that drive changelog assembly
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChangelogConfig {
    /// Pull request body headings whose content is copied into the changelog
    #[serde(default = "default_headings")]
    pub headings: Vec<String>,

    /// Output sections, evaluated in order. The last one must be the wildcard.
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,

    /// Host groupings, evaluated in order. The last one must hold the wildcard host.
    #[serde(default = "default_domains")]
    pub domains: Vec<DomainConfig>,

    /// Line ending used throughout the generated markdown
    #[serde(default)]
    pub line_ending: LineEnding,

    /// Presentation of the domain/host/module tags in each entry summary
    #[serde(default)]
    pub badges: BadgeStyles,
}

/// One changelog section, e.g. "Bug fixes"
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SectionConfig {
    /// Display heading, rendered after `### `
    pub title: String,
    /// Type label pattern, or `*` for everything not claimed earlier
    pub label: String,
}

/// A named group of hosts, e.g. "3d" for maya and houdini
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DomainConfig {
    /// Domain name shown as a badge
    pub name: String,
    /// Host labels in priority order; `*` matches any remaining pull request
    pub hosts: Vec<String>,
}

impl DomainConfig {
    /// Whether this bucket catches every pull request not resolved earlier
    pub fn is_wildcard(&self) -> bool {
        self.hosts.iter().any(|host| host == crate::WILDCARD)
    }
}

/// Line ending convention of the generated document
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix style `\n`
    #[default]
    Lf,
    /// Windows style `\r\n`
    CrLf,
}

impl LineEnding {
    /// The literal line terminator
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styling of a single summary badge
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    /// HTML color of the badge text
    pub color: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl BadgeStyle {
    fn italic(color: &str) -> Self {
        Self {
            color: color.to_string(),
            bold: false,
            italic: true,
        }
    }
}

/// Badge styling per facet
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BadgeStyles {
    #[serde(default = "default_domain_badge")]
    pub domain: BadgeStyle,
    #[serde(default = "default_hosts_badge")]
    pub hosts: BadgeStyle,
    #[serde(default = "default_modules_badge")]
    pub modules: BadgeStyle,
}

impl Default for BadgeStyles {
    fn default() -> Self {
        Self {
            domain: default_domain_badge(),
            hosts: default_hosts_badge(),
            modules: default_modules_badge(),
        }
    }
}

fn default_domain_badge() -> BadgeStyle {
    BadgeStyle::italic("#367F6C")
}

fn default_hosts_badge() -> BadgeStyle {
    BadgeStyle::italic("#365E7F")
}

fn default_modules_badge() -> BadgeStyle {
    BadgeStyle::italic("#1E1B7B")
}

fn default_headings() -> Vec<String> {
    ["Brief description", "Description", "Changelog Description"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_sections() -> Vec<SectionConfig> {
    [
        ("**🆕 New features**", "feature"),
        ("**🚀 Enhancements**", "enhancement"),
        ("**🐛 Bug fixes**", "bug"),
        ("**🔀 Refactored code**", "refactor"),
        ("**📃 Documentation**", "documentation"),
        ("**📃 Testing**", "unittest"),
        ("**Merged pull requests**", crate::WILDCARD),
    ]
    .into_iter()
    .map(|(title, label)| SectionConfig {
        title: title.to_string(),
        label: label.to_string(),
    })
    .collect()
}

fn default_domains() -> Vec<DomainConfig> {
    let domain = |name: &str, hosts: &[&str]| DomainConfig {
        name: name.to_string(),
        hosts: hosts.iter().map(|h| h.to_string()).collect(),
    };

    vec![
        domain("3d", &["maya", "houdini", "ue", "3dsmax", "blender"]),
        domain(
            "2d",
            &[
                "nuke",
                "fusion",
                "tv paint",
                "after effects",
                "harmony",
                "photoshop",
            ],
        ),
        domain("editorial", &["hiero", "flame", "resolve"]),
        domain("other", &[crate::WILDCARD]),
    ]
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            headings: default_headings(),
            sections: default_sections(),
            domains: default_domains(),
            line_ending: LineEnding::default(),
            badges: BadgeStyles::default(),
        }
    }
}

impl ChangelogConfig {
    /// Check the configuration and compile it into matching rules
    pub fn validate(&self) -> Result<ChangelogRules, ConfigError> {
        ChangelogRules::compile(self)
    }
}

impl ReleaseConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse release notes config")
    }

    /// Load config from an explicit path, failing if it cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded release notes config from {}", path.display());
        Ok(config)
    }

    /// Load config from the usual locations, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded release notes config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default release notes config");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChangelogConfig::default();
        assert_eq!(config.headings.len(), 3);
        assert_eq!(config.sections.last().unwrap().label, "*");
        assert!(config.domains.last().unwrap().is_wildcard());
        assert_eq!(config.line_ending, LineEnding::Lf);
        assert_eq!(config.badges.domain.color, "#367F6C");
        assert!(config.badges.hosts.italic);
        assert!(!config.badges.modules.bold);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            [changelog]
            line_ending = "crlf"
            headings = ["Summary"]
        "#;
        let config = ReleaseConfig::from_toml(toml).unwrap();
        assert_eq!(config.changelog.line_ending, LineEnding::CrLf);
        assert_eq!(config.changelog.headings, vec!["Summary".to_string()]);
        // Other fields should use defaults
        assert_eq!(config.changelog.sections.len(), 7);
        assert_eq!(config.changelog.domains.len(), 4);
    }

    #[test]
    fn test_config_deserialize_sections_and_domains() {
        let toml = r#"
            [[changelog.sections]]
            title = "Fixes"
            label = "bug"

            [[changelog.sections]]
            title = "Other"
            label = "*"

            [[changelog.domains]]
            name = "3d"
            hosts = ["maya", "houdini"]

            [[changelog.domains]]
            name = "other"
            hosts = ["*"]

            [changelog.badges.hosts]
            color = "red"
            bold = true
        "#;
        let config = ReleaseConfig::from_toml(toml).unwrap();
        let changelog = config.changelog;
        assert_eq!(changelog.sections[0].label, "bug");
        assert_eq!(changelog.domains[0].hosts, vec!["maya", "houdini"]);
        assert_eq!(changelog.badges.hosts.color, "red");
        assert!(changelog.badges.hosts.bold);
        assert!(!changelog.badges.hosts.italic);
        assert_eq!(changelog.badges.domain, default_domain_badge());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ReleaseConfig::from_toml("").unwrap();
        assert_eq!(config.changelog.sections, default_sections());
    }

    #[test]
    fn test_invalid_line_ending_is_rejected() {
        let toml = r#"
            [changelog]
            line_ending = "cr"
        "#;
        assert!(ReleaseConfig::from_toml(toml).is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[changelog]\nline_ending = \"crlf\"\n").unwrap();

        let config = ReleaseConfig::load_from(&path).unwrap();
        assert_eq!(config.changelog.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReleaseConfig::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_line_ending_as_str() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::CrLf.to_string(), "\r\n");
    }
}
