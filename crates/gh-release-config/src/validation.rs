//! Configuration validation
//!
//! A section or domain list without a trailing wildcard silently drops pull
//! requests at render time, so those shapes are rejected here instead.

use regex::Regex;
use thiserror::Error;

use crate::release_config::{BadgeStyles, ChangelogConfig, DomainConfig, LineEnding};
use crate::WILDCARD;

/// Errors found while validating a changelog configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No pull request body headings configured")]
    NoHeadings,

    #[error("The last section must use the wildcard label `*`, found `{0}`")]
    MissingWildcardSection(String),

    #[error("Wildcard section `{0}` must be the last section")]
    MisplacedWildcardSection(String),

    #[error("No domain buckets configured, a trailing wildcard bucket is required")]
    NoDomains,

    #[error("The last domain bucket `{0}` must contain the wildcard host `*`")]
    MissingWildcardDomain(String),

    #[error("Wildcard host in domain bucket `{0}` must only appear in the last bucket")]
    MisplacedWildcardDomain(String),

    #[error("Invalid section label pattern `{label}`: {message}")]
    InvalidSectionLabel { label: String, message: String },
}

/// A section with its label compiled into a matcher
#[derive(Debug, Clone)]
pub struct SectionRule {
    /// Display heading
    pub title: String,
    /// Raw label as configured
    pub label: String,
    /// Anchored pattern; `None` for the wildcard section
    matcher: Option<Regex>,
}

impl SectionRule {
    fn compile(title: &str, label: &str) -> Result<Self, ConfigError> {
        let matcher = if label == WILDCARD {
            None
        } else {
            let pattern = format!("^(?:{})", label);
            let regex = Regex::new(&pattern).map_err(|e| ConfigError::InvalidSectionLabel {
                label: label.to_string(),
                message: e.to_string(),
            })?;
            Some(regex)
        };

        Ok(Self {
            title: title.to_string(),
            label: label.to_string(),
            matcher,
        })
    }

    /// Whether this is the catch-all section
    pub fn is_wildcard(&self) -> bool {
        self.matcher.is_none()
    }

    /// Whether a pull request type is claimed by this section's label
    ///
    /// The label matches at the start of the type, so `doc` claims
    /// `documentation`. The wildcard section never matches directly.
    pub fn matches(&self, pr_type: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|regex| regex.is_match(pr_type))
    }
}

/// Validated, ready-to-use changelog configuration
#[derive(Debug, Clone)]
pub struct ChangelogRules {
    pub headings: Vec<String>,
    pub sections: Vec<SectionRule>,
    pub domains: Vec<DomainConfig>,
    pub line_ending: LineEnding,
    pub badges: BadgeStyles,
}

impl ChangelogRules {
    pub(crate) fn compile(config: &ChangelogConfig) -> Result<Self, ConfigError> {
        if config.headings.is_empty() {
            return Err(ConfigError::NoHeadings);
        }

        let sections = config
            .sections
            .iter()
            .map(|section| SectionRule::compile(&section.title, &section.label))
            .collect::<Result<Vec<_>, _>>()?;

        // An empty section list renders an empty document, which is fine.
        if let Some((last, rest)) = sections.split_last() {
            if !last.is_wildcard() {
                return Err(ConfigError::MissingWildcardSection(last.label.clone()));
            }
            if let Some(early) = rest.iter().find(|s| s.is_wildcard()) {
                return Err(ConfigError::MisplacedWildcardSection(early.title.clone()));
            }
        }

        let Some((last, rest)) = config.domains.split_last() else {
            return Err(ConfigError::NoDomains);
        };
        if !last.is_wildcard() {
            return Err(ConfigError::MissingWildcardDomain(last.name.clone()));
        }
        if let Some(early) = rest.iter().find(|d| d.is_wildcard()) {
            return Err(ConfigError::MisplacedWildcardDomain(early.name.clone()));
        }

        log::debug!(
            "Validated changelog config: {} sections, {} domains",
            sections.len(),
            config.domains.len()
        );

        Ok(Self {
            headings: config.headings.clone(),
            sections,
            domains: config.domains.clone(),
            line_ending: config.line_ending,
            badges: config.badges.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release_config::SectionConfig;

    fn section(title: &str, label: &str) -> SectionConfig {
        SectionConfig {
            title: title.to_string(),
            label: label.to_string(),
        }
    }

    fn domain(name: &str, hosts: &[&str]) -> DomainConfig {
        DomainConfig {
            name: name.to_string(),
            hosts: hosts.iter().map(|h| h.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let rules = ChangelogConfig::default().validate().unwrap();
        assert_eq!(rules.sections.len(), 7);
        assert!(rules.sections.last().unwrap().is_wildcard());
        assert_eq!(rules.sections.iter().filter(|s| s.is_wildcard()).count(), 1);
    }

    #[test]
    fn test_missing_wildcard_section() {
        let config = ChangelogConfig {
            sections: vec![section("Bugs", "bug")],
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::MissingWildcardSection("bug".to_string())
        );
    }

    #[test]
    fn test_misplaced_wildcard_section() {
        let config = ChangelogConfig {
            sections: vec![
                section("All", "*"),
                section("Bugs", "bug"),
                section("Rest", "*"),
            ],
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::MisplacedWildcardSection("All".to_string())
        );
    }

    #[test]
    fn test_empty_sections_are_valid() {
        let config = ChangelogConfig {
            sections: vec![],
            ..Default::default()
        };
        assert!(config.validate().unwrap().sections.is_empty());
    }

    #[test]
    fn test_missing_wildcard_domain() {
        let config = ChangelogConfig {
            domains: vec![domain("3d", &["maya"])],
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::MissingWildcardDomain("3d".to_string())
        );
    }

    #[test]
    fn test_empty_domains_are_rejected() {
        let config = ChangelogConfig {
            domains: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigError::NoDomains);
    }

    #[test]
    fn test_misplaced_wildcard_domain() {
        let config = ChangelogConfig {
            domains: vec![domain("any", &["maya", "*"]), domain("other", &["*"])],
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::MisplacedWildcardDomain("any".to_string())
        );
    }

    #[test]
    fn test_no_headings() {
        let config = ChangelogConfig {
            headings: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigError::NoHeadings);
    }

    #[test]
    fn test_invalid_label_pattern() {
        let config = ChangelogConfig {
            sections: vec![section("Broken", "bug("), section("Rest", "*")],
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidSectionLabel { label, .. } if label == "bug("
        ));
    }

    #[test]
    fn test_section_label_matches_prefix() {
        let rule = SectionRule::compile("Docs", "doc").unwrap();
        assert!(rule.matches("doc"));
        assert!(rule.matches("documentation"));
        assert!(!rule.matches("undocumented"));
    }

    #[test]
    fn test_section_label_pattern() {
        let rule = SectionRule::compile("Fixes", "bug|hotfix").unwrap();
        assert!(rule.matches("bug"));
        assert!(rule.matches("hotfix"));
        assert!(!rule.matches("feature"));
    }

    #[test]
    fn test_wildcard_section_never_matches_directly() {
        let rule = SectionRule::compile("Rest", "*").unwrap();
        assert!(rule.is_wildcard());
        assert!(!rule.matches("bug"));
    }
}
