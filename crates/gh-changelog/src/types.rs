use std::collections::BTreeSet;

use crate::classify::classify_labels;
use crate::extract::{extract_sections, Body};

/// A pull request as it enters the changelog
///
/// Facets are derived from `labels` once at construction. The domain is
/// assigned by [`crate::assemble`] and is `None` until then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub title: String,
    pub body: String,
    pub url: String,
    pub number: u64,
    pub labels: Vec<String>,
    types: BTreeSet<String>,
    hosts: BTreeSet<String>,
    modules: BTreeSet<String>,
    domain: Option<String>,
}

impl PullRequest {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        url: impl Into<String>,
        number: u64,
        labels: Vec<String>,
    ) -> Self {
        let facets = classify_labels(&labels);
        Self {
            title: title.into(),
            body: body.into(),
            url: url.into(),
            number,
            labels,
            types: facets.types,
            hosts: facets.hosts,
            modules: facets.modules,
            domain: None,
        }
    }

    pub fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn hosts(&self) -> &BTreeSet<String> {
        &self.hosts
    }

    pub fn modules(&self) -> &BTreeSet<String> {
        &self.modules
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Whether the pull request is labelled for `host`, ignoring case
    pub fn has_host(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }

    pub(crate) fn set_domain(&mut self, domain: &str) {
        self.domain = Some(domain.to_string());
    }

    /// HTML link to the pull request, e.g. `<a href="...">#42</a>`
    pub fn link(&self) -> String {
        format!("<a href=\"{}\">#{}</a>", self.url, self.number)
    }

    /// Extract the changelog relevant parts of the description
    pub fn description(&self, headings: &[String]) -> Body {
        extract_sections(&self.body, headings)
    }
}

/// One rendered section with its pull requests in final order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSection {
    pub title: String,
    pub pulls: Vec<PullRequest>,
}

/// Sorted changelog ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    /// All configured sections in order, including empty ones
    pub sections: Vec<ChangelogSection>,
}

impl Changelog {
    /// Total number of pull requests across all sections
    pub fn pull_count(&self) -> usize {
        self.sections.iter().map(|s| s.pulls.len()).sum()
    }
}
