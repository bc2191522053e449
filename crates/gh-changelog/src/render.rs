//! Markdown rendering of a sorted changelog

use std::collections::BTreeSet;

use gh_release_config::{BadgeStyle, BadgeStyles, ChangelogRules, LineEnding};

use crate::flatten::Flattener;
use crate::types::{Changelog, PullRequest};

/// Renders a [`Changelog`] with collapsible entries per pull request
pub struct ChangelogRenderer<'a> {
    rules: &'a ChangelogRules,
    flattener: Flattener,
}

impl<'a> ChangelogRenderer<'a> {
    pub fn new(rules: &'a ChangelogRules) -> Self {
        Self {
            rules,
            flattener: Flattener::new(rules.line_ending),
        }
    }

    fn le(&self) -> &'static str {
        self.rules.line_ending.as_str()
    }

    /// Render all non-empty sections in configured order
    ///
    /// A changelog without pull requests renders to an empty string.
    pub fn render(&self, changelog: &Changelog) -> String {
        let le = self.le();
        let mut out = String::new();

        for section in changelog.sections.iter().filter(|s| !s.pulls.is_empty()) {
            out.push_str("### ");
            out.push_str(&section.title);
            out.push_str(le);
            out.push_str(le);

            for pull in &section.pulls {
                out.push_str(&self.render_item(pull));
            }
        }

        out
    }

    /// One collapsible entry
    pub fn render_item(&self, pull: &PullRequest) -> String {
        let le = self.le();
        let body = self.flattener.render_body(&pull.description(&self.rules.headings));

        format!(
            "{le}<details>{le}<summary>{summary}</summary>{le}{le}{body}{le}{le}___{le}{le}</details>{le}{le}",
            summary = self.summary(pull),
            body = body.trim_end(),
        )
    }

    /// Summary line: badges, title and link
    pub fn summary(&self, pull: &PullRequest) -> String {
        let badges = badges(pull, &self.rules.badges);
        if badges.is_empty() {
            format!("{} {}", pull.title, pull.link())
        } else {
            format!("{} {} {}", badges, pull.title, pull.link())
        }
    }
}

fn badges(pull: &PullRequest, styles: &BadgeStyles) -> String {
    let mut parts = Vec::new();
    if let Some(domain) = pull.domain().filter(|d| !d.is_empty()) {
        parts.push(badge(domain, &styles.domain));
    }
    if !pull.hosts().is_empty() {
        parts.push(badge(&format!("/ {}", join(pull.hosts())), &styles.hosts));
    }
    if !pull.modules().is_empty() {
        parts.push(badge(&format!("/ {}", join(pull.modules())), &styles.modules));
    }
    parts.join(" ")
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

fn badge(text: &str, style: &BadgeStyle) -> String {
    let mut html = format!("<font color='{}'>{}</font>", style.color, text);
    if style.bold {
        html = format!("<b>{}</b>", html);
    }
    if style.italic {
        html = format!("<i>{}</i>", html);
    }
    html
}

/// Header line linking the full diff between two tags
pub fn release_header(
    repo_path: &str,
    old_tag: &str,
    new_tag: &str,
    line_ending: LineEnding,
) -> String {
    let le = line_ending.as_str();
    format!(
        "[Full Changelog](https://github.com/{repo_path}/compare/{old_tag}...{new_tag}){le}{le}"
    )
}
