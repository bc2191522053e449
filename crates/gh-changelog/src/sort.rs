//! Section and domain assignment
//!
//! Pull requests are routed to the first section whose label matches one of
//! their types, then ordered within each section by domain priority.

use gh_release_config::{ChangelogRules, DomainConfig, SectionRule, WILDCARD};

use crate::types::{Changelog, ChangelogSection, PullRequest};

/// Route pull requests into sections and order each section by domain
///
/// Every section from `rules` is present in the result, empty or not.
pub fn assemble(pulls: Vec<PullRequest>, rules: &ChangelogRules) -> Changelog {
    let mut buckets: Vec<Vec<PullRequest>> = vec![Vec::new(); rules.sections.len()];

    for pull in pulls {
        match section_index(&pull, &rules.sections) {
            Some(index) => buckets[index].push(pull),
            None => log::warn!(
                "Pull request #{} matches no changelog section and is left out",
                pull.number
            ),
        }
    }

    let sections = rules
        .sections
        .iter()
        .zip(buckets)
        .map(|(rule, pulls)| ChangelogSection {
            title: rule.title.clone(),
            pulls: sort_by_domain(pulls, &rules.domains),
        })
        .collect();

    Changelog { sections }
}

/// Index of the first section claiming the pull request
fn section_index(pull: &PullRequest, sections: &[SectionRule]) -> Option<usize> {
    let claimed_by = |rule: &SectionRule| pull.types().iter().any(|t| rule.matches(t));

    sections.iter().position(|rule| {
        if rule.is_wildcard() {
            !sections
                .iter()
                .filter(|other| !other.is_wildcard())
                .any(claimed_by)
        } else {
            claimed_by(rule)
        }
    })
}

/// Reorder pull requests by domain priority and assign their domain
///
/// Domains are walked in order and hosts within a domain in order; a pull
/// request is placed the first time one of its hosts comes up, or when the
/// wildcard host is reached. Pull requests are never placed twice.
pub fn sort_by_domain(pulls: Vec<PullRequest>, domains: &[DomainConfig]) -> Vec<PullRequest> {
    let mut pending: Vec<Option<PullRequest>> = pulls.into_iter().map(Some).collect();
    let mut resolved = Vec::with_capacity(pending.len());

    for domain in domains {
        for host in &domain.hosts {
            for slot in pending.iter_mut() {
                let matched = slot
                    .as_ref()
                    .is_some_and(|pull| host == WILDCARD || pull.has_host(host));
                if !matched {
                    continue;
                }
                if let Some(mut pull) = slot.take() {
                    pull.set_domain(&domain.name);
                    resolved.push(pull);
                }
            }
        }
    }

    for pull in pending.into_iter().flatten() {
        log::warn!(
            "Pull request #{} matches no domain and is left out",
            pull.number
        );
    }

    resolved
}
