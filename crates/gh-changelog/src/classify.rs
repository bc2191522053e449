use std::collections::BTreeSet;

const TYPE_PREFIX: &str = "type:";
const HOST_PREFIX: &str = "host:";
const MODULE_PREFIX: &str = "module:";

/// Classification facets derived from pull request labels
///
/// Sets are ordered, so the result does not depend on label order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub types: BTreeSet<String>,
    pub hosts: BTreeSet<String>,
    pub modules: BTreeSet<String>,
}

/// Split labels into type, host and module facets
///
/// Prefixes are matched case-insensitively; the remainder is trimmed and
/// lowercased. Labels without a known prefix are ignored.
pub fn classify_labels<I, S>(labels: I) -> Facets
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut facets = Facets::default();

    for label in labels {
        let label = label.as_ref().trim();
        let (set, value) = if let Some(value) = strip_prefix_ignore_case(label, TYPE_PREFIX) {
            (&mut facets.types, value)
        } else if let Some(value) = strip_prefix_ignore_case(label, HOST_PREFIX) {
            (&mut facets.hosts, value)
        } else if let Some(value) = strip_prefix_ignore_case(label, MODULE_PREFIX) {
            (&mut facets.modules, value)
        } else {
            continue;
        };

        let value = value.trim().to_lowercase();
        if value.is_empty() {
            log::debug!("Ignoring label `{}` without a value", label);
            continue;
        }
        set.insert(value);
    }

    facets
}

fn strip_prefix_ignore_case<'a>(label: &'a str, prefix: &str) -> Option<&'a str> {
    let head = label.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &label[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_classify_labels() {
        let facets = classify_labels(["type: bug", "host: maya", "module: render"]);
        assert_eq!(facets.types, set(&["bug"]));
        assert_eq!(facets.hosts, set(&["maya"]));
        assert_eq!(facets.modules, set(&["render"]));
    }

    #[test]
    fn test_prefix_is_case_insensitive_and_value_lowercased() {
        let facets = classify_labels(["Type: Feature", "HOST:Tv Paint", "Module:  Loader "]);
        assert_eq!(facets.types, set(&["feature"]));
        assert_eq!(facets.hosts, set(&["tv paint"]));
        assert_eq!(facets.modules, set(&["loader"]));
    }

    #[test]
    fn test_unprefixed_labels_are_ignored() {
        let facets = classify_labels(["sponsored", "bug", "priority: high"]);
        assert_eq!(facets, Facets::default());
    }

    #[test]
    fn test_prefix_must_lead_the_label() {
        let facets = classify_labels(["not a type: bug"]);
        assert!(facets.types.is_empty());
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let facets = classify_labels(["type:", "host:   "]);
        assert_eq!(facets, Facets::default());
    }

    #[test]
    fn test_multiple_values_per_facet() {
        let facets = classify_labels(["host: nuke", "host: maya", "type: bug", "type: bug"]);
        assert_eq!(facets.hosts, set(&["maya", "nuke"]));
        assert_eq!(facets.types, set(&["bug"]));
    }

    #[test]
    fn test_classification_ignores_label_order() {
        let labels = ["module: render", "type: bug", "host: maya", "host: houdini"];
        let mut reversed = labels;
        reversed.reverse();
        assert_eq!(classify_labels(labels), classify_labels(reversed));
        assert_eq!(classify_labels(labels), classify_labels(labels));
    }

    #[test]
    fn test_non_ascii_labels_do_not_panic() {
        let facets = classify_labels(["ty🐛", "hé", "mödule: x"]);
        assert_eq!(facets, Facets::default());
    }
}
