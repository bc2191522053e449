//! Section extraction from pull request bodies
//!
//! Pull request templates put the changelog-worthy text under a few known
//! headings. Only the first contiguous run of known headings is taken; an
//! unknown heading after that run ends the scan.

use crate::markdown::{parse_markdown, Node, NodeKind};

/// Content of a pull request body as used in the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// The body did not use any known heading and is passed through verbatim
    Raw(String),
    /// Content grouped by known heading, in order of first appearance
    Sections(Vec<SectionBody>),
}

/// Nodes found under one known heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBody {
    pub heading: String,
    pub nodes: Vec<Node>,
}

/// Parse a pull request body and bucket its content by known heading
pub fn extract_sections(body: &str, headings: &[String]) -> Body {
    extract_from_nodes(body, parse_markdown(body), headings)
}

fn is_known(node: &Node, headings: &[String]) -> bool {
    node.heading_label()
        .is_some_and(|label| headings.iter().any(|h| h == label))
}

/// Bucket already parsed nodes; `raw` is returned when no known heading exists
fn extract_from_nodes(raw: &str, nodes: Vec<Node>, headings: &[String]) -> Body {
    if !nodes.iter().any(|node| is_known(node, headings)) {
        return Body::Raw(raw.to_string());
    }

    let mut sections: Vec<SectionBody> = Vec::new();
    let mut open: Option<usize> = None;

    for node in nodes {
        match node.kind() {
            NodeKind::Heading if is_known(&node, headings) => {
                let label = node.heading_label().unwrap_or_default();
                // A repeated heading starts over but keeps its first position
                let index = match sections.iter().position(|s| s.heading == label) {
                    Some(index) => {
                        sections[index].nodes.clear();
                        index
                    }
                    None => {
                        sections.push(SectionBody {
                            heading: label.to_string(),
                            nodes: Vec::new(),
                        });
                        sections.len() - 1
                    }
                };
                open = Some(index);
            }
            NodeKind::Heading => {
                if open.is_some() {
                    break;
                }
            }
            NodeKind::Paragraph | NodeKind::List | NodeKind::BlockCode => {
                if let Some(index) = open {
                    sections[index].nodes.push(node);
                }
            }
            _ => {}
        }
    }

    Body::Sections(sections)
}
