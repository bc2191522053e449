//! Re-serialization of extracted description sections
//!
//! Nodes are reduced to a flat run of styled fragments. Styling is driven by
//! an explicit context: `Strong`, `Emphasis`, `ListItem` and `List` impose
//! their own kind on everything below them, every other container lets its
//! children style themselves.

use gh_release_config::LineEnding;

use crate::extract::Body;
use crate::markdown::{Node, NodeKind};

/// A piece of flattened output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    /// A line break inside text; rendered with the configured line ending
    LineBreak,
    /// Content of one paragraph, kept together
    Group(Vec<Fragment>),
    /// A bulleted list entry
    Item(Vec<Fragment>),
}

#[derive(Debug, Clone, Copy)]
pub struct Flattener {
    line_ending: LineEnding,
}

impl Flattener {
    pub fn new(line_ending: LineEnding) -> Self {
        Self { line_ending }
    }

    /// Flatten a bucket of nodes; each node styles itself
    pub fn flatten(&self, nodes: &[Node]) -> Vec<Fragment> {
        nodes
            .iter()
            .flat_map(|node| self.flatten_node(node, None))
            .collect()
    }

    fn flatten_node(&self, node: &Node, context: Option<NodeKind>) -> Vec<Fragment> {
        let Some(children) = node.children() else {
            let kind = match node.kind() {
                // A fenced block cannot take an inline style
                NodeKind::BlockCode => NodeKind::BlockCode,
                own => context.unwrap_or(own),
            };
            return self.flatten_leaf(node, kind);
        };

        let kind = node.kind();
        let inherited = matches!(
            kind,
            NodeKind::Strong | NodeKind::Emphasis | NodeKind::ListItem | NodeKind::List
        );
        let flattened: Vec<Fragment> = children
            .iter()
            .flat_map(|child| {
                let child_context = if inherited { kind } else { child.kind() };
                self.flatten_node(child, Some(child_context))
            })
            .collect();

        match kind {
            NodeKind::Paragraph => vec![Fragment::Group(flattened)],
            NodeKind::BlockText => vec![Fragment::Item(flattened)],
            _ => flattened,
        }
    }

    fn flatten_leaf(&self, node: &Node, kind: NodeKind) -> Vec<Fragment> {
        let text = node.text().unwrap_or_default();
        let le = self.line_ending.as_str();

        let styled = match kind {
            NodeKind::CodeSpan => format!("`{}`", text),
            NodeKind::Emphasis => format!("_{}_", text),
            NodeKind::Strong => format!("**{}**", text),
            NodeKind::BlockCode => {
                let info = match node {
                    Node::BlockCode { info, .. } => info.as_deref().unwrap_or_default(),
                    _ => "",
                };
                let code = text.replace("\r\n", "\n").replace('\n', le);
                return vec![Fragment::Text(format!("{le}```{info}{le}{code}```"))];
            }
            _ => text.to_string(),
        };

        let mut fragments = Vec::new();
        for (index, line) in styled.split('\n').enumerate() {
            if index > 0 {
                fragments.push(Fragment::LineBreak);
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            if !line.is_empty() {
                fragments.push(Fragment::Text(line.to_string()));
            }
        }
        fragments
    }

    /// Render fragments of one bucket to text
    pub fn render_fragments(&self, fragments: &[Fragment]) -> String {
        let le = self.line_ending.as_str();
        let mut out = String::new();
        for (index, fragment) in fragments.iter().enumerate() {
            if index > 0 && matches!(fragment, Fragment::Group(_)) {
                out.push_str(le);
                out.push_str(le);
            }
            self.render_fragment(fragment, &mut out);
        }
        out
    }

    fn render_fragment(&self, fragment: &Fragment, out: &mut String) {
        let le = self.line_ending.as_str();
        match fragment {
            Fragment::Text(text) => out.push_str(text),
            Fragment::LineBreak => out.push_str(le),
            Fragment::Group(children) => {
                children.iter().for_each(|c| self.render_fragment(c, out));
            }
            Fragment::Item(children) => {
                out.push_str(le);
                out.push_str("- ");
                children.iter().for_each(|c| self.render_fragment(c, out));
            }
        }
    }

    /// Markdown for a pull request description as it appears in the changelog
    ///
    /// Raw bodies pass through with only their line endings converted.
    /// Extracted sections each get a `## <heading>` line followed by their
    /// content and a blank line.
    pub fn render_body(&self, body: &Body) -> String {
        let le = self.line_ending.as_str();
        let sections = match body {
            Body::Raw(raw) => return raw.replace("\r\n", "\n").replace('\n', le),
            Body::Sections(sections) => sections,
        };

        let mut out = String::new();
        for section in sections {
            out.push_str("## ");
            out.push_str(&section.heading);
            out.push_str(le);
            out.push_str(&self.render_fragments(&self.flatten(&section.nodes)));
            out.push_str(le);
            out.push_str(le);
        }

        out.trim_start_matches(['\r', '\n']).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_sections;
    use crate::markdown::parse_markdown;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> Node {
        Node::Text(value.to_string())
    }

    fn render(markdown: &str) -> String {
        let flattener = Flattener::new(LineEnding::Lf);
        let nodes = parse_markdown(markdown);
        flattener.render_fragments(&flattener.flatten(&nodes))
    }

    #[test]
    fn test_strong_text() {
        let flattener = Flattener::new(LineEnding::Lf);
        let nodes = [Node::Strong(vec![text("Hello")])];
        assert_eq!(
            flattener.flatten(&nodes),
            vec![Fragment::Text("**Hello**".to_string())]
        );
    }

    #[test]
    fn test_code_span() {
        let flattener = Flattener::new(LineEnding::Lf);
        let nodes = [Node::CodeSpan("x=1".to_string())];
        assert_eq!(
            flattener.render_fragments(&flattener.flatten(&nodes)),
            "`x=1`"
        );
    }

    #[test]
    fn test_plain_paragraph_round_trip() {
        assert_eq!(render("Just a plain sentence."), "Just a plain sentence.");
    }

    #[test]
    fn test_paragraph_is_a_group() {
        let flattener = Flattener::new(LineEnding::Lf);
        let nodes = [Node::Paragraph(vec![
            text("a "),
            Node::Emphasis(vec![text("b")]),
        ])];
        assert_eq!(
            flattener.flatten(&nodes),
            vec![Fragment::Group(vec![
                Fragment::Text("a ".to_string()),
                Fragment::Text("_b_".to_string()),
            ])]
        );
    }

    #[test]
    fn test_multiline_text_uses_line_ending() {
        let flattener = Flattener::new(LineEnding::CrLf);
        let nodes = parse_markdown("first line\nsecond line");
        assert_eq!(
            flattener.render_fragments(&flattener.flatten(&nodes)),
            "first line\r\nsecond line"
        );
    }

    #[test]
    fn test_styled_multiline_text_is_split() {
        let flattener = Flattener::new(LineEnding::Lf);
        let nodes = [Node::Strong(vec![text("one\ntwo")])];
        assert_eq!(
            flattener.flatten(&nodes),
            vec![
                Fragment::Text("**one".to_string()),
                Fragment::LineBreak,
                Fragment::Text("two**".to_string()),
            ]
        );
    }

    #[test]
    fn test_strong_imposes_style_on_code_span() {
        let flattener = Flattener::new(LineEnding::Lf);
        let nodes = [Node::Strong(vec![Node::CodeSpan("x".to_string())])];
        assert_eq!(
            flattener.flatten(&nodes),
            vec![Fragment::Text("**x**".to_string())]
        );
    }

    #[test]
    fn test_list_items_get_bullets() {
        assert_eq!(
            render("- first\n- second `code`"),
            "\n- first\n- second `code`"
        );
    }

    #[test]
    fn test_nested_list_is_flattened() {
        assert_eq!(render("- outer\n  - inner"), "\n- outer\n- inner");
    }

    #[test]
    fn test_fenced_code_keeps_info_and_newlines() {
        let flattener = Flattener::new(LineEnding::CrLf);
        let nodes = parse_markdown("```python\nprint(1)\nprint(2)\n```");
        assert_eq!(
            flattener.flatten(&nodes),
            vec![Fragment::Text(
                "\r\n```python\r\nprint(1)\r\nprint(2)\r\n```".to_string()
            )]
        );
    }

    #[test]
    fn test_fenced_code_without_info() {
        assert_eq!(render("```\nplain\n```"), "\n```\nplain\n```");
    }

    #[test]
    fn test_code_inside_list_item_stays_fenced() {
        assert_eq!(
            render("- run\n\n  ```\n  make\n  ```"),
            "\n- run\n```\nmake\n```"
        );
    }

    #[test]
    fn test_paragraph_after_other_content_is_separated() {
        assert_eq!(
            render("First paragraph.\n\nSecond paragraph.\n\n- item\n\nThird."),
            "First paragraph.\n\nSecond paragraph.\n- item\n\nThird."
        );
    }

    #[test]
    fn test_render_body_raw_passthrough() {
        let flattener = Flattener::new(LineEnding::Lf);
        let raw = "no *template* here\n\n- kept as is\n";
        assert_eq!(flattener.render_body(&Body::Raw(raw.to_string())), raw);
    }

    #[test]
    fn test_render_body_raw_converts_line_endings() {
        let raw = Body::Raw("one\r\ntwo\nthree".to_string());
        assert_eq!(
            Flattener::new(LineEnding::Lf).render_body(&raw),
            "one\ntwo\nthree"
        );
        assert_eq!(
            Flattener::new(LineEnding::CrLf).render_body(&raw),
            "one\r\ntwo\r\nthree"
        );
    }

    #[test]
    fn test_render_body_sections() {
        let headings = vec!["Brief description".to_string(), "Description".to_string()];
        let body = extract_sections(
            "## Brief description\n\nFix **crash** on load.\n\n## Description\n\n- one\n- two\n",
            &headings,
        );

        let flattener = Flattener::new(LineEnding::Lf);
        assert_eq!(
            flattener.render_body(&body),
            "## Brief description\nFix **crash** on load.\n\n## Description\n\n- one\n- two\n\n"
        );
    }
}
