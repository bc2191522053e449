//! Markdown document tree
//!
//! Pull request bodies are parsed with `pulldown-cmark` and folded into a
//! small closed tree that only knows the elements the changelog cares about.
//! Links, images and strikethrough are unwrapped into their text; block
//! quotes, tables and raw HTML blocks are dropped.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};

/// A node of a parsed pull request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading { level: u8, children: Vec<Node> },
    Paragraph(Vec<Node>),
    List(Vec<Node>),
    ListItem(Vec<Node>),
    /// Inline content sitting directly in a list item
    BlockText(Vec<Node>),
    Strong(Vec<Node>),
    Emphasis(Vec<Node>),
    CodeSpan(String),
    BlockCode { info: Option<String>, text: String },
    /// Plain text; soft and hard line breaks are kept as `\n`
    Text(String),
}

/// Discriminant of a [`Node`], used as styling context while flattening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Heading,
    Paragraph,
    List,
    ListItem,
    BlockText,
    Strong,
    Emphasis,
    CodeSpan,
    BlockCode,
    Text,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Heading { .. } => NodeKind::Heading,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::List(_) => NodeKind::List,
            Node::ListItem(_) => NodeKind::ListItem,
            Node::BlockText(_) => NodeKind::BlockText,
            Node::Strong(_) => NodeKind::Strong,
            Node::Emphasis(_) => NodeKind::Emphasis,
            Node::CodeSpan(_) => NodeKind::CodeSpan,
            Node::BlockCode { .. } => NodeKind::BlockCode,
            Node::Text(_) => NodeKind::Text,
        }
    }

    /// Child nodes of container nodes, `None` for leaves
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Heading { children, .. }
            | Node::Paragraph(children)
            | Node::List(children)
            | Node::ListItem(children)
            | Node::BlockText(children)
            | Node::Strong(children)
            | Node::Emphasis(children) => Some(children),
            Node::CodeSpan(_) | Node::BlockCode { .. } | Node::Text(_) => None,
        }
    }

    /// Text content of leaf nodes, `None` for containers
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::CodeSpan(text) | Node::BlockCode { text, .. } | Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Label of a heading: the text of its first child
    pub fn heading_label(&self) -> Option<&str> {
        match self {
            Node::Heading { children, .. } => match children.first() {
                Some(Node::Text(text)) => Some(text),
                _ => None,
            },
            _ => None,
        }
    }

    fn is_inline(&self) -> bool {
        matches!(
            self,
            Node::Text(_) | Node::CodeSpan(_) | Node::Strong(_) | Node::Emphasis(_)
        )
    }
}

/// Parse markdown into top-level nodes
///
/// `pulldown-cmark` accepts any input and closes every element it opens, so
/// parsing cannot fail.
pub fn parse_markdown(input: &str) -> Vec<Node> {
    let mut root = OpenElement::new(Element::Transparent);
    let mut stack: Vec<OpenElement> = Vec::new();

    for event in Parser::new(input) {
        match event {
            Event::Start(tag) => stack.push(OpenElement::new(Element::from_tag(tag))),
            Event::End(_) => {
                let Some(open) = stack.pop() else {
                    continue;
                };
                let parent = current(&mut stack, &mut root);
                match open.close() {
                    Closed::Node(node) => parent.push(node),
                    Closed::Splice(nodes) => nodes.into_iter().for_each(|n| parent.push(n)),
                    Closed::Discard => {}
                }
            }
            Event::Text(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                current(&mut stack, &mut root).push(Node::Text(text.into_string()));
            }
            Event::Code(code) => {
                current(&mut stack, &mut root).push(Node::CodeSpan(code.into_string()));
            }
            Event::InlineHtml(html) => {
                current(&mut stack, &mut root).push(Node::Text(html.into_string()));
            }
            Event::SoftBreak | Event::HardBreak => {
                current(&mut stack, &mut root).push(Node::Text("\n".to_string()));
            }
            _ => {}
        }
    }

    root.children
}

fn current<'a>(stack: &'a mut [OpenElement], root: &'a mut OpenElement) -> &'a mut OpenElement {
    stack.last_mut().unwrap_or(root)
}

/// Element being built while its events stream in
#[derive(Debug)]
enum Element {
    Heading(u8),
    Paragraph,
    List,
    Item,
    Strong,
    Emphasis,
    CodeBlock(Option<String>),
    /// Children are spliced into the parent
    Transparent,
    /// Element and children are dropped
    Dropped,
}

impl Element {
    fn from_tag(tag: Tag<'_>) -> Self {
        match tag {
            Tag::Heading { level, .. } => Element::Heading(level as u8),
            Tag::Paragraph => Element::Paragraph,
            Tag::List(_) => Element::List,
            Tag::Item => Element::Item,
            Tag::Strong => Element::Strong,
            Tag::Emphasis => Element::Emphasis,
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
                let info = info.trim();
                Element::CodeBlock((!info.is_empty()).then(|| info.to_string()))
            }
            Tag::CodeBlock(CodeBlockKind::Indented) => Element::CodeBlock(None),
            Tag::Link { .. } | Tag::Image { .. } | Tag::Strikethrough => Element::Transparent,
            _ => Element::Dropped,
        }
    }
}

enum Closed {
    Node(Node),
    Splice(Vec<Node>),
    Discard,
}

#[derive(Debug)]
struct OpenElement {
    element: Element,
    children: Vec<Node>,
}

impl OpenElement {
    fn new(element: Element) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    fn push(&mut self, node: Node) {
        if matches!(self.element, Element::Item) && node.is_inline() {
            if !matches!(self.children.last(), Some(Node::BlockText(_))) {
                self.children.push(Node::BlockText(Vec::new()));
            }
            if let Some(Node::BlockText(inline)) = self.children.last_mut() {
                push_merged(inline, node);
            }
            return;
        }

        // The first paragraph of a loose list item is its bullet text
        if matches!(self.element, Element::Item)
            && matches!(node, Node::Paragraph(_))
            && !self.children.iter().any(|c| matches!(c, Node::BlockText(_)))
        {
            if let Node::Paragraph(inline) = node {
                self.children.push(Node::BlockText(inline));
            }
            return;
        }

        push_merged(&mut self.children, node);
    }

    fn close(self) -> Closed {
        let children = self.children;
        match self.element {
            Element::Heading(level) => Closed::Node(Node::Heading { level, children }),
            Element::Paragraph => Closed::Node(Node::Paragraph(children)),
            Element::List => Closed::Node(Node::List(children)),
            Element::Item => Closed::Node(Node::ListItem(children)),
            Element::Strong => Closed::Node(Node::Strong(children)),
            Element::Emphasis => Closed::Node(Node::Emphasis(children)),
            Element::CodeBlock(info) => {
                let text = children.iter().filter_map(Node::text).collect();
                Closed::Node(Node::BlockCode { info, text })
            }
            Element::Transparent => Closed::Splice(children),
            Element::Dropped => Closed::Discard,
        }
    }
}

/// Push a node, merging adjacent text so line breaks stay inside one text node
fn push_merged(children: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Text(previous)), Node::Text(text)) = (children.last_mut(), &node) {
        previous.push_str(text);
        return;
    }
    children.push(node);
}
