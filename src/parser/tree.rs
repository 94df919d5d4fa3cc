use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::error::ParseError;

/// Typed markdown node. A closed set: every extractor matches on these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading { depth: u8, children: Vec<Node> },
    Paragraph(Vec<Node>),
    List { ordered: bool, start: u64, items: Vec<Node> },
    ListItem(Vec<Node>),
    BlockQuote(Vec<Node>),
    Code { lang: Option<String>, value: String },
    /// First row is the header row.
    Table(Vec<Node>),
    TableRow(Vec<Node>),
    TableCell(Vec<Node>),
    ThematicBreak,
    Html(String),
    Link { url: String, children: Vec<Node> },
    Image { url: String, alt: String },
    Strong(Vec<Node>),
    Emphasis(Vec<Node>),
    Strikethrough(Vec<Node>),
    InlineCode(String),
    Text(String),
    TaskMarker(bool),
    SoftBreak,
    HardBreak,
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading { children, .. } | Node::Link { children, .. } => children,
            Node::List { items, .. } => items,
            Node::Paragraph(c)
            | Node::ListItem(c)
            | Node::BlockQuote(c)
            | Node::Table(c)
            | Node::TableRow(c)
            | Node::TableCell(c)
            | Node::Strong(c)
            | Node::Emphasis(c)
            | Node::Strikethrough(c) => c,
            _ => &[],
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Node::Heading { .. }
                | Node::Paragraph(_)
                | Node::List { .. }
                | Node::ListItem(_)
                | Node::BlockQuote(_)
                | Node::Code { .. }
                | Node::Table(_)
                | Node::TableRow(_)
                | Node::ThematicBreak
        )
    }

    pub fn heading_depth(&self) -> Option<u8> {
        match self {
            Node::Heading { depth, .. } => Some(*depth),
            _ => None,
        }
    }

    /// Plain text. Breaks become newlines, block children are newline
    /// separated, images contribute their alt text, raw HTML nothing.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(s) | Node::InlineCode(s) => out.push_str(s),
            Node::SoftBreak | Node::HardBreak => out.push('\n'),
            Node::Code { value, .. } => out.push_str(value.trim_end_matches('\n')),
            Node::Image { alt, .. } => out.push_str(alt),
            Node::Html(_) | Node::ThematicBreak | Node::TaskMarker(_) => {}
            Node::TableRow(cells) => {
                for (i, cell) in cells.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    cell.write_text(out);
                }
            }
            other => write_children_text(other.children(), out),
        }
    }

    /// Text of the inline content directly under this node, ignoring nested
    /// blocks (a list item's sub-list, a quote's paragraphs).
    pub fn inline_text(&self) -> String {
        let mut out = String::new();
        for child in self.children().iter().filter(|c| !c.is_block()) {
            child.write_text(&mut out);
        }
        out
    }

    /// True when the node has only images (possibly wrapped in links) and
    /// whitespace, e.g. a row of badges.
    pub fn is_image_only(&self) -> bool {
        let mut saw_image = false;
        let ok = self.children().iter().all(|c| match c {
            Node::Image { .. } => {
                saw_image = true;
                true
            }
            Node::Link { .. } => {
                let inner = c.is_image_only();
                saw_image |= inner;
                inner
            }
            Node::Text(t) => t.trim().is_empty(),
            Node::SoftBreak | Node::HardBreak | Node::Html(_) => true,
            _ => false,
        });
        ok && saw_image
    }

    /// Pre-order walk over this node and everything below it.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

fn write_children_text(children: &[Node], out: &mut String) {
    let mut prev_block = false;
    for (i, child) in children.iter().enumerate() {
        if i > 0 && (prev_block || child.is_block()) && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        child.write_text(out);
        prev_block = child.is_block();
    }
}

/// Depth-first, document-order iterator.
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// A parsed README: the top-level block sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// Parse `markdown`, refusing binary content and inputs above `max_bytes`.
    pub fn parse(markdown: &str, max_bytes: usize) -> Result<Self, ParseError> {
        if markdown.len() > max_bytes {
            return Err(ParseError::TooLarge {
                len: markdown.len(),
                limit: max_bytes,
            });
        }
        if let Some(offset) = markdown.find('\0') {
            return Err(ParseError::BinaryContent { offset });
        }
        Ok(Document {
            nodes: build_tree(markdown),
        })
    }

    pub fn parse_bytes(bytes: &[u8], max_bytes: usize) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(bytes).map_err(|e| ParseError::InvalidUtf8 {
            offset: e.valid_up_to(),
        })?;
        Self::parse(text, max_bytes)
    }

    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.nodes.iter().rev().collect(),
        }
    }

    /// Nodes after the first depth-1 heading, in document order. The whole
    /// document when there is no such heading.
    pub fn walk_after_title(&self) -> impl Iterator<Item = &Node> {
        let has_title = self.walk().any(|n| n.heading_depth() == Some(1));
        let mut seen_title = !has_title;
        let mut inside_title: Option<usize> = None;
        self.walk().filter(move |n| {
            if seen_title {
                return match inside_title.as_mut() {
                    Some(left) if *left > 0 => {
                        *left -= 1;
                        false
                    }
                    _ => true,
                };
            }
            if n.heading_depth() == Some(1) {
                seen_title = true;
                inside_title = Some(n.walk().count() - 1);
            }
            false
        })
    }
}

pub(crate) fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

enum Frame {
    Root,
    Heading(u8),
    Paragraph,
    List { ordered: bool, start: u64 },
    Item,
    BlockQuote,
    Code(Option<String>),
    Table,
    TableRow,
    TableCell,
    HtmlBlock,
    Link(String),
    Image(String),
    Strong,
    Emphasis,
    Strikethrough,
    /// Containers we do not model; children are spliced into the parent.
    Transparent,
}

struct Open {
    frame: Frame,
    children: Vec<Node>,
}

fn frame_for(tag: Tag<'_>) -> Frame {
    match tag {
        Tag::Heading { level, .. } => Frame::Heading(level as u8),
        Tag::Paragraph => Frame::Paragraph,
        Tag::List(start) => Frame::List {
            ordered: start.is_some(),
            start: start.unwrap_or(1),
        },
        Tag::Item => Frame::Item,
        Tag::BlockQuote(_) => Frame::BlockQuote,
        Tag::CodeBlock(kind) => Frame::Code(match kind {
            CodeBlockKind::Fenced(info) if !info.trim().is_empty() => {
                Some(info.trim().to_string())
            }
            _ => None,
        }),
        Tag::Table(_) => Frame::Table,
        Tag::TableHead | Tag::TableRow => Frame::TableRow,
        Tag::TableCell => Frame::TableCell,
        Tag::HtmlBlock => Frame::HtmlBlock,
        Tag::Link { dest_url, .. } => Frame::Link(dest_url.to_string()),
        Tag::Image { dest_url, .. } => Frame::Image(dest_url.to_string()),
        Tag::Strong => Frame::Strong,
        Tag::Emphasis => Frame::Emphasis,
        Tag::Strikethrough => Frame::Strikethrough,
        _ => Frame::Transparent,
    }
}

fn push_node(children: &mut Vec<Node>, node: Node) {
    // pulldown-cmark splits text runs at markup candidates; keep them whole.
    if let (Some(Node::Text(prev)), Node::Text(next)) = (children.last_mut(), &node) {
        prev.push_str(next);
        return;
    }
    children.push(node);
}

fn close(open: Open) -> Vec<Node> {
    let Open { frame, children } = open;
    let node = match frame {
        Frame::Root | Frame::Transparent => return children,
        Frame::Heading(depth) => Node::Heading { depth, children },
        Frame::Paragraph => Node::Paragraph(children),
        Frame::List { ordered, start } => Node::List {
            ordered,
            start,
            items: children,
        },
        Frame::Item => Node::ListItem(children),
        Frame::BlockQuote => Node::BlockQuote(children),
        Frame::Code(lang) => Node::Code {
            lang,
            value: children.iter().map(Node::text).collect(),
        },
        Frame::Table => Node::Table(children),
        Frame::TableRow => Node::TableRow(children),
        Frame::TableCell => Node::TableCell(children),
        Frame::HtmlBlock => Node::Html(
            children
                .iter()
                .filter_map(|c| match c {
                    Node::Html(h) => Some(h.as_str()),
                    _ => None,
                })
                .collect(),
        ),
        Frame::Link(url) => Node::Link { url, children },
        Frame::Image(url) => Node::Image {
            url,
            alt: children.iter().map(Node::text).collect(),
        },
        Frame::Strong => Node::Strong(children),
        Frame::Emphasis => Node::Emphasis(children),
        Frame::Strikethrough => Node::Strikethrough(children),
    };
    vec![node]
}

fn build_tree(markdown: &str) -> Vec<Node> {
    let mut stack = vec![Open {
        frame: Frame::Root,
        children: Vec::new(),
    }];

    for event in Parser::new_ext(markdown, options()) {
        let leaf = match event {
            Event::Start(tag) => {
                stack.push(Open {
                    frame: frame_for(tag),
                    children: Vec::new(),
                });
                continue;
            }
            // Events are well nested, so any end closes the innermost frame.
            Event::End(_) => {
                if stack.len() > 1 {
                    if let Some(open) = stack.pop() {
                        let nodes = close(open);
                        if let Some(parent) = stack.last_mut() {
                            for node in nodes {
                                push_node(&mut parent.children, node);
                            }
                        }
                    }
                }
                continue;
            }
            Event::Text(t) => Node::Text(t.to_string()),
            Event::Code(c) => Node::InlineCode(c.to_string()),
            Event::Html(h) | Event::InlineHtml(h) => Node::Html(h.to_string()),
            Event::SoftBreak => Node::SoftBreak,
            Event::HardBreak => Node::HardBreak,
            Event::Rule => Node::ThematicBreak,
            Event::TaskListMarker(done) => Node::TaskMarker(done),
            _ => continue,
        };
        if let Some(top) = stack.last_mut() {
            push_node(&mut top.children, leaf);
        }
    }

    // Unclosed frames cannot happen with a well-formed event stream, but fold
    // them anyway so no content is lost.
    while stack.len() > 1 {
        if let Some(open) = stack.pop() {
            let nodes = close(open);
            if let Some(parent) = stack.last_mut() {
                parent.children.extend(nodes);
            }
        }
    }
    stack.pop().map(|root| root.children).unwrap_or_default()
}
