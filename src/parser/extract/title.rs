use crate::parser::tables::DEFAULT_TITLE;
use crate::parser::tree::{Document, Node};
use crate::parser::text::squash_whitespace;

/// First depth-1 heading, else the first non-empty paragraph, else the
/// placeholder.
pub fn extract(doc: &Document) -> String {
    let heading = doc
        .walk()
        .filter(|n| n.heading_depth() == Some(1))
        .map(|n| squash_whitespace(&n.text()))
        .find(|t| !t.is_empty());
    if let Some(title) = heading {
        return title;
    }

    doc.walk()
        .filter(|n| matches!(n, Node::Paragraph(_)))
        .map(|n| squash_whitespace(&n.text()))
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
