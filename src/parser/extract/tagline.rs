use crate::parser::tables::{DEFAULT_TAGLINE, TAGLINE_MAX, TAGLINE_SHORT};
use crate::parser::text::{squash_whitespace, truncate_with_ellipsis};
use crate::parser::tree::{Document, Node};

/// The one-line pitch: first short paragraph or quote between the title and
/// the next heading, else the first one after the title at all, else the
/// first paragraph anywhere.
pub fn extract(doc: &Document) -> String {
    let intro_short = intro(doc)
        .filter(|n| is_pitch_block(n))
        .map(|n| squash_whitespace(&n.text()))
        .find(|t| !t.is_empty() && t.chars().count() < TAGLINE_SHORT);

    let picked = intro_short
        .or_else(|| {
            doc.walk_after_title()
                .filter(|n| is_pitch_block(n))
                .map(|n| squash_whitespace(&n.text()))
                .find(|t| !t.is_empty())
        })
        .or_else(|| {
            doc.walk()
                .filter(|n| matches!(n, Node::Paragraph(_)) && !n.is_image_only())
                .map(|n| squash_whitespace(&n.text()))
                .find(|t| !t.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_TAGLINE.to_string());

    truncate_with_ellipsis(&picked, TAGLINE_MAX)
}

/// Top-level blocks after the first H1 (or from the start when there is
/// none) up to the next heading.
fn intro(doc: &Document) -> impl Iterator<Item = &Node> {
    let start = doc
        .nodes
        .iter()
        .position(|n| n.heading_depth() == Some(1))
        .map_or(0, |i| i + 1);
    doc.nodes[start..]
        .iter()
        .take_while(|n| n.heading_depth().is_none())
}

/// Badge rows are paragraphs too, but never the pitch.
fn is_pitch_block(node: &Node) -> bool {
    matches!(node, Node::Paragraph(_) | Node::BlockQuote(_)) && !node.is_image_only()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagline(md: &str) -> String {
        extract(&Document::parse(md, usize::MAX).unwrap())
    }

    #[test]
    fn paragraph_after_title() {
        assert_eq!(tagline("# Foo\n\nDoes bar."), "Does bar.");
    }

    #[test]
    fn badges_skipped() {
        let md = "# Foo\n\n[![build](https://img.shields.io/b.svg)](https://ci)\n\nFast things, done right.";
        assert_eq!(tagline(md), "Fast things, done right.");
    }

    #[test]
    fn block_quote_counts() {
        assert_eq!(tagline("# Foo\n\n> Quoted pitch."), "Quoted pitch.");
    }

    #[test]
    fn first_short_wins_over_later_shorter() {
        let md = "# Foo\n\nA reasonably short first pitch.\n\nTiny.";
        assert_eq!(tagline(md), "A reasonably short first pitch.");
    }

    #[test]
    fn short_preferred_over_long_first() {
        let long = "word ".repeat(60);
        let md = format!("# Foo\n\n{}\n\nShort one.", long.trim());
        assert_eq!(tagline(&md), "Short one.");
    }

    #[test]
    fn long_intro_beats_short_line_in_later_section() {
        let intro = "An intro that keeps going ".repeat(10);
        let md = format!(
            "# Foo\n\n{}\n\n## Installation\n\nRun:\n\n```bash\nnpm i foo\n```\n",
            intro.trim()
        );
        let t = tagline(&md);
        assert!(t.starts_with("An intro that keeps going"));
        assert!(t.ends_with("..."));
        assert!(t.chars().count() <= 160);
    }

    #[test]
    fn long_only_candidate_is_truncated() {
        let long = "x".repeat(400);
        let t = tagline(&format!("# Foo\n\n{}", long));
        assert_eq!(t.chars().count(), 160);
        assert!(t.ends_with("..."));
    }

    #[test]
    fn falls_back_to_any_paragraph() {
        assert_eq!(tagline("Before.\n\n# Foo\n\n## Only heading"), "Before.");
    }

    #[test]
    fn placeholder() {
        assert_eq!(tagline("# Foo"), DEFAULT_TAGLINE);
    }

    #[test]
    fn soft_breaks_become_spaces() {
        assert_eq!(tagline("# Foo\n\nline one\nline two"), "line one line two");
    }
}
