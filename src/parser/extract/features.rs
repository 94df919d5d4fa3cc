use std::sync::LazyLock;

use regex::Regex;

use crate::model::Feature;
use crate::parser::tables::{
    BOLD_FALLBACK_MAX, FEATURES_MAX, FEATURE_HEADING_KEYWORDS, FEATURE_LOOKAHEAD,
};
use crate::parser::text::{split_leading_glyph, squash_whitespace};
use crate::parser::tree::{Document, Node};

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-+*•·▪►✓✔]|\d+[.)])\s+").unwrap());
static LEAD_BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(.+?)\*\*\s*(?:--|[-–—:])\s*(.+)$").unwrap());
static SPACED_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(?:--|[-–—])\s+(.+)$").unwrap());
static TIGHT_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*[–—]\s*(.+)$").unwrap());

/// Items of the list under a "features"-like heading; failing that, bold
/// phrases from paragraphs as title-only features.
pub fn extract(doc: &Document) -> Vec<Feature> {
    let nodes = &doc.nodes;
    for (i, node) in nodes.iter().enumerate() {
        if !is_feature_heading(node) {
            continue;
        }
        let list = nodes[i + 1..]
            .iter()
            .take(FEATURE_LOOKAHEAD)
            .take_while(|n| n.heading_depth().is_none())
            .find(|n| matches!(n, Node::List { .. }));
        if let Some(list) = list {
            let features: Vec<Feature> = list
                .children()
                .iter()
                .filter_map(parse_item)
                .take(FEATURES_MAX)
                .collect();
            if !features.is_empty() {
                return features;
            }
        }
    }

    bold_fallback(doc)
}

fn is_feature_heading(node: &Node) -> bool {
    if node.heading_depth().is_none() {
        return false;
    }
    let text = node.text().to_lowercase().replace('’', "'");
    FEATURE_HEADING_KEYWORDS.iter().any(|kw| text.contains(kw))
}

fn parse_item(item: &Node) -> Option<Feature> {
    let raw = squash_whitespace(&marked_text(item_inline(item)));
    let (mut icon, rest) = split_leading_glyph(&raw);
    let rest = MARKER_RE.replace(rest, "");

    let (title, desc) = split_title_desc(&rest);
    let mut title = strip_bold(&title).trim_end_matches(':').trim().to_string();
    if icon.is_none() {
        let (inner_icon, inner_rest) = split_leading_glyph(&title);
        if inner_icon.is_some() {
            icon = inner_icon;
            title = inner_rest.to_string();
        }
    }
    if title.is_empty() {
        return None;
    }
    let desc = desc.map(|d| strip_bold(&d)).filter(|d| !d.is_empty());

    Some(Feature { title, desc, icon })
}

/// Tight items hold inline nodes directly; loose ones wrap them in a paragraph.
fn item_inline(item: &Node) -> &[Node] {
    let children = item.children();
    if children.iter().any(|c| !c.is_block()) {
        return children;
    }
    children
        .iter()
        .find(|c| matches!(c, Node::Paragraph(_)))
        .map(Node::children)
        .unwrap_or(&[])
}

/// Plain text that keeps `**` around strong spans so the split can see them.
fn marked_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Strong(children) => {
                out.push_str("**");
                out.push_str(&marked_text(children));
                out.push_str("**");
            }
            Node::List { .. } => {}
            other => out.push_str(&other.text()),
        }
    }
    out
}

/// A leading bold span directly followed by a separator is the title; then
/// dash, then first colon.
fn split_title_desc(text: &str) -> (String, Option<String>) {
    if let Some(caps) = LEAD_BOLD_RE
        .captures(text)
        .or_else(|| SPACED_DASH_RE.captures(text))
        .or_else(|| TIGHT_DASH_RE.captures(text))
    {
        return (caps[1].to_string(), Some(caps[2].trim().to_string()));
    }
    if let Some((title, desc)) = text.split_once(':') {
        return (title.to_string(), Some(desc.trim().to_string()));
    }
    (text.to_string(), None)
}

fn strip_bold(s: &str) -> String {
    s.replace("**", "")
        .trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
        .to_string()
}

fn bold_fallback(doc: &Document) -> Vec<Feature> {
    doc.walk()
        .filter(|n| matches!(n, Node::Paragraph(_)))
        .flat_map(|p| p.walk().filter(|n| matches!(n, Node::Strong(_))))
        .map(|s| {
            squash_whitespace(&s.text())
                .trim_end_matches(':')
                .trim()
                .to_string()
        })
        .filter(|t| !t.is_empty())
        .take(BOLD_FALLBACK_MAX)
        .map(|title| Feature {
            title,
            desc: None,
            icon: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(md: &str) -> Vec<Feature> {
        extract(&Document::parse(md, usize::MAX).unwrap())
    }

    fn feature(title: &str, desc: Option<&str>, icon: Option<&str>) -> Feature {
        Feature {
            title: title.to_string(),
            desc: desc.map(String::from),
            icon: icon.map(String::from),
        }
    }

    #[test]
    fn bold_title_with_dash() {
        let f = features("## Features\n\n- **Fast** - very fast\n");
        assert_eq!(f, vec![feature("Fast", Some("very fast"), None)]);
    }

    #[test]
    fn emoji_icon_and_em_dash() {
        let f = features("## Key Features\n\n- ⚡ Speed — built for it\n- 🔒 Secure\n");
        assert_eq!(
            f,
            vec![
                feature("Speed", Some("built for it"), Some("⚡")),
                feature("Secure", None, Some("🔒")),
            ]
        );
    }

    #[test]
    fn colon_split_and_bold_colon() {
        let f = features("## Why\n\n- **Simple:** one binary\n- Portable: runs anywhere\n");
        assert_eq!(
            f,
            vec![
                feature("Simple", Some("one binary"), None),
                feature("Portable", Some("runs anywhere"), None),
            ]
        );
    }

    #[test]
    fn icon_inside_bold() {
        let f = features("## Highlights\n\n- **🚀 Launch** - in seconds\n");
        assert_eq!(f, vec![feature("Launch", Some("in seconds"), Some("🚀"))]);
    }

    #[test]
    fn bold_title_before_colon_and_later_dash() {
        let f = features("## Features\n\n- **Zero-config**: works out of the box - no setup\n");
        assert_eq!(
            f,
            vec![feature("Zero-config", Some("works out of the box - no setup"), None)]
        );
    }

    #[test]
    fn bold_markers_removed_mid_text() {
        let f = features("## Features\n\n- Uses **fast** paths - always\n");
        assert_eq!(f, vec![feature("Uses fast paths", Some("always"), None)]);
    }

    #[test]
    fn hyphenated_words_not_split() {
        let f = features("## Features\n\n- Zero-config setup\n");
        assert_eq!(f, vec![feature("Zero-config setup", None, None)]);
    }

    #[test]
    fn list_within_lookahead() {
        let md = "## What's inside\n\nA short intro.\n\n- One\n- Two\n";
        assert_eq!(features(md).len(), 2);
    }

    #[test]
    fn list_past_next_heading_ignored() {
        let md = "## Features\n\nNothing listed.\n\n## Other\n\n- Not a feature\n\nAlso **Bold** here.";
        assert_eq!(features(md), vec![feature("Bold", None, None)]);
    }

    #[test]
    fn capped_at_six() {
        let items: String = (1..=9).map(|i| format!("- Item {}\n", i)).collect();
        assert_eq!(features(&format!("## Features\n\n{}", items)).len(), 6);
    }

    #[test]
    fn loose_list_items() {
        let f = features("## Features\n\n- **A** - first\n\n- **B** - second\n");
        assert_eq!(f[1], feature("B", Some("second"), None));
    }

    #[test]
    fn bold_fallback_capped_at_five() {
        let md = "Text **a** and **b** and **c**.\n\nMore **d**, **e**, **f**.";
        let titles: Vec<String> = features(md).into_iter().map(|f| f.title).collect();
        assert_eq!(titles, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn nothing_found() {
        assert!(features("# Plain\n\nJust words.").is_empty());
    }
}
