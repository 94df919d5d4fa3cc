use std::collections::HashSet;

use super::markdown::to_markdown;
use super::tables::{SECTION_PRIORITY, SECTION_SYNONYMS};
use super::text::{slugify, strip_glyphs};
use super::tree::{Document, Node};
use crate::model::Section;

/// Split the document at every depth-≥2 heading. Content before the first
/// one (title, pitch, badges) belongs to no section; sections whose body
/// re-serializes to nothing are dropped.
pub fn segment(doc: &Document) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut used_ids: HashSet<String> = HashSet::new();
    let mut current: Option<(String, Vec<Node>)> = None;

    for node in &doc.nodes {
        match node.heading_depth() {
            Some(depth) if depth >= 2 => {
                if let Some((heading, body)) = current.take() {
                    push_section(&heading, &body, &mut used_ids, &mut sections);
                }
                current = Some((node.text(), Vec::new()));
            }
            _ => {
                if let Some((_, body)) = current.as_mut() {
                    body.push(node.clone());
                }
            }
        }
    }
    if let Some((heading, body)) = current {
        push_section(&heading, &body, &mut used_ids, &mut sections);
    }

    sections
}

fn push_section(
    heading: &str,
    body: &[Node],
    used_ids: &mut HashSet<String>,
    sections: &mut Vec<Section>,
) {
    let content = to_markdown(body);
    if content.trim().is_empty() {
        return;
    }
    let id = unique_id(slugify(heading), used_ids);
    sections.push(Section {
        id,
        title: canonical_title(heading),
        content,
    });
}

fn unique_id(base: String, used: &mut HashSet<String>) -> String {
    let mut id = base.clone();
    let mut n = 2;
    while used.contains(&id) {
        id = format!("{}-{}", base, n);
        n += 1;
    }
    used.insert(id.clone());
    id
}

/// Map a heading onto its canonical title via the synonym table; unknown
/// headings keep their own (glyph-free) text.
pub fn canonical_title(heading: &str) -> String {
    let stripped = strip_glyphs(heading);
    let key = stripped.trim().trim_end_matches(':').trim().to_lowercase();
    SECTION_SYNONYMS
        .iter()
        .find(|(aliases, _)| aliases.contains(&key.as_str()))
        .map(|(_, title)| title.to_string())
        .unwrap_or_else(|| {
            if stripped.is_empty() {
                heading.trim().to_string()
            } else {
                stripped
            }
        })
}

/// Greedy placement by topic precedence: each keyword claims the first
/// unplaced section whose id contains it (or is contained by it). Whatever is
/// left keeps document order at the end.
pub fn order(sections: Vec<Section>) -> Vec<Section> {
    let mut slots: Vec<Option<Section>> = sections.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());

    for keyword in SECTION_PRIORITY {
        let claimed = slots.iter_mut().find(|slot| {
            slot.as_ref()
                .is_some_and(|s| s.id.contains(keyword) || keyword.contains(s.id.as_str()))
        });
        if let Some(section) = claimed.and_then(Option::take) {
            ordered.push(section);
        }
    }
    ordered.extend(slots.into_iter().flatten());
    ordered
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(md: &str) -> Vec<Section> {
        segment(&Document::parse(md, usize::MAX).unwrap())
    }

    fn section(id: &str) -> Section {
        Section {
            id: id.to_string(),
            title: id.to_string(),
            content: "x".to_string(),
        }
    }

    fn ids(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn preamble_is_not_a_section() {
        let s = sections("# Foo\n\nPitch.\n\n## Usage\n\nRun it.");
        assert_eq!(ids(&s), vec!["usage"]);
        assert_eq!(s[0].title, "How it works");
        assert_eq!(s[0].content, "Run it.");
    }

    #[test]
    fn installation_keeps_fenced_block() {
        let s = sections("## Installation\n\n```bash\nnpm i foo\n```\n");
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].id, "installation");
        assert_eq!(s[0].title, "Install");
        assert!(s[0].content.contains("```bash\nnpm i foo\n```"));
    }

    #[test]
    fn empty_sections_dropped() {
        let s = sections("## Empty\n\n## Full\n\ntext");
        assert_eq!(ids(&s), vec!["full"]);
    }

    #[test]
    fn nested_headings_stay_inside() {
        let s = sections("## API\n\n### get()\n\nReturns.\n\n## License\n\nMIT");
        assert_eq!(ids(&s), vec!["api", "license"]);
        assert_eq!(s[0].content, "### get()\n\nReturns.");
        assert_eq!(s[0].title, "API");
    }

    #[test]
    fn glyphs_stripped_from_title_and_id() {
        let s = sections("## 🚀 Getting Started\n\nGo.");
        assert_eq!(s[0].id, "getting-started");
        assert_eq!(s[0].title, "How it works");
    }

    #[test]
    fn unmatched_heading_keeps_text() {
        let s = sections("## ✨ Design Notes\n\nStuff.");
        assert_eq!(s[0].title, "Design Notes");
        assert_eq!(s[0].id, "design-notes");
    }

    #[test]
    fn duplicate_ids_get_suffix() {
        let s = sections("## Usage\n\na\n\n## Usage\n\nb\n\n## Usage\n\nc");
        assert_eq!(ids(&s), vec!["usage", "usage-2", "usage-3"]);
    }

    #[test]
    fn order_by_priority() {
        let ordered = order(vec![section("license"), section("installation"), section("faq")]);
        assert_eq!(ids(&ordered), vec!["installation", "faq", "license"]);
    }

    #[test]
    fn unmatched_sections_trail_in_document_order() {
        let ordered = order(vec![
            section("zeta"),
            section("license"),
            section("alpha"),
            section("usage"),
        ]);
        assert_eq!(ids(&ordered), vec!["usage", "license", "zeta", "alpha"]);
    }

    #[test]
    fn earlier_keyword_claims_first() {
        // "installation" claims "installation-and-usage" before "usage" gets
        // a chance, even though "usage" would match it too.
        let ordered = order(vec![section("usage"), section("installation-and-usage")]);
        assert_eq!(ids(&ordered), vec!["installation-and-usage", "usage"]);
    }

    #[test]
    fn contained_by_keyword_matches() {
        // "start" matches because it is contained by "quick-start".
        let ordered = order(vec![section("license"), section("start")]);
        assert_eq!(ids(&ordered), vec!["start", "license"]);
    }

    #[test]
    fn each_section_placed_once() {
        let ordered = order(vec![section("usage"), section("usage-2")]);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ids(&ordered), vec!["usage", "usage-2"]);
    }
}
