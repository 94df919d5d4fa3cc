use std::sync::LazyLock;

use regex::Regex;

use crate::model::Stat;
use crate::parser::tables::STATS_MAX;
use crate::parser::tree::{Document, Node};

static STAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+(?:[.,]\d+)*[kKmMbB]?\+?)\s+([A-Za-z][A-Za-z-]*)").unwrap()
});

/// `<number>[kmb]?+? <word>` pairs from paragraphs and list items, at most
/// four across the whole document. The word is not checked for meaning.
pub fn extract(doc: &Document) -> Vec<Stat> {
    doc.walk()
        .filter_map(|n| match n {
            Node::Paragraph(_) => Some(n.text()),
            Node::ListItem(_) => Some(n.inline_text()),
            _ => None,
        })
        .flat_map(|text| {
            STAT_RE
                .captures_iter(&text)
                .map(|caps| Stat {
                    value: caps[1].to_string(),
                    label: caps[2].to_string(),
                })
                .collect::<Vec<_>>()
        })
        .take(STATS_MAX)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(md: &str) -> Vec<(String, String)> {
        extract(&Document::parse(md, usize::MAX).unwrap())
            .into_iter()
            .map(|s| (s.value, s.label))
            .collect()
    }

    fn pair(v: &str, l: &str) -> (String, String) {
        (v.to_string(), l.to_string())
    }

    #[test]
    fn suffixes_and_plus() {
        assert_eq!(
            stats("Trusted by 10k+ developers and 3M downloads."),
            vec![pair("10k+", "developers"), pair("3M", "downloads")]
        );
    }

    #[test]
    fn list_items_and_separators() {
        assert_eq!(
            stats("- 1,200 stars\n- 4.5 rating\n"),
            vec![pair("1,200", "stars"), pair("4.5", "rating")]
        );
    }

    #[test]
    fn global_cap_across_blocks() {
        let md = "1 a\n\n2 b\n\n- 3 c\n- 4 d\n- 5 e\n";
        assert_eq!(stats(md).len(), 4);
        assert_eq!(stats(md)[3], pair("4", "d"));
    }

    #[test]
    fn any_word_qualifies() {
        assert_eq!(stats("Step 2 then more"), vec![pair("2", "then")]);
    }

    #[test]
    fn glued_digits_ignored() {
        assert!(stats("Version v2 is out").is_empty());
    }

    #[test]
    fn code_is_not_scanned() {
        assert!(stats("```\n100 lines\n```").is_empty());
    }
}
