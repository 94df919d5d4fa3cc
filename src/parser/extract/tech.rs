use std::sync::LazyLock;

use regex::Regex;

use crate::parser::tables::{TECH_MAX, TECH_TERMS};
use crate::parser::tree::{Document, Node};

/// One matcher per allowlisted name. Boundaries are "not a letter or digit"
/// rather than `\b`, so names like `c++` and `node.js` match cleanly.
static TECH_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    TECH_TERMS
        .iter()
        .map(|term| {
            let pattern = format!(r"(?:^|[^a-z0-9]){}(?:$|[^a-z0-9+])", regex::escape(term));
            (*term, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Technology names mentioned in paragraphs plus code block languages,
/// lower-cased, deduplicated, in discovery order.
pub fn extract(doc: &Document) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut add = |name: &str| {
        if !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    };

    for node in doc.walk() {
        match node {
            Node::Paragraph(_) => {
                let text = node.text().to_lowercase();
                for (term, re) in TECH_RES.iter() {
                    if re.is_match(&text) {
                        add(term);
                    }
                }
            }
            Node::Code {
                lang: Some(lang), ..
            } => {
                if let Some(tag) = code_language(lang) {
                    add(&tag);
                }
            }
            _ => {}
        }
    }

    found.truncate(TECH_MAX);
    found
}

/// First token of a fence info string: "rust,ignore" and "js title=x" give
/// "rust" and "js".
fn code_language(info: &str) -> Option<String> {
    let tag = info
        .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()?
        .trim()
        .to_lowercase();
    (!tag.is_empty()).then_some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech(md: &str) -> Vec<String> {
        extract(&Document::parse(md, usize::MAX).unwrap())
    }

    #[test]
    fn paragraph_terms_and_code_langs() {
        let md = "Built with React and Node.js.\n\n```bash\nnpm i\n```\n\n```Rust,ignore\nfn main() {}\n```";
        assert_eq!(tech(md), vec!["react", "node.js", "bash", "rust"]);
    }

    #[test]
    fn deduplicated() {
        assert_eq!(tech("Docker here.\n\nDocker there.\n\n```docker\nFROM x\n```"), vec!["docker"]);
    }

    #[test]
    fn token_boundaries() {
        assert!(tech("A reactive, trusted, good design.").is_empty());
        assert_eq!(tech("Written in C++ and Go."), vec!["go", "c++"]);
    }

    #[test]
    fn javascript_is_not_java() {
        assert_eq!(tech("Pure JavaScript."), vec!["javascript"]);
    }

    #[test]
    fn capped_at_eight() {
        let md = "react vue svelte angular deno bun python rust ruby php";
        assert_eq!(tech(md).len(), 8);
    }

    #[test]
    fn untagged_code_ignored() {
        assert!(tech("```\nplain\n```").is_empty());
    }
}
