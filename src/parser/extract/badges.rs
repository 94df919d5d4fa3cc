use std::collections::HashSet;

use crate::model::{Badge, Link};
use crate::parser::tables::{
    BADGES_MAX, BADGES_TEXT_THRESHOLD, BADGE_ALT_KEYWORDS, BADGE_HOSTS, BADGE_LINK_KEYWORDS,
    BADGE_TEXT_MAX_CHARS, BADGE_TEXT_MAX_WORDS, BADGE_TEXT_TOKENS,
};
use crate::parser::text::{host_matches, host_of, squash_whitespace};
use crate::parser::tree::{Document, Node};

/// Badge images first, then badge-looking links, then (only if that found
/// fewer than two) short lines of technology names.
pub fn extract(doc: &Document, links: &[Link]) -> Vec<Badge> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut badges: Vec<Badge> = Vec::new();

    for node in doc.walk() {
        if let Node::Image { url, alt } = node {
            let label = squash_whitespace(alt);
            if contains_any(&label.to_lowercase(), BADGE_ALT_KEYWORDS) {
                push_unique(&mut badges, &mut seen, label, Some(url.clone()));
            }
        }
    }

    for link in links {
        if is_badge_link(link) {
            push_unique(&mut badges, &mut seen, link.label.clone(), Some(link.href.clone()));
        }
    }

    if badges.len() < BADGES_TEXT_THRESHOLD {
        let paragraphs = doc
            .walk()
            .filter(|n| matches!(n, Node::Paragraph(_)) && !n.is_image_only());
        for node in paragraphs {
            for token in tech_tokens(&node.text()) {
                push_unique(&mut badges, &mut seen, token, None);
            }
        }
    }

    badges.truncate(BADGES_MAX);
    badges
}

fn push_unique(badges: &mut Vec<Badge>, seen: &mut HashSet<String>, label: String, href: Option<String>) {
    if label.is_empty() || !seen.insert(label.to_lowercase()) {
        return;
    }
    badges.push(Badge { label, href });
}

fn is_badge_link(link: &Link) -> bool {
    let label = link.label.to_lowercase();
    let href = link.href.to_lowercase();
    let host = host_of(&link.href);
    contains_any(&label, BADGE_LINK_KEYWORDS)
        || contains_any(&href, BADGE_LINK_KEYWORDS)
        || BADGE_HOSTS.iter().any(|d| host_matches(&host, d))
}

/// A short paragraph made only of capitalized allowlisted words, e.g.
/// "React · TypeScript · Docker". Anything else in it means prose, not badges.
fn tech_tokens(text: &str) -> Vec<String> {
    let text = squash_whitespace(text);
    if text.chars().count() >= BADGE_TEXT_MAX_CHARS
        || text.split_whitespace().count() > BADGE_TEXT_MAX_WORDS
    {
        return Vec::new();
    }
    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '|' | '·' | '•' | '/' | '+'))
        .map(|w| w.trim_matches(|c: char| matches!(c, '.' | ';' | ':' | '(' | ')' | '!')))
        .filter(|w| !w.is_empty())
        .collect();
    let all_tech = tokens.iter().all(|w| {
        w.chars().next().is_some_and(char::is_uppercase)
            && BADGE_TEXT_TOKENS.contains(&w.to_lowercase().as_str())
    });
    if !all_tech {
        return Vec::new();
    }
    tokens.into_iter().map(String::from).collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
