use std::collections::HashSet;

use crate::model::Link;
use crate::parser::tables::{CODE_HOSTS, SECONDARY_MAX, SOCIAL_HOSTS, SOCIAL_MAX};
use crate::parser::text::{host_matches, host_of, squash_whitespace};
use crate::parser::tree::{Document, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Source,
    Social,
    Other,
}

/// Every hyperlink in document order, duplicates included. Links whose
/// anchor text is empty are dropped.
pub fn collect(doc: &Document) -> Vec<Link> {
    doc.walk()
        .filter_map(|n| match n {
            Node::Link { url, .. } => {
                let label = squash_whitespace(&n.text());
                (!label.is_empty()).then(|| Link::new(label, url.clone()))
            }
            _ => None,
        })
        .collect()
}

pub fn classify(url: &str) -> LinkKind {
    let host = host_of(url);
    if host.is_empty() {
        LinkKind::Other
    } else if CODE_HOSTS.iter().any(|d| host_matches(&host, d)) {
        LinkKind::Source
    } else if SOCIAL_HOSTS.iter().any(|d| host_matches(&host, d)) {
        LinkKind::Social
    } else {
        LinkKind::Other
    }
}

/// Up to four links besides the CTA: one source link, then at most two
/// social links, then whatever else came first.
pub fn curate(links: &[Link], cta: &Link) -> Vec<Link> {
    let mut seen = HashSet::new();
    let candidates: Vec<Link> = links
        .iter()
        .filter(|l| l.href != cta.href && !is_placeholder(&l.href))
        .filter(|l| seen.insert(l.href.clone()))
        .map(with_host_label)
        .collect();

    let mut picked: Vec<usize> = Vec::with_capacity(SECONDARY_MAX);
    if let Some(i) = candidates
        .iter()
        .position(|l| classify(&l.href) == LinkKind::Source)
    {
        picked.push(i);
    }
    picked.extend(
        candidates
            .iter()
            .enumerate()
            .filter(|(_, l)| classify(&l.href) == LinkKind::Social)
            .map(|(i, _)| i)
            .take(SOCIAL_MAX),
    );
    for i in 0..candidates.len() {
        if picked.len() >= SECONDARY_MAX {
            break;
        }
        if !picked.contains(&i) {
            picked.push(i);
        }
    }
    picked.truncate(SECONDARY_MAX);

    picked.into_iter().map(|i| candidates[i].clone()).collect()
}

pub fn is_placeholder(href: &str) -> bool {
    let href = href.trim();
    href.is_empty() || href == "#"
}

fn with_host_label(link: &Link) -> Link {
    if !link.label.trim().is_empty() {
        return link.clone();
    }
    let host = host_of(&link.href);
    let label = if host.is_empty() { link.href.clone() } else { host };
    Link::new(label, link.href.clone())
}
