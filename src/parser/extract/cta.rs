use super::links::{classify, is_placeholder, LinkKind};
use crate::model::{Link, Section};
use crate::parser::tables::{CTA_KEYWORDS, GET_STARTED_LABEL, INSTALL_KEYWORDS, SOURCE_LABEL};

/// Pick the one primary action. Precedence: a live/demo-ish link, then the
/// install section's anchor, then the repository, then a bare placeholder.
pub fn resolve(links: &[Link], sections: &[Section]) -> Link {
    if let Some(link) = links
        .iter()
        .find(|l| !is_placeholder(&l.href) && has_action_keyword(l))
    {
        return link.clone();
    }

    if let Some(section) = sections.iter().find(|s| is_install_section(s)) {
        return Link::new(GET_STARTED_LABEL, format!("#{}", section.id));
    }

    if let Some(link) = links.iter().find(|l| classify(&l.href) == LinkKind::Source) {
        return Link::new(SOURCE_LABEL, link.href.clone());
    }

    Link::new(GET_STARTED_LABEL, "#")
}

fn has_action_keyword(link: &Link) -> bool {
    let label = link.label.to_lowercase();
    let href = link.href.to_lowercase();
    CTA_KEYWORDS
        .iter()
        .any(|kw| label.contains(kw) || href.contains(kw))
}

fn is_install_section(section: &Section) -> bool {
    let title = section.title.to_lowercase().replace(' ', "-");
    INSTALL_KEYWORDS
        .iter()
        .any(|kw| section.id.contains(kw) || title.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, title: &str) -> Section {
        Section {
            id: id.to_string(),
            title: title.to_string(),
            content: "x".to_string(),
        }
    }

    #[test]
    fn demo_link_wins() {
        let links = vec![
            Link::new("Repo", "https://github.com/a/b"),
            Link::new("Live Demo", "https://a.example.com"),
        ];
        let sections = vec![section("installation", "Install")];
        assert_eq!(resolve(&links, &sections), Link::new("Live Demo", "https://a.example.com"));
    }

    #[test]
    fn keyword_in_url_counts() {
        let links = vec![Link::new("Open", "https://foo.vercel.app")];
        assert_eq!(resolve(&links, &[]).href, "https://foo.vercel.app");
    }

    #[test]
    fn placeholder_keyword_link_skipped() {
        let links = vec![Link::new("Try it", "#")];
        let sections = vec![section("setup", "Install")];
        assert_eq!(resolve(&links, &sections), Link::new("Get Started", "#setup"));
    }

    #[test]
    fn install_section_anchor() {
        let sections = vec![section("license", "License"), section("installation", "Install")];
        assert_eq!(resolve(&[], &sections), Link::new("Get Started", "#installation"));
    }

    #[test]
    fn quick_start_by_title() {
        let sections = vec![section("first-steps", "Quick Start")];
        assert_eq!(resolve(&[], &sections).href, "#first-steps");
    }

    #[test]
    fn repository_fallback() {
        let links = vec![
            Link::new("Docs", "https://docs.rs/x"),
            Link::new("source", "https://github.com/a/b"),
        ];
        assert_eq!(resolve(&links, &[]), Link::new("View on GitHub", "https://github.com/a/b"));
    }

    #[test]
    fn final_fallback() {
        assert_eq!(resolve(&[], &[]), Link::new("Get Started", "#"));
    }
}
