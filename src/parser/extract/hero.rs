use tracing::debug;

use crate::model::HeroImage;
use crate::parser::tables::HERO_ALT_KEYWORDS;
use crate::parser::tree::{Document, Node};

/// The first image after the title.
///
/// Alt text naming a screenshot/logo/banner marks an image as a preferred
/// hero, but the scan still stops at the first image it meets: an early
/// plain image is returned even when a better-labelled one follows.
pub fn extract(doc: &Document) -> Option<HeroImage> {
    let (image, preferred) = doc.walk_after_title().find_map(|n| match n {
        Node::Image { url, alt } => Some((
            HeroImage {
                url: url.clone(),
                alt: alt.trim().to_string(),
            },
            is_preferred(alt),
        )),
        _ => None,
    })?;
    debug!(url = %image.url, preferred, "hero image selected");
    Some(image)
}

fn is_preferred(alt: &str) -> bool {
    let alt = alt.to_lowercase();
    HERO_ALT_KEYWORDS.iter().any(|kw| alt.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero(md: &str) -> Option<HeroImage> {
        extract(&Document::parse(md, usize::MAX).unwrap())
    }

    #[test]
    fn first_image_after_title() {
        let h = hero("![before](a.png)\n\n# Foo\n\n![Screenshot](s.png)").unwrap();
        assert_eq!(h.url, "s.png");
        assert_eq!(h.alt, "Screenshot");
    }

    #[test]
    fn early_plain_image_wins_over_later_screenshot() {
        let h = hero("# Foo\n\n![diagram](d.png)\n\n![Screenshot](s.png)").unwrap();
        assert_eq!(h.url, "d.png");
    }

    #[test]
    fn no_title_scans_whole_document() {
        assert_eq!(hero("![logo](l.svg)").unwrap().url, "l.svg");
    }

    #[test]
    fn no_image() {
        assert!(hero("# Foo\n\ntext").is_none());
    }

    #[test]
    fn preference_keywords() {
        assert!(is_preferred("Demo GIF"));
        assert!(is_preferred("project-banner"));
        assert!(!is_preferred("diagram"));
    }
}
