pub mod badges;
pub mod cta;
pub mod features;
pub mod hero;
pub mod links;
pub mod stats;
pub mod tagline;
pub mod tech;
pub mod testimonials;
pub mod title;

use tracing::debug;

use super::sections;
use super::tree::Document;
use crate::model::{Badge, Feature, HeroImage, Link, PageModel, Section, Stat, Testimonial};

/// Outputs of the independent passes over the tree. Sections are still in
/// document order here.
#[derive(Debug, Default, PartialEq)]
struct Fields {
    title: String,
    tagline: String,
    links: Vec<Link>,
    badges: Vec<Badge>,
    features: Vec<Feature>,
    sections: Vec<Section>,
    hero: Option<HeroImage>,
    stats: Vec<Stat>,
    tech: Vec<String>,
    testimonials: Vec<Testimonial>,
}

/// Fields → CTA and secondary links → section order → page model.
pub fn extract_all(doc: &Document) -> PageModel {
    let fields = collect_fields(doc);

    let cta = cta::resolve(&fields.links, &fields.sections);
    let secondary_links = links::curate(&fields.links, &cta);
    let ordered = sections::order(fields.sections);

    debug!(
        links = fields.links.len(),
        sections = ordered.len(),
        features = fields.features.len(),
        badges = fields.badges.len(),
        cta = %cta.href,
        "extracted page model"
    );

    PageModel {
        title: fields.title,
        tagline: fields.tagline,
        cta,
        secondary_links,
        features: fields.features,
        sections: ordered,
        badges: non_empty(fields.badges),
        hero_image: fields.hero,
        stats: non_empty(fields.stats),
        tech_stack: non_empty(fields.tech),
        testimonials: non_empty(fields.testimonials),
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

#[cfg(feature = "rayon")]
fn collect_fields(doc: &Document) -> Fields {
    let mut fields = Fields::default();
    let Fields {
        title: title_out,
        tagline: tagline_out,
        links: links_out,
        badges: badges_out,
        features: features_out,
        sections: sections_out,
        hero: hero_out,
        stats: stats_out,
        tech: tech_out,
        testimonials: testimonials_out,
    } = &mut fields;

    rayon::scope(|s| {
        s.spawn(move |_| *title_out = title::extract(doc));
        s.spawn(move |_| *tagline_out = tagline::extract(doc));
        s.spawn(move |_| {
            // Badges read the link list, so they share this task.
            *links_out = links::collect(doc);
            *badges_out = badges::extract(doc, links_out);
        });
        s.spawn(move |_| *features_out = features::extract(doc));
        s.spawn(move |_| *sections_out = sections::segment(doc));
        s.spawn(move |_| *hero_out = hero::extract(doc));
        s.spawn(move |_| *stats_out = stats::extract(doc));
        s.spawn(move |_| *tech_out = tech::extract(doc));
        s.spawn(move |_| *testimonials_out = testimonials::extract(doc));
    });

    fields
}

#[cfg(not(feature = "rayon"))]
fn collect_fields(doc: &Document) -> Fields {
    sequential_fields(doc)
}

#[cfg_attr(all(feature = "rayon", not(test)), allow(dead_code))]
fn sequential_fields(doc: &Document) -> Fields {
    let links = links::collect(doc);
    Fields {
        title: title::extract(doc),
        tagline: tagline::extract(doc),
        badges: badges::extract(doc, &links),
        links,
        features: features::extract(doc),
        sections: sections::segment(doc),
        hero: hero::extract(doc),
        stats: stats::extract(doc),
        tech: tech::extract(doc),
        testimonials: testimonials::extract(doc),
    }
}

// ── Tests ──
