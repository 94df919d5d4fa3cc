//! README → landing-page model.
//!
//! [`extract`] parses one markdown document and infers a [`PageModel`]:
//! title, tagline, call-to-action, links, features, ordered sections,
//! badges, hero image, stats, tech stack and testimonials. [`render`] turns
//! section content into markup concurrently and [`export`] writes a static
//! HTML page.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod render;

pub use config::Settings;
pub use error::{Error, ParseError, RenderError, Result};
pub use model::{Badge, Feature, HeroImage, Link, PageModel, Section, Stat, Testimonial};

/// Extract a page model with default [`Settings`].
pub fn extract(markdown: &str) -> Result<PageModel> {
    parser::process(markdown, &Settings::default())
}

pub fn extract_with(markdown: &str, settings: &Settings) -> Result<PageModel> {
    parser::process(markdown, settings)
}

pub fn extract_bytes(bytes: &[u8], settings: &Settings) -> Result<PageModel> {
    parser::process_bytes(bytes, settings)
}
