use std::collections::HashMap;
use std::sync::Arc;

use pulldown_cmark::{html, Event, Parser, Tag};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::RenderError;
use crate::model::Section;
use crate::parser::text::is_script_url;
use crate::parser::tree;

/// Turns one section's markdown into markup.
pub trait MarkupRenderer: Send + Sync + 'static {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// pulldown-cmark HTML output with the same extensions the parser uses.
#[derive(Debug, Clone)]
pub struct CmarkRenderer {
    max_fragment_bytes: usize,
}

impl CmarkRenderer {
    pub fn new(max_fragment_bytes: usize) -> Self {
        CmarkRenderer { max_fragment_bytes }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.max_fragment_bytes)
    }
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl MarkupRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        if markdown.len() > self.max_fragment_bytes {
            return Err(RenderError::FragmentTooLarge {
                len: markdown.len(),
                limit: self.max_fragment_bytes,
            });
        }
        let events = Parser::new_ext(markdown, tree::options()).map(neutralize);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events);
        Ok(out)
    }
}

/// Raw HTML from the README is shown as text; script links and images point
/// nowhere.
fn neutralize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: "#".into(),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: "#".into(),
            title,
            id,
        }),
        other => other,
    }
}

/// One finished render, successful or not.
#[derive(Debug)]
pub struct RenderedSection {
    pub id: String,
    pub result: Result<String, RenderError>,
}

/// What to show for a section right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionBody<'a> {
    Markup(&'a str),
    /// Not rendered (yet, or ever): show the markdown itself.
    Raw(&'a str),
}

/// Section id → markup, filled as renders complete. Missing entries fall
/// back to the raw content.
#[derive(Debug, Default, Clone)]
pub struct RenderedSections {
    markup: HashMap<String, String>,
    failed: Vec<String>,
}

impl RenderedSections {
    pub fn apply(&mut self, rendered: RenderedSection) {
        match rendered.result {
            Ok(markup) => {
                self.markup.insert(rendered.id, markup);
            }
            Err(e) => {
                warn!(section = %rendered.id, error = %e, "render failed, using raw markdown");
                self.failed.push(rendered.id);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.markup.get(id).map(String::as_str)
    }

    pub fn body_for<'a>(&'a self, section: &'a Section) -> SectionBody<'a> {
        match self.get(&section.id) {
            Some(markup) => SectionBody::Markup(markup),
            None => SectionBody::Raw(&section.content),
        }
    }

    pub fn len(&self) -> usize {
        self.markup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }
}

/// Render every section on its own task, at most `concurrency` at once, and
/// yield results in completion order. Must be called inside a tokio runtime.
pub fn render_sections_streaming<R: MarkupRenderer>(
    renderer: Arc<R>,
    sections: &[Section],
    concurrency: usize,
) -> mpsc::Receiver<RenderedSection> {
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let (tx, rx) = mpsc::channel::<RenderedSection>(concurrency * 2);

    for section in sections {
        let renderer = Arc::clone(&renderer);
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();
        let id = section.id.clone();
        let content = section.content.clone();

        tokio::spawn(async move {
            let Ok(_permit) = sem.acquire_owned().await else {
                return;
            };
            // A panicking renderer surfaces as a JoinError; only this
            // section loses its markup.
            let result = match tokio::task::spawn_blocking(move || renderer.render(&content)).await {
                Ok(result) => result,
                Err(e) => Err(RenderError::Task {
                    id: id.clone(),
                    reason: e.to_string(),
                }),
            };
            let _ = tx.send(RenderedSection { id, result }).await;
        });
    }

    rx
}

/// Collect [`render_sections_streaming`] into one map.
pub async fn render_sections<R: MarkupRenderer>(
    renderer: Arc<R>,
    sections: &[Section],
    concurrency: usize,
) -> RenderedSections {
    let mut rx = render_sections_streaming(renderer, sections, concurrency);
    let mut rendered = RenderedSections::default();
    while let Some(section) = rx.recv().await {
        rendered.apply(section);
    }
    debug!(
        rendered = rendered.len(),
        failed = rendered.failed().len(),
        "section rendering finished"
    );
    rendered
}
