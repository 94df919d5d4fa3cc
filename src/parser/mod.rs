pub mod extract;
pub mod markdown;
pub mod sections;
pub mod tables;
pub mod text;
pub mod tree;

use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::model::PageModel;
use tree::Document;

/// Two-stage pipeline: markdown → typed tree → page model.
pub fn process(markdown: &str, settings: &Settings) -> Result<PageModel> {
    let doc = Document::parse(markdown, settings.max_input_bytes)?;
    debug!(bytes = markdown.len(), blocks = doc.nodes.len(), "parsed document");
    Ok(extract::extract_all(&doc))
}

/// Same as [`process`] for raw bytes, which must be UTF-8.
pub fn process_bytes(bytes: &[u8], settings: &Settings) -> Result<PageModel> {
    let doc = Document::parse_bytes(bytes, settings.max_input_bytes)?;
    debug!(bytes = bytes.len(), blocks = doc.nodes.len(), "parsed document");
    Ok(extract::extract_all(&doc))
}
