use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not parse document: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid settings: {0}")]
    Settings(String),
}

/// Input the tree parser refuses. Missing headings, links or sections are
/// never errors; only text that is not a document at all ends up here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("input contains binary content (NUL byte at offset {offset})")]
    BinaryContent { offset: usize },

    #[error("input is {len} bytes, limit is {limit}")]
    TooLarge { len: usize, limit: usize },

    #[error("input is not valid UTF-8 (first bad byte at offset {offset})")]
    InvalidUtf8 { offset: usize },
}

/// Why one section has no markup. Kept per section, never fatal to a page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("fragment is {len} bytes, limit is {limit}")]
    FragmentTooLarge { len: usize, limit: usize },

    #[error("render task for section `{id}` failed: {reason}")]
    Task { id: String, reason: String },
}
