//! Errors raised while reading and parsing posts

use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of the content layer
#[derive(Debug, Error)]
pub enum ContentError {
    /// The raw text does not start with a `---` metadata block
    #[error("missing front-matter header")]
    MissingFrontMatter,

    /// The opening `---` was found but no closing `---` line
    #[error("front-matter header is not terminated by `---`")]
    UnterminatedFrontMatter,

    /// The header is not valid YAML (or not a mapping)
    #[error("invalid front-matter: {0}")]
    InvalidFrontMatter(#[from] serde_yaml::Error),

    /// A required metadata field is absent
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The `date` field could not be read as a calendar date
    #[error("invalid date `{0}`")]
    InvalidDate(String),

    /// No post with the requested identifier exists
    #[error("post not found: {0}")]
    NotFound(String),

    /// A prebuilt manifest file is not valid JSON
    #[error("invalid manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),

    /// Reading the posts directory or a post file failed
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Whether this error means "nothing by that name" rather than a broken resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}
