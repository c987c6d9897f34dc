//! Content module - manifest, posts, loading, and markdown rendering

mod collection;
mod error;
mod frontmatter;
pub mod loader;
mod manifest;
mod markdown;
mod post;

pub use collection::{Collection, Skipped};
pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use manifest::{Manifest, ManifestSource};
pub use markdown::{MarkdownRenderer, DEFAULT_THEME};
pub use post::{Post, PostSummary};
