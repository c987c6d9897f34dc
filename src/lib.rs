//! blog-reader: a small reader for front-matter blog posts
//!
//! Posts are markdown files with a YAML header (title, date, author, tags,
//! description). They are collected into a [`content::Manifest`], parsed
//! into a date-ordered [`content::Collection`], searched with
//! [`search::filter`], and rendered to HTML by [`views::Views`] with
//! syntax-highlighted code blocks.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod search;
pub mod server;
pub mod views;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{Collection, ContentError, ContentLoader, ManifestSource};

/// The reader application
#[derive(Clone)]
pub struct Reader {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Where posts are read from
    pub source: ManifestSource,
}

impl Reader {
    /// Create a new reader from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source = ManifestSource::Scan(base_dir.join(&config.posts_dir));

        Ok(Self {
            config,
            base_dir,
            source,
        })
    }

    /// Read posts from a prebuilt manifest file instead of scanning
    pub fn with_manifest_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        self.source = ManifestSource::File(path);
        self
    }

    /// Directory scanned for posts when no manifest file is used
    pub fn posts_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.posts_dir)
    }

    /// Load and parse every post in one awaited call
    pub async fn load_collection(&self) -> Result<Collection, ContentError> {
        let manifest = self.source.read_async().await?;
        Ok(ContentLoader::new(&manifest).load_posts())
    }
}
