//! Post manifest: identifier → raw text
//!
//! The manifest is the only thing the loader reads. It is built once,
//! either by scanning the posts directory at startup or by reading a JSON
//! file produced ahead of time with `blog-reader manifest`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ContentError;

/// Ordered mapping from post identifier to raw post text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: IndexMap<String, String>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest from `(identifier, raw)` pairs, keeping their order.
    /// A repeated identifier replaces the earlier text.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Scan a directory for markdown files.
    ///
    /// Files are visited in file-name order so the manifest is the same on
    /// every platform. A missing directory yields an empty manifest. A file
    /// that cannot be read is logged and left out; only a failure of the
    /// directory walk itself is an error.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self, ContentError> {
        let dir = dir.as_ref();
        let mut manifest = Manifest::new();
        let mut origins: HashMap<String, PathBuf> = HashMap::new();

        if !dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", dir);
            return Ok(manifest);
        }

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                ContentError::Io {
                    path,
                    source: e.into(),
                }
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            let Some(id) = identifier_for(dir, path) else {
                tracing::warn!("Skipping {:?}: cannot derive an identifier", path);
                continue;
            };

            let raw = match fs::read_to_string(path) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                    continue;
                }
            };

            if let Some(previous) = origins.insert(id.clone(), path.to_path_buf()) {
                tracing::warn!(
                    "{:?} and {:?} share the identifier {:?}; keeping {:?}",
                    previous,
                    path,
                    id,
                    path
                );
            }
            manifest.insert(id, raw);
        }

        tracing::debug!("Scanned {} posts from {:?}", manifest.len(), dir);
        Ok(manifest)
    }

    /// Read a manifest previously written with [`Manifest::save`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the manifest as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ContentError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Add or replace an entry
    pub fn insert(&mut self, id: impl Into<String>, raw: impl Into<String>) {
        self.entries.insert(id.into(), raw.into());
    }

    /// Raw text for an identifier
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Entries in manifest order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where a manifest comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// Scan a posts directory at startup
    Scan(PathBuf),
    /// Read a JSON manifest generated ahead of time
    File(PathBuf),
}

impl ManifestSource {
    /// Build the manifest, blocking on file I/O
    pub fn read(&self) -> Result<Manifest, ContentError> {
        match self {
            ManifestSource::Scan(dir) => Manifest::scan(dir),
            ManifestSource::File(file) => Manifest::load(file),
        }
    }

    /// Build the manifest on tokio's blocking pool
    pub async fn read_async(&self) -> Result<Manifest, ContentError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.read())
            .await
            .map_err(|e| ContentError::Io {
                path: self.path().to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e),
            })?
    }

    /// The directory or file to watch for changes
    pub fn path(&self) -> &Path {
        match self {
            ManifestSource::Scan(path) | ManifestSource::File(path) => path,
        }
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// `posts/2024/hello.md` → `2024/hello`
fn identifier_for(dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(dir).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
