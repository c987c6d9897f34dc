//! Write a prebuilt manifest

use anyhow::Result;
use std::path::Path;

use crate::content::Manifest;
use crate::Reader;

/// Scan the posts directory and save it as a JSON manifest
pub fn run(reader: &Reader, output: &Path) -> Result<Manifest> {
    let manifest = Manifest::scan(reader.posts_dir())?;
    manifest.save(output)?;
    tracing::info!("Wrote {} posts to {:?}", manifest.len(), output);
    Ok(manifest)
}
