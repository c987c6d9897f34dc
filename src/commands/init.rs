//! Initialize a new reader site

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# blog-reader configuration

title: Blogs
description: ''
root: /

# Markdown posts, relative to this file
posts_dir: posts

# Moment.js-style date format used in listings
date_format: YYYY-MM-DD

highlight:
  theme: base16-ocean.dark
  line_number: false

server:
  ip: localhost
  port: 4000
"#;

const WELCOME_POST: &str = r#"---
title: Welcome
date: 2024-01-01
author: blog-reader
tags: [meta]
description: Your first post. Edit or delete it.
---

Posts are markdown files with a metadata header.

```rust
fn main() {
    println!("Hello, reader!");
}
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }

    fs::create_dir_all(target_dir.join("posts"))?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let welcome = target_dir.join("posts/welcome.md");
    if !welcome.exists() {
        fs::write(welcome, WELCOME_POST)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentLoader, Manifest};
    use crate::Reader;
    use tempfile::tempdir;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let reader = Reader::new(dir.path()).unwrap();
        assert_eq!(reader.config.title, "Blogs");

        let manifest = Manifest::scan(reader.posts_dir()).unwrap();
        let collection = ContentLoader::new(&manifest).load_posts();
        assert_eq!(collection.len(), 1);
        assert!(collection.skipped().is_empty());
        assert_eq!(collection.posts()[0].path, "welcome");

        assert!(init_site(dir.path()).is_err());
    }
}
