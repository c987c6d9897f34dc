//! Content loader - turns manifest entries into posts

use super::{Collection, ContentError, Manifest, Post, Skipped};

/// Loads posts from a manifest
pub struct ContentLoader<'a> {
    manifest: &'a Manifest,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(manifest: &'a Manifest) -> Self {
        Self { manifest }
    }

    /// Parse every manifest entry into a date-sorted collection.
    ///
    /// Entries that fail to parse are logged and recorded as skipped; they
    /// never abort the rest of the load.
    pub fn load_posts(&self) -> Collection {
        let mut posts = Vec::with_capacity(self.manifest.len());
        let mut skipped = Vec::new();

        for (path, raw) in self.manifest.iter() {
            match Post::parse(path, raw) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                    skipped.push(Skipped {
                        path: path.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!("Loaded {} posts, skipped {}", posts.len(), skipped.len());
        Collection::new(posts, skipped)
    }

    /// Load a single post by identifier
    pub fn load_post(&self, path: &str) -> Result<Post, ContentError> {
        let raw = self
            .manifest
            .get(path)
            .ok_or_else(|| ContentError::NotFound(path.to_string()))?;
        Post::parse(path, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, date: &str, tags: &str) -> String {
        format!(
            "---\ntitle: {title}\ndate: {date}\nauthor: Sam\ntags: {tags}\ndescription: About {title}\n---\n\nBody of {title}\n"
        )
    }

    fn manifest() -> Manifest {
        Manifest::from_entries([
            ("january", raw("January", "2024-01-01", "[rust]")),
            ("broken", "no header here".to_string()),
            ("june", raw("June", "2024-06-01", "[ai, ml]")),
        ])
    }

    #[test]
    fn test_load_posts_sorts_and_skips() {
        let manifest = manifest();
        let collection = ContentLoader::new(&manifest).load_posts();

        let order: Vec<&str> = collection.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(order, vec!["june", "january"]);

        assert_eq!(collection.skipped().len(), 1);
        assert_eq!(collection.skipped()[0].path, "broken");
        assert!(collection.skipped()[0].reason.contains("front-matter"));
    }

    #[test]
    fn test_dates_are_descending() {
        let manifest = Manifest::from_entries([
            ("a", raw("A", "2023-05-05", "[]")),
            ("b", raw("B", "2025-01-01", "[]")),
            ("c", raw("C", "2024-02-29", "[]")),
        ]);
        let collection = ContentLoader::new(&manifest).load_posts();
        for pair in collection.posts().windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_load_post_by_identifier() {
        let manifest = manifest();
        let loader = ContentLoader::new(&manifest);

        let post = loader.load_post("june").unwrap();
        assert_eq!(post.path, "june");
        assert_eq!(post.title, "June");

        let err = loader.load_post("december").unwrap_err();
        assert!(err.is_not_found());

        let err = loader.load_post("broken").unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontMatter));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::new();
        let collection = ContentLoader::new(&manifest).load_posts();
        assert!(collection.is_empty());
        assert!(collection.skipped().is_empty());
    }
}
