//! Date-ordered set of loaded posts

use indexmap::IndexMap;

use super::Post;
use crate::search;

/// A resource that could not be turned into a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Identifier of the offending resource
    pub path: String,
    /// Human-readable parse error
    pub reason: String,
}

/// All posts of one load, newest first.
///
/// A collection is built once and never mutated; reloading produces a new one.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    posts: Vec<Post>,
    skipped: Vec<Skipped>,
}

impl Collection {
    /// Build a collection, sorting by date descending.
    /// Posts sharing a date are ordered by identifier ascending.
    pub fn new(mut posts: Vec<Post>, skipped: Vec<Skipped>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.path.cmp(&b.path)));
        Self { posts, skipped }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Resources excluded from this load
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    /// Look up a post by identifier
    pub fn get(&self, path: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.path == path)
    }

    /// Posts matching a search query, in collection order
    pub fn filter(&self, query: &str) -> Vec<&Post> {
        search::filter(&self.posts, query)
    }

    /// Tag usage counts, most used first, ties by name
    pub fn tags(&self) -> Vec<(&str, usize)> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for post in &self.posts {
            for tag in &post.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
        let mut tags: Vec<_> = counts.into_iter().collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}
