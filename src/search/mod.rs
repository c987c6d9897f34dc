//! Search over loaded posts
//!
//! A query matches a post when the title, description, author, or any tag
//! contains it as a case-insensitive substring. Matching is pure: results
//! keep collection order and nothing is cached between calls.

use crate::content::Post;

/// Return the posts matching `query`, in their original order.
///
/// An empty query matches everything. The query is not trimmed, so
/// surrounding spaces are part of the substring.
pub fn filter<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    if query.is_empty() {
        return posts.iter().collect();
    }

    let needle = query.to_lowercase();
    posts.iter().filter(|post| matches(post, &needle)).collect()
}

/// Whether a post matches an already lower-cased needle
fn matches(post: &Post, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(&post.title)
        || contains(&post.description)
        || contains(&post.author)
        || post.tags.iter().any(|tag| contains(tag))
}
