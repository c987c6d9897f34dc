//! List posts, optionally filtered by a search query

use anyhow::Result;

use crate::content::Collection;
use crate::helpers::format_date;
use crate::Reader;

/// Load the collection and print the posts matching `query`
pub async fn run(reader: &Reader, query: &str, show_tags: bool) -> Result<()> {
    let collection = load_or_empty(reader).await;
    for line in format_listing(&collection, query, &reader.config.date_format) {
        println!("{}", line);
    }
    if show_tags {
        for line in format_tags(&collection) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Load the collection; an I/O failure is logged and yields an empty listing
pub async fn load_or_empty(reader: &Reader) -> Collection {
    match reader.load_collection().await {
        Ok(collection) => collection,
        Err(e) => {
            tracing::error!("Failed to load posts from {:?}: {}", reader.source.path(), e);
            Collection::default()
        }
    }
}

/// `Posts (n):` header, one line per matching post, then any skipped resources
pub fn format_listing(collection: &Collection, query: &str, date_format: &str) -> Vec<String> {
    let posts = collection.filter(query);
    let mut lines = Vec::with_capacity(posts.len() + 1);

    lines.push(format!("Posts ({}):", posts.len()));
    for post in posts {
        lines.push(format!(
            "  {} - {} [{}]",
            format_date(&post.date, date_format),
            post.title,
            post.path
        ));
    }

    if !collection.skipped().is_empty() {
        lines.push(format!("Skipped ({}):", collection.skipped().len()));
        for skipped in collection.skipped() {
            lines.push(format!("  {}: {}", skipped.path, skipped.reason));
        }
    }

    lines
}

/// `Tags (n):` header and `name (count)` lines, most used first
pub fn format_tags(collection: &Collection) -> Vec<String> {
    let tags = collection.tags();
    let mut lines = vec![format!("Tags ({}):", tags.len())];
    lines.extend(tags.into_iter().map(|(tag, count)| format!("  {} ({})", tag, count)));
    lines
}
