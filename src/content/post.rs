//! Post model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ContentError, FrontMatter};

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Author name as written in the header
    pub author: String,

    /// Tags in header order
    pub tags: Vec<String>,

    /// One-line summary shown in listings
    pub description: String,

    /// Raw markdown body (everything after the header)
    pub body: String,

    /// Identifier derived from the storage location, used for routing
    pub path: String,
}

impl Post {
    /// Parse a post from its identifier and raw text.
    ///
    /// Metadata values are kept verbatim; the only checks are that every
    /// field is present and that the date reads as a calendar date.
    pub fn parse(path: &str, raw: &str) -> Result<Self, ContentError> {
        let (fm, body) = FrontMatter::parse(raw)?;

        let date_raw = fm.date.as_deref().ok_or(ContentError::MissingField("date"))?;
        let date = super::frontmatter::parse_date_string(date_raw)
            .ok_or_else(|| ContentError::InvalidDate(date_raw.to_string()))?;

        Ok(Self {
            title: fm.title.ok_or(ContentError::MissingField("title"))?,
            date,
            author: fm.author.ok_or(ContentError::MissingField("author"))?,
            tags: fm.tags.ok_or(ContentError::MissingField("tags"))?,
            description: fm
                .description
                .ok_or(ContentError::MissingField("description"))?,
            body: body.to_string(),
            path: path.to_string(),
        })
    }
}

/// Listing-level view of a post, without the body
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary<'a> {
    pub title: &'a str,
    pub date: NaiveDate,
    pub author: &'a str,
    pub tags: &'a [String],
    pub description: &'a str,
    pub path: &'a str,
}

impl<'a> From<&'a Post> for PostSummary<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            title: &post.title,
            date: post.date,
            author: &post.author,
            tags: &post.tags,
            description: &post.description,
            path: &post.path,
        }
    }
}
