//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Reader;

/// Metadata for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub tags: &'a [String],
    pub description: &'a str,
    /// File name without extension; defaults to the slugified title
    pub path: Option<&'a str>,
}

/// Write a post with a complete metadata header into the posts directory
pub fn create_post(reader: &Reader, post: &NewPost) -> Result<PathBuf> {
    let posts_dir = reader.posts_dir();
    fs::create_dir_all(&posts_dir)?;

    let name = match post.path {
        Some(p) => p.trim_end_matches(".md").to_string(),
        None => slug::slugify(post.title),
    };
    if name.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", post.title);
    }

    let file_path = posts_dir.join(format!("{}.md", name));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&file_path, scaffold(post, chrono::Local::now().date_naive())?)?;
    println!("Created: {:?}", file_path);
    Ok(file_path)
}

/// Header plus an empty body; values go through YAML so quoting is always valid
fn scaffold(post: &NewPost, date: chrono::NaiveDate) -> Result<String> {
    let mut header = serde_yaml::Mapping::new();
    header.insert("title".into(), post.title.into());
    header.insert("date".into(), date.format("%Y-%m-%d").to_string().into());
    header.insert("author".into(), post.author.into());
    header.insert(
        "tags".into(),
        serde_yaml::Value::Sequence(post.tags.iter().map(|t| t.as_str().into()).collect()),
    );
    header.insert("description".into(), post.description.into());

    Ok(format!("---\n{}---\n\n", serde_yaml::to_string(&header)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_scaffold_parses_back() {
        let tags = vec!["rust".to_string(), "a: b".to_string()];
        let new_post = NewPost {
            title: "Hello: World",
            author: "Jo",
            tags: &tags,
            description: "# not a comment",
            path: None,
        };
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let raw = scaffold(&new_post, date).unwrap();

        let post = Post::parse("hello-world", &raw).unwrap();
        assert_eq!(post.title, "Hello: World");
        assert_eq!(post.date, date);
        assert_eq!(post.author, "Jo");
        assert_eq!(post.tags, tags);
        assert_eq!(post.description, "# not a comment");
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let reader = Reader::new(dir.path()).unwrap();
        let new_post = NewPost {
            title: "My First Post",
            ..Default::default()
        };

        let path = create_post(&reader, &new_post).unwrap();
        assert_eq!(path, dir.path().join("posts/my-first-post.md"));
        assert!(create_post(&reader, &new_post).is_err());
    }
}
