//! HTML views: the post listing, a single post, and "not found"
//!
//! Views are plain functions of already-loaded data. They never touch the
//! manifest themselves, so the caller decides what a "mount" loads.

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, Post};
use crate::helpers::{html_escape, format_date, link_to, post_url, tag_list, url_for};

const STYLE: &str = r#"<style>
body{max-width:48rem;margin:0 auto;padding:0 1rem;font-family:system-ui,sans-serif;line-height:1.6}
nav{display:flex;align-items:center;justify-content:space-between;padding:.5rem 0}
nav a{font:bold 1.8rem monospace;color:inherit;text-decoration:none}
.search input{width:100%;padding:.5rem;font-size:1rem}
.posts{list-style:none;padding:0}
.posts li{border-bottom:2px solid #ddd;padding-bottom:.5rem;margin-bottom:1rem}
.meta{font-size:.9rem;opacity:.6}
.tags{display:flex;flex-wrap:wrap;gap:.5rem;padding:.5rem 0}
.tag{font-size:.85rem;padding:0 .5rem;border-radius:999px;background:#eee}
figure.highlight{position:relative;margin:1rem 0}
figure.highlight figcaption{position:absolute;top:0;left:0;padding:.3rem 1rem;font-size:.75rem;opacity:.5;color:#fff}
figure.highlight pre{border-radius:.7rem;padding:2rem 1rem 1rem;overflow-x:auto;font-size:.85rem;margin:0}
figure.highlight button.copy{position:absolute;top:.3rem;right:.5rem;font-size:.75rem;cursor:pointer}
</style>"#;

/// Copies a highlighted block's code to the clipboard
const COPY_SCRIPT: &str = r#"<script>
document.addEventListener('click', function(e) {
    var button = e.target.closest('figure.highlight button.copy');
    if (!button || !navigator.clipboard) return;
    var code = button.closest('figure').querySelector('code');
    navigator.clipboard.writeText(code ? code.innerText : '').then(function() {
        button.textContent = 'Copied';
        setTimeout(function() { button.textContent = 'Copy'; }, 1500);
    });
});
</script>"#;

/// Renders the reader's pages
pub struct Views {
    config: SiteConfig,
    markdown: MarkdownRenderer,
}

impl Views {
    /// Create views for a site; builds the highlighter once
    pub fn new(config: SiteConfig) -> Self {
        let markdown =
            MarkdownRenderer::with_options(&config.highlight.theme, config.highlight.line_number);
        Self { config, markdown }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Markdown body of a post as HTML
    pub fn render_body(&self, post: &Post) -> String {
        self.markdown.render(&post.body)
    }

    /// The listing view: search box plus matching posts
    pub fn listing(&self, posts: &[&Post], query: &str) -> String {
        let mut body = String::new();

        body.push_str(&format!(
            r#"<form class="search" method="get" action="{}"><input type="search" name="q" placeholder="Search posts..." value="{}" autofocus></form>"#,
            html_escape(&url_for(&self.config, "")),
            html_escape(query)
        ));

        if posts.is_empty() {
            body.push_str(r#"<p class="empty">No posts found</p>"#);
        } else {
            body.push_str(r#"<ul class="posts">"#);
            for post in posts {
                body.push_str(&format!(
                    r#"<li><h2>{}</h2><p class="description">{}</p>{}{}</li>"#,
                    link_to(&post_url(&self.config, &post.path), &post.title),
                    html_escape(&post.description),
                    self.meta_line(post),
                    tag_list(&post.tags)
                ));
            }
            body.push_str("</ul>");
        }

        self.layout(&self.config.title, &body)
    }

    /// The detail view for one post
    pub fn detail(&self, post: &Post) -> String {
        let body = format!(
            r#"<article><h1>{}</h1>{}{}<div class="content">{}</div></article>"#,
            html_escape(&post.title),
            self.meta_line(post),
            tag_list(&post.tags),
            self.render_body(post)
        );
        self.layout(&post.title, &body)
    }

    /// Shown when a post identifier has no match
    pub fn not_found(&self) -> String {
        self.layout("Post not found", "<h1>Post not found</h1>")
    }

    /// `date · author`
    fn meta_line(&self, post: &Post) -> String {
        format!(
            r#"<p class="meta">{} · <strong>{}</strong></p>"#,
            html_escape(&format_date(&post.date, &self.config.date_format)),
            html_escape(&post.author)
        )
    }

    fn layout(&self, title: &str, body: &str) -> String {
        let page_title = if title == self.config.title {
            html_escape(title)
        } else {
            format!("{} | {}", html_escape(title), html_escape(&self.config.title))
        };

        let description = if self.config.description.is_empty() {
            String::new()
        } else {
            format!(
                "<meta name=\"description\" content=\"{}\">\n",
                html_escape(&self.config.description)
            )
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_title}</title>
{description}{STYLE}
</head>
<body>
<nav>{home}</nav>
<main>
{body}
</main>
{COPY_SCRIPT}
</body>
</html>
"#,
            home = link_to(&url_for(&self.config, ""), &self.config.title),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post() -> Post {
        Post {
            title: "Tips & <Tricks>".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            author: "Jane".to_string(),
            tags: vec!["rust".to_string()],
            description: "Short & sweet".to_string(),
            body: "Hello *world*\n\n```rust\nfn main() {}\n```\n".to_string(),
            path: "2024/tips".to_string(),
        }
    }

    #[test]
    fn test_listing() {
        let views = Views::new(SiteConfig::default());
        let post = post();
        let html = views.listing(&[&post], "ru\"st");

        assert!(html.contains(r#"<a href="/blog/2024/tips">Tips &amp; &lt;Tricks&gt;</a>"#));
        assert!(html.contains("Short &amp; sweet"));
        assert!(html.contains("2024-06-01 · <strong>Jane</strong>"));
        assert!(html.contains("# rust"));
        assert!(html.contains(r#"value="ru&quot;st""#));
        assert!(!html.contains("<Tricks>"));
    }

    #[test]
    fn test_empty_listing() {
        let views = Views::new(SiteConfig::default());
        let html = views.listing(&[], "nothing");
        assert!(html.contains("No posts found"));
    }

    #[test]
    fn test_detail() {
        let views = Views::new(SiteConfig::default());
        let html = views.detail(&post());

        assert!(html.contains("<h1>Tips &amp; &lt;Tricks&gt;</h1>"));
        assert!(html.contains("<em>world</em>"));
        assert!(html.contains("highlight rust"));
        assert!(html.contains("<title>Tips &amp; &lt;Tricks&gt; | Blogs</title>"));
    }

    #[test]
    fn test_date_format_from_config() {
        let config = SiteConfig {
            date_format: "MMMM DD, YYYY".to_string(),
            ..SiteConfig::default()
        };
        let views = Views::new(config);
        assert!(views.detail(&post()).contains("June 01, 2024"));
    }

    #[test]
    fn test_site_description_meta() {
        let views = Views::new(SiteConfig::default());
        assert!(!views.not_found().contains(r#"name="description""#));

        let config = SiteConfig {
            description: "Notes on \"Rust\"".to_string(),
            ..SiteConfig::default()
        };
        let html = Views::new(config).not_found();
        assert!(html.contains(r#"<meta name="description" content="Notes on &quot;Rust&quot;">"#));
    }

    #[test]
    fn test_copy_script_in_layout() {
        let views = Views::new(SiteConfig::default());
        let html = views.detail(&post());
        assert!(html.contains(r#"<button class="copy""#));
        assert!(html.contains("navigator.clipboard.writeText"));
        assert!(html.find("navigator.clipboard").unwrap() < html.find("</body>").unwrap());
    }

    #[test]
    fn test_not_found() {
        let views = Views::new(SiteConfig::default());
        assert!(views.not_found().contains("Post not found"));
    }
}
