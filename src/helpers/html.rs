//! HTML helper functions

/// Escape text for use in HTML content and attribute values
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate an anchor tag; `text` is escaped, `href` is expected to be built by [`super::url_for`]
///
/// # Examples
/// ```ignore
/// link_to("/blog/hello", "Hello <3") // -> <a href="/blog/hello">Hello &lt;3</a>
/// ```
pub fn link_to(href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        html_escape(href),
        html_escape(text)
    )
}

/// Render tags as `# tag` pills
pub fn tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let items: String = tags
        .iter()
        .map(|tag| format!(r#"<span class="tag"># {}</span>"#, html_escape(tag)))
        .collect();
    format!(r#"<div class="tags">{}</div>"#, items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_link_to() {
        assert_eq!(
            link_to("/blog/hello", "Hello <3"),
            r#"<a href="/blog/hello">Hello &lt;3</a>"#
        );
    }

    #[test]
    fn test_tag_list() {
        assert_eq!(tag_list(&[]), "");
        let html = tag_list(&["rust".to_string(), "<ai>".to_string()]);
        assert!(html.contains(r#"<span class="tag"># rust</span>"#));
        assert!(html.contains("# &lt;ai&gt;"));
    }
}
