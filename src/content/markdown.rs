//! Markdown rendering with syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::helpers::html_escape;

/// Theme used when none is configured or the configured one is unknown
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

lazy_static! {
    /// First word of a fence info string, e.g. `rust` in "rust,ignore"
    static ref FENCE_LANG: Regex = Regex::new(r"^[\w+#-]+").expect("valid fence regex");
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(DEFAULT_THEME, false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes
            .remove(theme)
            .or_else(|| {
                tracing::warn!("Unknown highlight theme {:?}, using {}", theme, DEFAULT_THEME);
                themes.remove(DEFAULT_THEME)
            })
            .unwrap_or_default();

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // (language, collected text) while inside a code block
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut in_external_link = false;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => fence_language(&info),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let html = match lang {
                            Some(lang) => self.highlight_code(&code, &lang),
                            None => format!("<pre><code>{}</code></pre>\n", html_escape(&code)),
                        };
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) if is_external(&dest_url) => {
                    in_external_link = true;
                    let title_attr = if title.is_empty() {
                        String::new()
                    } else {
                        format!(r#" title="{}""#, html_escape(&title))
                    };
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<a href="{}"{} target="_blank" rel="noopener noreferrer">"#,
                        html_escape(&dest_url),
                        title_attr
                    ))));
                }
                Event::End(TagEnd::Link) if in_external_link => {
                    in_external_link = false;
                    events.push(Event::Html(CowStr::from("</a>")));
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a fenced code block with a known language label
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = self.find_syntax(lang);
        let class = html_escape(lang);

        let body = match self.highlight_lines(code, syntax) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::debug!("Highlighting {} failed, emitting plain code: {}", lang, e);
                html_escape(code)
            }
        };

        let background = self
            .theme
            .settings
            .background
            .map(|c| format!(r#" style="background-color:#{:02x}{:02x}{:02x};""#, c.r, c.g, c.b))
            .unwrap_or_default();

        let caption = format!(
            r#"<figcaption><span class="lang">{}</span><button class="copy" type="button">Copy</button></figcaption>"#,
            class
        );

        if self.line_numbers {
            let gutter = (1..=code.lines().count().max(1))
                .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                r#"<figure class="highlight {class}">{caption}<table><tr><td class="gutter"><pre>{gutter}</pre></td><td class="code"><pre{background}><code class="language-{class}">{body}</code></pre></td></tr></table></figure>"#
            )
        } else {
            format!(
                r#"<figure class="highlight {class}">{caption}<pre{background}><code class="language-{class}">{body}</code></pre></figure>"#
            )
        }
    }

    fn highlight_lines(&self, code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut out = String::with_capacity(code.len() * 2);
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &self.syntax_set)?;
            out.push_str(&styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)?);
        }
        Ok(out)
    }

    fn find_syntax(&self, lang: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn fence_language(info: &str) -> Option<String> {
    FENCE_LANG.find(info.trim()).map(|m| m.as_str().to_string())
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
