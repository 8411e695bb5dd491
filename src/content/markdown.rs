//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Ellipsis marker appended to derived excerpts.
pub const ELLIPSIS: &str = "…";

/// Markdown renderer with syntax highlighting.
///
/// Inline HTML in the source passes through untouched: post content is
/// authored, not user-submitted, so there is no sanitization pass.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block_lang: Option<String> = None;
        let mut in_code_block = false;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            let lang = lang.to_string();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang)
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    in_code_block = true;
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    code_block_lang = None;
                    in_code_block = false;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => {
                    if !in_code_block {
                        events.push(event);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block.
    ///
    /// An unrecognized language never fails the conversion: the plain-text
    /// syntax is used instead.
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                if self.line_numbers {
                    add_line_numbers(&highlighted, lang)
                } else {
                    format!(
                        r#"<pre><code class="language-{}">{}</code></pre>"#,
                        lang, highlighted
                    )
                }
            }
            Err(_) => {
                // Fallback to plain code block
                let escaped = html_escape(code);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang, escaped
                )
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Add a line-number gutter to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let line_count = lines.len();

    let mut gutter = String::new();
    let mut code_lines = String::new();

    for (i, line) in lines.iter().enumerate() {
        gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
        code_lines.push_str(line);
        if i < line_count - 1 {
            gutter.push('\n');
            code_lines.push('\n');
        }
    }

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang, gutter, code_lines
    )
}

/// Derive a display excerpt from the raw markdown body.
///
/// Truncation is a display cut, not a sentence-aware summary: it may fall
/// mid-word. Cutting the raw markdown rather than the rendered HTML avoids
/// truncating inside a tag. The cut always lands on a char boundary.
pub fn derive_excerpt(raw: &str, limit: usize) -> String {
    if raw.chars().count() <= limit {
        return raw.to_string();
    }
    let cut: String = raw.chars().take(limit).collect();
    format!("{}{}", cut.trim_end(), ELLIPSIS)
}

/// Escaped-text fallback used when markdown conversion fails outright.
pub fn escaped_fallback(raw: &str) -> String {
    format!("<pre>{}</pre>", html_escape(raw))
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hi\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_inline_html_preserved() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("Before\n\n<div class=\"note\">raw</div>\n\nAfter")
            .unwrap();
        assert!(html.contains("<div class=\"note\">raw</div>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight"));
    }

    #[test]
    fn test_unknown_language_does_not_fail() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```nosuchlang\nxyz\n```").unwrap();
        assert!(html.contains("xyz"));
    }

    #[test]
    fn test_derive_excerpt_short_body() {
        assert_eq!(derive_excerpt("short body", 180), "short body");
    }

    #[test]
    fn test_derive_excerpt_truncates() {
        let raw = "a".repeat(300);
        let excerpt = derive_excerpt(&raw, 180);
        assert!(excerpt.ends_with(ELLIPSIS));
        assert!(excerpt.chars().count() <= 180 + ELLIPSIS.chars().count());
        assert!(raw.starts_with(excerpt.trim_end_matches(ELLIPSIS)));
    }

    #[test]
    fn test_derive_excerpt_multibyte_boundary() {
        let raw = "日本語のテキスト".repeat(40);
        let excerpt = derive_excerpt(&raw, 180);
        assert!(excerpt.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_escaped_fallback() {
        let out = escaped_fallback("<script>alert(1)</script>");
        assert!(out.contains("&lt;script&gt;"));
        assert!(out.starts_with("<pre>"));
    }
}
