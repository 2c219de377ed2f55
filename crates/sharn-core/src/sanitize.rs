//! Markdown to sanitized HTML
//!
//! Author-supplied descriptions are rendered with pulldown-cmark and then
//! cleaned by ammonia before they reach the page. Both stages sit behind
//! [`TextRenderer`] so the pair can be replaced as a unit.

use pulldown_cmark::{Options, Parser, html};

/// Converts author text into HTML that is safe to insert into the page
pub trait TextRenderer {
    /// Render markdown and strip anything that could execute script
    fn to_safe_html(&self, markdown: &str) -> String;

    /// Escape plain text (names, labels) for insertion as HTML
    fn escape_text(&self, text: &str) -> String {
        html_escape(text)
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Default renderer: CommonMark with tables and strikethrough, then ammonia
pub struct MarkdownSanitizer {
    options: Options,
    cleaner: ammonia::Builder<'static>,
}

impl MarkdownSanitizer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        Self {
            options,
            cleaner: ammonia::Builder::default(),
        }
    }

    fn markdown_to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }
}

impl Default for MarkdownSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer for MarkdownSanitizer {
    fn to_safe_html(&self, markdown: &str) -> String {
        if markdown.trim().is_empty() {
            return String::new();
        }
        let raw = self.markdown_to_html(markdown);
        self.cleaner.clean(&raw).to_string()
    }
}

/// Render markdown with the default sanitizer
pub fn to_safe_html(markdown: &str) -> String {
    MarkdownSanitizer::new().to_safe_html(markdown)
}
