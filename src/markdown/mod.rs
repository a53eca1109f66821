//! Markdown rendering and HTML sanitization for feed item content.

mod render;
mod sanitize;

pub use render::{MarkdownOptions, render_markdown};
pub use sanitize::sanitize_html;

/// Render a markdown body and sanitize the resulting HTML.
pub fn render_safe_html(markdown: &str, options: &MarkdownOptions) -> String {
    sanitize_html(&render_markdown(markdown, options))
}
