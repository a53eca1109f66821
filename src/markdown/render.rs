//! Markdown to HTML rendering using pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};
use serde::{Deserialize, Serialize};

/// Options for markdown rendering (`[build.markdown]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Convert quotes and dashes to typographic punctuation
    pub smart_punctuation: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: false,
            strikethrough: true,
            task_lists: false,
            smart_punctuation: false,
        }
    }
}

impl MarkdownOptions {
    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.smart_punctuation {
            opts.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        opts
    }
}

/// Render a markdown body to an HTML string.
///
/// Raw HTML in the body is passed through untouched; run the result through
/// [`sanitize_html`](super::sanitize_html) before publishing it.
pub fn render_markdown(markdown: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(markdown, options.to_pulldown_options());
    let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut output, parser);
    output
}
