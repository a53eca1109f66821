//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "src/content/posts"   # Markdown posts (relative to site root)
//! output = "dist"                 # Output directory (relative to site root)
//! minify = false                  # Minify the feed XML
//! skip_drafts = true              # Leave `draft: true` posts out of the feed
//!
//! [build.feed]
//! enable = true
//! path = "rss.xml"
//! format = "rss"                  # rss | atom
//!
//! [build.images]
//! dir = "src/assets/posts/images"
//!
//! [build.markdown]
//! tables = true
//! footnotes = false
//! ```

mod feed;
mod images;

pub use feed::{FeedConfig, FeedFormat};
pub use images::ImagesConfig;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::markdown::MarkdownOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Markdown posts directory.
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Minify the generated feed.
    pub minify: bool,

    /// Skip draft posts.
    pub skip_drafts: bool,

    /// Remove the output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,

    /// Feed generation settings.
    pub feed: FeedConfig,

    /// Local image set.
    pub images: ImagesConfig,

    /// Markdown extensions.
    pub markdown: MarkdownOptions,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "src/content/posts".into(),
            output: "dist".into(),
            minify: false,
            skip_drafts: true,
            clean: false,
            feed: FeedConfig::default(),
            images: ImagesConfig::default(),
            markdown: MarkdownOptions::default(),
        }
    }
}

impl BuildSectionConfig {
    pub const FEED_PATH: FieldPath = FieldPath::new("build.feed.path");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let feed_path = &self.feed.path;
        if feed_path.is_absolute() || feed_path.file_name().is_none() {
            diag.error_with_hint(
                Self::FEED_PATH,
                format!(
                    "must be a file path relative to the output directory, got `{}`",
                    feed_path.display()
                ),
                "use a path like \"rss.xml\"",
            );
        }

        self.images.validate(diag);
    }
}
