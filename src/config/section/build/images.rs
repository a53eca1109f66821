//! `[build.images]` configuration: the local image set posts may reference.
//!
//! ```toml
//! [build.images]
//! dir = "src/assets/posts/images"          # scanned once per build (not recursive)
//! extensions = ["jpeg", "jpg", "png", "gif"]
//! url_prefix = "/images"                   # public URL prefix for copied images
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::path::to_slash_key;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extensions the image decoder can read metadata from.
const SUPPORTED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Image directory, relative to the site root.
    pub dir: PathBuf,
    /// Accepted file extensions (case-insensitive).
    pub extensions: Vec<String>,
    /// Public URL prefix images are published under.
    pub url_prefix: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: "src/assets/posts/images".into(),
            extensions: SUPPORTED_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
            url_prefix: "/images".into(),
        }
    }
}

impl ImagesConfig {
    pub const DIR: FieldPath = FieldPath::new("build.images.dir");
    pub const EXTENSIONS: FieldPath = FieldPath::new("build.images.extensions");
    pub const URL_PREFIX: FieldPath = FieldPath::new("build.images.url_prefix");

    /// Glob-style description of the image set, e.g.
    /// `/src/assets/posts/images/*.{jpeg,jpg,png,gif}`.
    pub fn pattern(&self) -> String {
        let dir = to_slash_key(&self.dir);
        let dir = dir.trim_end_matches('/');
        format!("{}/*.{{{}}}", dir, self.extensions.join(","))
    }

    /// Check whether `path` has one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Public URL for an image file name.
    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix.trim_end_matches('/'), file_name)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.dir.is_absolute() {
            diag.error_with_hint(
                Self::DIR,
                format!("must be relative to the site root, got `{}`", self.dir.display()),
                "use a path like \"src/assets/posts/images\"",
            );
        }

        if self.extensions.is_empty() {
            diag.error(Self::EXTENSIONS, "at least one extension is required");
        }
        for ext in &self.extensions {
            if !SUPPORTED_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)) {
                diag.error_with_hint(
                    Self::EXTENSIONS,
                    format!("unsupported image extension `{ext}`"),
                    format!("supported: {}", SUPPORTED_EXTENSIONS.join(", ")),
                );
            }
        }

        if !self.url_prefix.starts_with('/') {
            diag.error_with_hint(
                Self::URL_PREFIX,
                format!("must start with `/`, got `{}`", self.url_prefix),
                "use a prefix like \"/images\"",
            );
        }
    }
}
