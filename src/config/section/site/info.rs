//! `[site.info]` configuration.
//!
//! Basic site information used for the feed channel: title, description,
//! url, language and author.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Site metadata for feed generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title, used as the feed title.
    pub title: String,

    /// Site description, used as the feed description.
    pub description: String,

    /// Site URL (e.g., "https://example.com"). Item links are resolved against it.
    pub url: Option<String>,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,

    /// Author name.
    pub author: String,

    /// Author email.
    pub email: String,

    /// Copyright notice.
    pub copyright: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
            author: String::new(),
            email: String::new(),
            copyright: String::new(),
        }
    }
}

impl SiteInfoConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.info.title");
    pub const DESCRIPTION: FieldPath = FieldPath::new("site.info.description");
    pub const URL: FieldPath = FieldPath::new("site.info.url");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `feed_enabled`, `title`, `description` and `url` must be set
    /// - `url` must be a valid http(s) URL with a host
    pub fn validate(&self, feed_enabled: bool, diag: &mut ConfigDiagnostics) {
        if feed_enabled {
            if self.title.trim().is_empty() {
                diag.error_with_hint(
                    Self::TITLE,
                    "feed is enabled but the site title is empty",
                    format!("set {}, e.g.: \"My Blog\"", Self::TITLE),
                );
            }
            if self.description.trim().is_empty() {
                diag.error_with_hint(
                    Self::DESCRIPTION,
                    "feed is enabled but the site description is empty",
                    format!("set {}", Self::DESCRIPTION),
                );
            }
            if self.url.is_none() {
                diag.error_with_hint(
                    Self::URL,
                    "feed is enabled but the site url is not configured",
                    format!("set {}, e.g.: \"https://example.com\"", Self::URL),
                );
            }
        }

        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::URL,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }
    }

    /// Site URL without trailing slash, or an empty string.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    /// Resolve a site-relative link against the site URL.
    ///
    /// Root-relative links replace the URL's path. Without a usable site URL
    /// the link is returned as is.
    pub fn absolute_url(&self, link: &str) -> String {
        self.url
            .as_deref()
            .and_then(|base| url::Url::parse(base).ok())
            .and_then(|base| base.join(link).ok())
            .map_or_else(|| link.to_string(), String::from)
    }
}
