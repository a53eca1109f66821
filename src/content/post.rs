//! Post types: parsed sources and resolved records.

use super::{ContentError, PostMeta};
use crate::asset::ImageMetadata;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// A parsed post whose cover image has not been resolved yet.
#[derive(Debug, Clone)]
pub struct PostSource {
    /// Markdown file the post was read from
    pub source: PathBuf,
    pub slug: String,
    pub title: String,
    pub date: String,
    pub description: String,
    /// Image lookup key, e.g. `/src/assets/posts/images/cat.png`
    pub image: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub draft: bool,
    pub extra: FxHashMap<String, serde_json::Value>,
    /// Raw Markdown body
    pub body: String,
}

impl PostSource {
    /// Build from parsed front-matter, checking required fields.
    pub fn from_meta(
        source: &Path,
        slug: String,
        meta: PostMeta,
        body: &str,
    ) -> Result<Self, ContentError> {
        let require = |value: Option<String>, field: &'static str| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ContentError::MissingField {
                    path: source.to_path_buf(),
                    field,
                })
        };

        Ok(Self {
            title: require(meta.title, "title")?,
            date: require(meta.date, "date")?,
            description: require(meta.description, "description")?,
            image: require(meta.image, "image")?,
            source: source.to_path_buf(),
            slug,
            author: meta.author.filter(|a| !a.trim().is_empty()),
            tags: meta.tags,
            draft: meta.draft,
            extra: meta.extra,
            body: body.to_string(),
        })
    }

    /// Attach the resolved cover image.
    pub fn into_record(self, image: ImageMetadata) -> PostRecord {
        PostRecord {
            title: self.title,
            date: self.date,
            description: self.description,
            slug: self.slug,
            body: self.body,
            image,
            author: self.author,
            tags: self.tags,
            source: self.source,
        }
    }
}

/// A post ready for the feed.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub title: String,
    /// Raw date string from front-matter
    pub date: String,
    pub description: String,
    /// Unique across the collection
    pub slug: String,
    /// Raw Markdown body
    pub body: String,
    pub image: ImageMetadata,
    pub author: Option<String>,
    pub tags: Vec<String>,
    /// Markdown file the post was read from
    pub source: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(title: Option<&str>, image: Option<&str>) -> PostMeta {
        PostMeta {
            title: title.map(str::to_string),
            date: Some("2024-01-01".into()),
            description: Some("First post".into()),
            image: image.map(str::to_string),
            author: Some("  ".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_meta_ok() {
        let post = PostSource::from_meta(
            Path::new("/posts/hello.md"),
            "hello".into(),
            meta(Some("Hello"), Some("/src/assets/posts/images/cat.png")),
            "# Hi",
        )
        .unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.image, "/src/assets/posts/images/cat.png");
        assert_eq!(post.body, "# Hi");
        assert!(post.author.is_none());
    }

    #[test]
    fn test_from_meta_missing_field() {
        let err = PostSource::from_meta(
            Path::new("/posts/hello.md"),
            "hello".into(),
            meta(Some("Hello"), None),
            "",
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "image", .. }));

        let err = PostSource::from_meta(
            Path::new("/posts/hello.md"),
            "hello".into(),
            meta(Some(" "), Some("x")),
            "",
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "title", .. }));
    }
}
