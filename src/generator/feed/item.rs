//! Post record to feed item mapping.

use super::FeedError;
use crate::{
    content::PostRecord,
    markdown::{MarkdownOptions, render_safe_html},
    utils::date::DateTimeUtc,
};
use rayon::prelude::*;

/// Image attached to an item as an enclosure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEnclosure {
    /// Public URL path, e.g. `/images/cat.png`
    pub src: String,
    pub mime_type: &'static str,
    /// Byte length
    pub length: u64,
}

/// One syndication entry.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub pub_date: DateTimeUtc,
    pub description: String,
    /// Site-relative link: `/blog/<slug>/`
    pub link: String,
    /// Sanitized HTML rendered from the post body
    pub content: String,
    pub image: ImageEnclosure,
    pub author: Option<String>,
    pub categories: Vec<String>,
}

impl FeedItem {
    pub fn from_record(record: &PostRecord, options: &MarkdownOptions) -> Result<Self, FeedError> {
        let pub_date = DateTimeUtc::parse(&record.date).ok_or_else(|| FeedError::InvalidDate {
            slug: record.slug.clone(),
            value: record.date.clone(),
        })?;

        Ok(Self {
            title: record.title.clone(),
            pub_date,
            description: record.description.clone(),
            link: post_link(&record.slug),
            content: render_safe_html(&record.body, options),
            image: ImageEnclosure {
                src: record.image.src.clone(),
                mime_type: record.image.format.mime_type(),
                length: record.image.size,
            },
            author: record.author.clone(),
            categories: record.tags.clone(),
        })
    }
}

/// Link for a post slug.
#[inline]
pub fn post_link(slug: &str) -> String {
    format!("/blog/{slug}/")
}

/// Map every record in parallel, keeping input order.
pub fn build_items(
    records: &[PostRecord],
    options: &MarkdownOptions,
) -> Result<Vec<FeedItem>, FeedError> {
    records
        .par_iter()
        .map(|record| FeedItem::from_record(record, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::feed::tests::record;

    #[test]
    fn test_from_record_reference_post() {
        let item = FeedItem::from_record(
            &record("hello-world", "2024-01-01", "# Hi\n\nWelcome."),
            &MarkdownOptions::default(),
        )
        .unwrap();

        assert_eq!(item.link, "/blog/hello-world/");
        assert_eq!(item.pub_date.to_rfc3339(), "2024-01-01T00:00:00Z");
        assert_eq!(item.content, "<h1>Hi</h1>\n<p>Welcome.</p>\n");
        assert_eq!(item.title, "Hello");
        assert_eq!(item.description, "First post");
        assert_eq!(item.image.src, "/images/cat.png");
        assert_eq!(item.image.mime_type, "image/png");
    }

    #[test]
    fn test_from_record_invalid_date() {
        let err = FeedItem::from_record(
            &record("bad", "someday", "body"),
            &MarkdownOptions::default(),
        )
        .unwrap_err();
        let FeedError::InvalidDate { slug, value } = err else {
            panic!("expected InvalidDate");
        };
        assert_eq!(slug, "bad");
        assert_eq!(value, "someday");
    }

    #[test]
    fn test_link_is_not_escaped() {
        assert_eq!(post_link("2024/notes & more"), "/blog/2024/notes & more/");
    }

    #[test]
    fn test_build_items_keeps_order() {
        let records: Vec<_> = (0..32)
            .map(|i| record(&format!("post-{i}"), "2024-03-01", "text"))
            .collect();
        let items = build_items(&records, &MarkdownOptions::default()).unwrap();

        assert_eq!(items.len(), records.len());
        for (item, record) in items.iter().zip(&records) {
            assert_eq!(item.link, format!("/blog/{}/", record.slug));
        }
    }

    #[test]
    fn test_build_items_stops_on_invalid_date() {
        let records = vec![
            record("ok", "2024-01-01", "a"),
            record("broken", "2024-13-01", "b"),
        ];
        let err = build_items(&records, &MarkdownOptions::default()).unwrap_err();
        assert!(matches!(err, FeedError::InvalidDate { ref slug, .. } if slug == "broken"));
    }

    #[test]
    fn test_script_never_reaches_content() {
        let item = FeedItem::from_record(
            &record("x", "2024-01-01", "Hi\n\n<script>alert(1)</script>\n"),
            &MarkdownOptions::default(),
        )
        .unwrap();
        assert!(!item.content.contains("script"));
    }
}
