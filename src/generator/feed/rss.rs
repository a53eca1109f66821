//! RSS 2.0 feed serialization.

use super::{FeedError, FeedItem, GENERATOR};
use crate::config::SiteInfoConfig;
use regex::Regex;
use rss::{
    CategoryBuilder, ChannelBuilder, EnclosureBuilder, GuidBuilder, ItemBuilder,
    validation::Validate,
};
use std::{collections::BTreeMap, sync::LazyLock};

/// Namespace of `<content:encoded>`.
const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Serialize items as an RSS 2.0 channel.
pub fn to_rss_xml(site: &SiteInfoConfig, items: &[FeedItem]) -> Result<String, FeedError> {
    let base_url = site.base_url();
    let items: Vec<_> = items
        .iter()
        .map(|item| item_to_rss(item, site))
        .collect();

    let mut namespaces = BTreeMap::new();
    namespaces.insert("content".to_string(), CONTENT_NAMESPACE.to_string());

    let copyright = (!site.copyright.is_empty()).then(|| site.copyright.clone());

    let channel = ChannelBuilder::default()
        .namespaces(namespaces)
        .title(&site.title)
        .link(base_url)
        .description(&site.description)
        .language(Some(site.language.clone()))
        .copyright(copyright)
        .generator(Some(GENERATOR.to_string()))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| FeedError::Validation(e.to_string()))?;
    Ok(channel.to_string())
}

fn item_to_rss(item: &FeedItem, site: &SiteInfoConfig) -> rss::Item {
    let link = site.absolute_url(&item.link);

    let enclosure = EnclosureBuilder::default()
        .url(site.absolute_url(&item.image.src))
        .length(item.image.length.to_string())
        .mime_type(item.image.mime_type)
        .build();

    let categories: Vec<_> = item
        .categories
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.as_str()).build())
        .collect();

    ItemBuilder::default()
        .title(Some(item.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(Some(item.description.clone()))
        .pub_date(Some(item.pub_date.to_rfc2822()))
        .content(Some(item.content.clone()))
        .categories(categories)
        .author(normalize_rss_author(item.author.as_deref(), site))
        .enclosure(Some(enclosure))
        .build()
}

/// Normalize author field to RSS format: "email (Name)"
fn normalize_rss_author(author: Option<&str>, site: &SiteInfoConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .expect("author pattern is valid")
    });

    let author = author?;
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.to_string());
    }

    if RE_VALID_AUTHOR.is_match(&site.author) {
        return Some(site.author.clone());
    }

    // No address to pair the name with
    if site.email.is_empty() {
        return None;
    }
    let name = if site.author.is_empty() {
        author
    } else {
        site.author.as_str()
    };
    Some(format!("{} ({})", site.email, name))
}
