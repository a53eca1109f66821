//! Feed generation (RSS, Atom).
//!
//! Post records are mapped into [`FeedItem`]s in parallel, then serialized:
//!
//! - **RSS 2.0**: default format (`rss.xml`)
//! - **Atom 1.0**: `build.feed.format = "atom"`

mod atom;
mod item;
mod rss;

pub use item::{FeedItem, build_items};

use super::minify_xml;
use crate::{config::FeedFormat, config::SiteConfig, content::PostRecord};
use thiserror::Error;

/// Value of the feed `generator` element.
const GENERATOR: &str = concat!("quire ", env!("CARGO_PKG_VERSION"));

/// Errors raised while building a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("post `{slug}` has an invalid date `{value}`")]
    InvalidDate { slug: String, value: String },

    #[error("timestamp `{0}` cannot be represented in the feed")]
    InvalidTimestamp(String),

    #[error("RSS validation failed: {0}")]
    Validation(String),
}

/// Build the feed document for `records`, in input order.
///
/// Pure: the caller writes the returned XML.
pub fn build_feed(config: &SiteConfig, records: &[PostRecord]) -> Result<String, FeedError> {
    let items = build_items(records, &config.build.markdown)?;

    let xml = match config.build.feed.format {
        FeedFormat::Rss => rss::to_rss_xml(&config.site.info, &items)?,
        FeedFormat::Atom => atom::to_atom_xml(&config.site.info, &config.build.feed, &items)?,
    };

    Ok(minify_xml(&xml, config.build.minify).into_owned())
}
