//! Atom 1.0 feed serialization.

use super::{FeedError, FeedItem, GENERATOR};
use crate::{
    config::{FeedConfig, SiteInfoConfig},
    utils::date::DateTimeUtc,
};
use atom_syndication::{
    CategoryBuilder, ContentBuilder, Entry, EntryBuilder, FeedBuilder, FixedDateTime,
    GeneratorBuilder, Link, LinkBuilder, Person, PersonBuilder, Text,
};

/// Serialize items as an Atom 1.0 feed.
pub fn to_atom_xml(
    site: &SiteInfoConfig,
    feed: &FeedConfig,
    items: &[FeedItem],
) -> Result<String, FeedError> {
    let base_url = site.base_url();

    let entries = items
        .iter()
        .map(|item| item_to_atom_entry(item, site))
        .collect::<Result<Vec<_>, _>>()?;

    // Newest entry, or the epoch for an empty feed
    let newest = items
        .iter()
        .map(|item| item.pub_date)
        .max()
        .unwrap_or(DateTimeUtc::from_ymd(1970, 1, 1));
    let updated = to_fixed(newest)?;

    let authors: Vec<Person> = if site.author.is_empty() {
        Vec::new()
    } else {
        let email = (!site.email.is_empty()).then(|| site.email.clone());
        vec![
            PersonBuilder::default()
                .name(site.author.clone())
                .email(email)
                .build(),
        ]
    };

    let self_link: Link = LinkBuilder::default()
        .href(format!("{}/{}", base_url, feed.path.display()))
        .rel("self".to_string())
        .mime_type(Some("application/atom+xml".to_string()))
        .build();

    let alternate_link: Link = LinkBuilder::default()
        .href(base_url.to_string())
        .rel("alternate".to_string())
        .build();

    let rights = (!site.copyright.is_empty()).then(|| Text::plain(site.copyright.clone()));

    let atom = FeedBuilder::default()
        .title(Text::plain(site.title.clone()))
        .id(base_url)
        .updated(updated)
        .authors(authors)
        .links(vec![self_link, alternate_link])
        .subtitle(Some(Text::plain(site.description.clone())))
        .rights(rights)
        .generator(Some(GeneratorBuilder::default().value(GENERATOR).build()))
        .lang(Some(site.language.clone()))
        .entries(entries)
        .build();

    Ok(atom.to_string())
}

fn to_fixed(date: DateTimeUtc) -> Result<FixedDateTime, FeedError> {
    let value = date.to_rfc3339();
    value.parse().map_err(|_| FeedError::InvalidTimestamp(value))
}

fn item_to_atom_entry(item: &FeedItem, site: &SiteInfoConfig) -> Result<Entry, FeedError> {
    let updated = to_fixed(item.pub_date)?;
    let link = site.absolute_url(&item.link);

    let alternate: Link = LinkBuilder::default()
        .href(&link)
        .rel("alternate".to_string())
        .build();

    let enclosure: Link = LinkBuilder::default()
        .href(site.absolute_url(&item.image.src))
        .rel("enclosure".to_string())
        .mime_type(Some(item.image.mime_type.to_string()))
        .length(Some(item.image.length.to_string()))
        .build();

    let authors: Vec<Person> = item
        .author
        .as_ref()
        .map(|name| vec![PersonBuilder::default().name(name.clone()).build()])
        .unwrap_or_default();

    let categories = item
        .categories
        .iter()
        .map(|tag| CategoryBuilder::default().term(tag.clone()).build())
        .collect::<Vec<_>>();

    let content = ContentBuilder::default()
        .content_type(Some("html".to_string()))
        .value(Some(item.content.clone()))
        .build();

    Ok(EntryBuilder::default()
        .title(Text::plain(item.title.clone()))
        .id(&link)
        .updated(updated)
        .published(Some(updated))
        .links(vec![alternate, enclosure])
        .summary(Some(Text::plain(item.description.clone())))
        .content(Some(content))
        .authors(authors)
        .categories(categories)
        .build())
}
