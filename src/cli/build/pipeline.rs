//! Build pipeline phases.

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use std::{fs, path::PathBuf, sync::Arc};

use crate::{
    asset::{AssetIndex, ImageResolver},
    config::SiteConfig,
    content::{PostRecord, PostSource},
    debug, log,
    utils::plural_count,
};

/// Scan the image directory once and resolve every post's cover image.
pub(super) async fn resolve_records(
    config: &SiteConfig,
    posts: Vec<PostSource>,
) -> Result<Vec<PostRecord>> {
    let index = AssetIndex::scan(&config.build.images, config.get_root())?;
    if index.is_empty() && !posts.is_empty() {
        log!("warning"; "no images found in {}", config.images_dir().display());
    }
    debug!("images"; "indexed {}", plural_count(index.len(), "image"));

    let resolver = ImageResolver::new(Arc::new(index));
    let results = resolver
        .resolve_all(posts.iter().map(|post| post.image.clone()))
        .await;

    posts
        .into_iter()
        .zip(results)
        .map(|(post, result)| {
            let image = result.with_context(|| {
                format!("failed to resolve cover image of {}", post.source.display())
            })?;
            Ok(post.into_record(image))
        })
        .collect()
}

/// Prepare the output directory, wiping it first with `--clean`.
pub(super) fn init_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Write the feed document, returning its path.
pub(super) fn write_feed(config: &SiteConfig, xml: &str) -> Result<PathBuf> {
    let path = config.feed_output_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, xml).with_context(|| format!("Failed to write feed: {}", path.display()))?;
    Ok(path)
}

/// Copy each referenced image to `<output><src>`, once per image.
pub(super) fn publish_images(config: &SiteConfig, records: &[PostRecord]) -> Result<usize> {
    let mut copied = FxHashSet::default();

    for record in records {
        let image = &record.image;
        if !copied.insert(image.src.as_str()) {
            continue;
        }

        let dest = image.output_path(&config.build.output);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&image.path, &dest).with_context(|| {
            format!(
                "Failed to copy image {} to {}",
                image.path.display(),
                dest.display()
            )
        })?;
        debug!(
            "images";
            "{} -> {} ({}x{}, from {})",
            image.path.display(),
            dest.display(),
            image.width,
            image.height,
            record.source.display()
        );
    }

    Ok(copied.len())
}
