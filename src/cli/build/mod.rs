//! Feed build orchestration.
//!
//! Build pipeline phases:
//! - **Collect** - Read posts, drop drafts, check slugs
//! - **Resolve** - Scan the image directory, resolve cover images (async)
//! - **Generate** - Render, sanitize and serialize the feed
//! - **Write** - Prepare output, copy images, write the feed
//!
//! Nothing is written until the feed document has been generated, and the
//! feed file is written last.

mod pipeline;

use anyhow::{Context, Result};

use crate::{
    config::SiteConfig, content::collect_posts, generator::feed::build_feed, log,
    utils::plural_count,
};

/// Build the feed and publish its images.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    if !config.build.feed.enable {
        log!("build"; "feed disabled, nothing to build");
        return Ok(());
    }

    let posts = collect_posts(&config.build).context("failed to collect posts")?;
    if posts.is_empty() {
        log!("warning"; "no posts found in {}", config.build.content.display());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let records = runtime.block_on(pipeline::resolve_records(config, posts))?;

    let xml = build_feed(config, &records)?;

    pipeline::init_output(config)?;
    let images = pipeline::publish_images(config, &records)?;
    let feed_path = pipeline::write_feed(config, &xml)?;

    log!(
        "feed";
        "{} ({}, {})",
        feed_path
            .strip_prefix(config.get_root())
            .unwrap_or(&feed_path)
            .display(),
        plural_count(records.len(), "item"),
        plural_count(images, "image")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn site(root: &Path) -> SiteConfig {
        let mut config = test_parse_config("");
        config.root = root.to_path_buf();
        config.build.content = root.join("src/content/posts");
        config.build.output = root.join("dist");
        fs::create_dir_all(&config.build.content).unwrap();
        fs::create_dir_all(root.join(&config.build.images.dir)).unwrap();
        config
    }

    fn write_post(config: &SiteConfig, name: &str, date: &str, image: &str) {
        let post = format!(
            "---\ntitle: Hello\ndate: {date}\ndescription: First post\nimage: {image}\n---\n\n# Hi\n\nWelcome.\n"
        );
        fs::write(config.build.content.join(name), post).unwrap();
    }

    #[test]
    fn test_build_site_writes_feed_and_images() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());
        image::RgbImage::new(2, 2)
            .save(dir.path().join("src/assets/posts/images/cat.png"))
            .unwrap();
        write_post(&config, "hello-world.md", "2024-01-01", "/src/assets/posts/images/cat.png");
        write_post(&config, "second.md", "2024-01-02", "/src/assets/posts/images/cat.png");

        build_site(&config).unwrap();

        let xml = fs::read_to_string(dir.path().join("dist/rss.xml")).unwrap();
        assert!(xml.contains("https://example.com/blog/hello-world/"));
        assert!(xml.contains("https://example.com/images/cat.png"));
        assert!(dir.path().join("dist/images/cat.png").is_file());
    }

    #[test]
    fn test_build_site_missing_image_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());
        write_post(&config, "a.md", "2024-01-01", "/src/assets/posts/images/missing.png");

        let err = build_site(&config).unwrap_err();
        assert!(format!("{err:#}").contains("does not exist in glob"));
        assert!(!dir.path().join("dist/rss.xml").exists());
    }

    #[test]
    fn test_build_site_invalid_date_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());
        image::RgbImage::new(1, 1)
            .save(dir.path().join("src/assets/posts/images/cat.png"))
            .unwrap();
        write_post(&config, "a.md", "not-a-date", "/src/assets/posts/images/cat.png");

        assert!(build_site(&config).is_err());
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn test_build_site_failed_image_copy_writes_no_feed() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());
        image::RgbImage::new(1, 1)
            .save(dir.path().join("src/assets/posts/images/cat.png"))
            .unwrap();
        write_post(&config, "a.md", "2024-01-01", "/src/assets/posts/images/cat.png");
        // A directory in the way of the copy
        fs::create_dir_all(dir.path().join("dist/images/cat.png")).unwrap();

        let err = build_site(&config).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to copy image"));
        assert!(!dir.path().join("dist/rss.xml").exists());
    }
}
