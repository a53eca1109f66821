//! Post validation command: dates and cover images, no output written.

mod report;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::{
    asset::{AssetIndex, ImageResolver},
    config::SiteConfig,
    content::scan_posts,
    log,
    utils::{date::DateTimeUtc, plural_count},
};

use report::ValidationReport;

/// Validate every post, printing a grouped report.
pub fn validate_site(config: &SiteConfig) -> Result<()> {
    let report = build_report(config)?;

    report.print();
    if report.has_errors() {
        eprintln!();
        bail!(
            "validation failed: {}",
            plural_count(report.error_count(), "error")
        );
    }

    log!("validate"; "{}", report);
    Ok(())
}

/// Collect every problem without stopping at the first one.
fn build_report(config: &SiteConfig) -> Result<ValidationReport> {
    let root = config.get_root();
    let scan = scan_posts(&config.build)?;
    let mut report = ValidationReport::default();

    log!("validate"; "validating {}", plural_count(scan.posts.len(), "post"));

    for err in &scan.errors {
        report.add_post(display_path(err.path(), root), err.to_string(), String::new());
    }

    for post in &scan.posts {
        if DateTimeUtc::parse(&post.date).is_none() {
            report.add_date(
                display_path(&post.source, root),
                format!("`{}`", post.date),
                "is not a valid date".to_string(),
            );
        }
    }

    let index = AssetIndex::scan(&config.build.images, root)?;
    let resolver = ImageResolver::new(Arc::new(index));
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let results = runtime.block_on(
        resolver.resolve_all(scan.posts.iter().map(|post| post.image.clone())),
    );

    for (post, result) in scan.posts.iter().zip(results) {
        if let Err(err) = result {
            report.add_image(
                display_path(&post.source, root),
                format!("`{}`", post.image),
                err.to_string(),
            );
        }
    }

    Ok(report)
}

/// Path relative to the site root, for display.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
