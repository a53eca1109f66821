//! Post collection from the content directory.

use super::{
    ContentError, PostSource, extract_frontmatter,
    slug::{normalize_slug, slug_from_path},
};
use crate::{config::BuildSectionConfig, debug, log};
use jwalk::WalkDir;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Result of scanning the content directory.
#[derive(Debug, Default)]
pub struct PostScan {
    /// Published posts, ordered by path relative to the content directory
    pub posts: Vec<PostSource>,
    /// Every problem found, in the same order
    pub errors: Vec<ContentError>,
    /// Number of drafts left out
    pub drafts: usize,
}

impl PostScan {
    /// Fail on the first collected error.
    pub fn into_posts(mut self) -> Result<Vec<PostSource>, ContentError> {
        if self.errors.is_empty() {
            Ok(self.posts)
        } else {
            Err(self.errors.swap_remove(0))
        }
    }
}

/// Collect all `*.md` files under `dir`, sorted by relative path.
///
/// Entries the walk cannot read are returned as errors.
fn collect_markdown_files(dir: &Path) -> (Vec<PathBuf>, Vec<ContentError>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for entry in WalkDir::new(dir) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("md")) {
                    files.push(path);
                }
            }
            Ok(_) => {}
            Err(err) => errors.push(ContentError::Walk {
                path: err.path().unwrap_or(dir).to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    files.sort();
    (files, errors)
}

/// Read and parse one post.
fn parse_post(path: &Path, content_dir: &Path) -> Result<PostSource, ContentError> {
    let content = fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;

    let (meta, body) = extract_frontmatter(&content)
        .map_err(|message| ContentError::Frontmatter {
            path: path.to_path_buf(),
            message,
        })?
        .ok_or_else(|| ContentError::Frontmatter {
            path: path.to_path_buf(),
            message: "no front-matter block".into(),
        })?;

    let relative = path.strip_prefix(content_dir).unwrap_or(path);
    let slug = match meta.slug.as_deref().map(normalize_slug) {
        Some(slug) if !slug.is_empty() => slug,
        _ => slug_from_path(relative),
    };
    if slug.is_empty() {
        return Err(ContentError::EmptySlug {
            path: path.to_path_buf(),
        });
    }

    PostSource::from_meta(path, slug, meta, body)
}

/// Scan the content directory, keeping every error for reporting.
///
/// Drafts are dropped when `build.skip_drafts` is set. Slug collisions
/// between published posts are reported as [`ContentError::DuplicateSlug`].
pub fn scan_posts(build: &BuildSectionConfig) -> Result<PostScan, ContentError> {
    let dir = &build.content;
    if !dir.is_dir() {
        return Err(ContentError::Io(
            dir.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "content directory not found"),
        ));
    }

    let (files, walk_errors) = collect_markdown_files(dir);
    debug!("content"; "found {} markdown files in {}", files.len(), dir.display());

    let parsed: Vec<_> = files.par_iter().map(|path| parse_post(path, dir)).collect();

    let mut scan = PostScan {
        errors: walk_errors,
        ..PostScan::default()
    };
    let mut seen: FxHashMap<String, PathBuf> = FxHashMap::default();

    for result in parsed {
        let post = match result {
            Ok(post) => post,
            Err(err) => {
                scan.errors.push(err);
                continue;
            }
        };

        if post.draft && build.skip_drafts {
            debug!("content"; "skipping draft {}", post.source.display());
            scan.drafts += 1;
            continue;
        }

        if let Some(first) = seen.get(&post.slug) {
            scan.errors.push(ContentError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.clone(),
                second: post.source.clone(),
            });
            continue;
        }

        if !post.extra.is_empty() {
            let mut keys: Vec<_> = post.extra.keys().map(String::as_str).collect();
            keys.sort_unstable();
            debug!("content"; "{}: extra front-matter {}", post.source.display(), keys.join(", "));
        }

        seen.insert(post.slug.clone(), post.source.clone());
        scan.posts.push(post);
    }

    Ok(scan)
}

/// Collect published posts, failing on the first problem.
pub fn collect_posts(build: &BuildSectionConfig) -> Result<Vec<PostSource>, ContentError> {
    let scan = scan_posts(build)?;
    if scan.drafts > 0 {
        log!("content"; "skipped {}", crate::utils::plural_count(scan.drafts, "draft"));
    }
    scan.into_posts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const IMAGE: &str = "/src/assets/posts/images/cat.png";

    fn write_post(dir: &Path, name: &str, frontmatter: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, format!("---\n{frontmatter}\n---\n\n# Body\n")).unwrap();
    }

    fn post_fm(title: &str, extra: &str) -> String {
        format!("title: {title}\ndate: 2024-01-01\ndescription: d\nimage: {IMAGE}\n{extra}")
    }

    fn build_config(dir: &Path) -> BuildSectionConfig {
        BuildSectionConfig {
            content: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_collect_sorted_by_path() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "b.md", &post_fm("B", ""));
        write_post(dir.path(), "a.md", &post_fm("A", ""));
        write_post(dir.path(), "nested/c.md", &post_fm("C", ""));
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let posts = collect_posts(&build_config(dir.path())).unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["a", "b", "nested/c"]);
        assert_eq!(posts[0].body, "# Body\n");
    }

    #[test]
    fn test_slug_override() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "post.md", &post_fm("A", "slug: Hello World"));

        let posts = collect_posts(&build_config(dir.path())).unwrap();
        assert_eq!(posts[0].slug, "hello-world");
    }

    #[test]
    fn test_drafts_skipped_by_default() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a.md", &post_fm("A", "draft: true"));
        write_post(dir.path(), "b.md", &post_fm("B", ""));

        let mut config = build_config(dir.path());
        let scan = scan_posts(&config).unwrap();
        assert_eq!(scan.posts.len(), 1);
        assert_eq!(scan.drafts, 1);

        config.skip_drafts = false;
        assert_eq!(collect_posts(&config).unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_slug() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a.md", &post_fm("A", "slug: same"));
        write_post(dir.path(), "b.md", &post_fm("B", "slug: same"));

        let err = collect_posts(&build_config(dir.path())).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug { ref slug, .. } if slug == "same"));
    }

    #[test]
    fn test_scan_keeps_all_errors() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a.md", "title: A");
        fs::write(dir.path().join("b.md"), "no front-matter").unwrap();
        write_post(dir.path(), "c.md", &post_fm("C", ""));

        let scan = scan_posts(&build_config(dir.path())).unwrap();
        assert_eq!(scan.posts.len(), 1);
        assert_eq!(scan.errors.len(), 2);
        assert!(matches!(scan.errors[0], ContentError::MissingField { field: "date", .. }));
        assert!(matches!(scan.errors[1], ContentError::Frontmatter { .. }));
    }

    #[test]
    fn test_empty_slug_rejected() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "!!.md", &post_fm("A", ""));
        write_post(dir.path(), "c.md", &post_fm("C", "slug: ok"));

        let scan = scan_posts(&build_config(dir.path())).unwrap();
        assert_eq!(scan.posts.len(), 1);
        assert_eq!(scan.errors.len(), 1);
        assert!(matches!(scan.errors[0], ContentError::EmptySlug { .. }));
        assert!(scan.errors[0].path().ends_with("!!.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_errors_reported() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a.md", &post_fm("A", ""));
        let locked = dir.path().join("locked");
        write_post(&locked, "b.md", &post_fm("B", ""));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permissions are not enforced for root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let scan = scan_posts(&build_config(dir.path())).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(scan.posts.len(), 1);
        assert!(
            scan.errors
                .iter()
                .any(|err| matches!(err, ContentError::Walk { path, .. } if path.ends_with("locked")))
        );
    }

    #[test]
    fn test_missing_content_dir() {
        let dir = TempDir::new().unwrap();
        let config = build_config(&dir.path().join("missing"));
        assert!(matches!(scan_posts(&config), Err(ContentError::Io(..))));
    }
}
