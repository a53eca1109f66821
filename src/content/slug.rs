//! URL slugs for posts.

use std::path::{Component, Path};

/// Slugify one path segment: lowercase, dash-separated, URL-safe.
///
/// Unicode letters are kept; anything that is not alphanumeric becomes a
/// single `-`, and leading/trailing dashes are trimmed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug for a post at `relative` (path under the content directory).
///
/// `posts/Hello World.md` becomes `posts/hello-world`.
pub fn slug_from_path(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    without_ext
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(slugify(&segment.to_string_lossy())),
            _ => None,
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize a front-matter slug override: trim slashes, slugify each segment.
pub fn normalize_slug(slug: &str) -> String {
    slug.split('/')
        .map(slugify)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
