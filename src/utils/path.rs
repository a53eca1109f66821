//! Path normalization and URL-path helpers.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Render a relative path as a `/`-separated URL-style key with a leading slash.
///
/// `src\assets\cat.png` and `src/assets/cat.png` both become `/src/assets/cat.png`.
pub fn to_slash_key(rel: &Path) -> String {
    let mut key = String::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            key.push('/');
            key.push_str(&part.to_string_lossy());
        }
    }
    if key.is_empty() {
        key.push('/');
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slash_key() {
        assert_eq!(
            to_slash_key(Path::new("src/assets/posts/images/cat.png")),
            "/src/assets/posts/images/cat.png"
        );
        assert_eq!(to_slash_key(Path::new("./a/b")), "/a/b");
        assert_eq!(to_slash_key(Path::new("")), "/");
    }

    #[test]
    fn test_normalize_path_relative_becomes_absolute() {
        let normalized = normalize_path(Path::new("does-not-exist/file.md"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("does-not-exist/file.md"));
    }
}
