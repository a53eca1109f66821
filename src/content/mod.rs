//! Blog posts: discovery, front-matter and slugs.

mod collect;
mod meta;
mod post;
mod slug;

pub use collect::{collect_posts, scan_posts};
pub use meta::{PostMeta, extract_frontmatter};
pub use post::{PostRecord, PostSource};

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while reading posts.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("invalid front-matter in {}: {message}", path.display())]
    Frontmatter { path: PathBuf, message: String },

    #[error("{}: missing required field `{field}`", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{}: slug is empty, set `slug` in the front-matter", path.display())]
    EmptySlug { path: PathBuf },

    #[error("duplicate slug `{slug}` ({} and {})", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl ContentError {
    /// File the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io(path, _) => path,
            Self::Walk { path, .. }
            | Self::Frontmatter { path, .. }
            | Self::MissingField { path, .. }
            | Self::EmptySlug { path } => path,
            Self::DuplicateSlug { second, .. } => second,
        }
    }
}
