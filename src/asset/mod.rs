//! Local image assets referenced from post front-matter.
//!
//! - `index`: one directory scan into an immutable [`AssetIndex`]
//! - `resolve`: [`ImageResolver`] turning lookup keys into [`ImageMetadata`]
//! - `meta`: metadata types

mod index;
mod meta;
mod resolve;

pub use index::AssetIndex;
pub use meta::{ImageFormat, ImageMetadata};
pub use resolve::ImageResolver;

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while resolving images.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("\"{path}\" does not exist in glob: \"{pattern}\"")]
    NotFound { path: String, pattern: String },

    #[error("failed to read image {}", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to decode image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("image task failed")]
    Join(#[from] tokio::task::JoinError),
}
