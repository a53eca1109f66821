//! Configuration section definitions.
//!
//! Each module corresponds to a section in `quire.toml`:
//!
//! | Module  | TOML Section | Purpose                              |
//! |---------|--------------|--------------------------------------|
//! | `build` | `[build]`    | Paths, feed, images, markdown        |
//! | `site`  | `[site]`     | Site info used by the feed channel   |

pub mod build;
pub mod site;

pub use build::{BuildSectionConfig, FeedConfig, FeedFormat, ImagesConfig};
pub use site::{SiteInfoConfig, SiteSectionConfig};
