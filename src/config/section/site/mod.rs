//! `[site]` section configuration.
//!
//! ```toml
//! [site.info]
//! title = "My Blog"
//! description = "Notes on things"
//! url = "https://example.com"
//! ```

mod info;

pub use info::SiteInfoConfig;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site metadata.
    pub info: SiteInfoConfig,
}
