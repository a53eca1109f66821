//! Site configuration management for `quire.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build/     # [build], [build.feed], [build.images], [build.markdown]
//! │   └── site/      # [site.info]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # Config file lookup
//! └── mod.rs         # SiteConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BuildSectionConfig, FeedConfig, FeedFormat, ImagesConfig, SiteInfoConfig, SiteSectionConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing quire.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site information
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = find_config_file(&cli.config)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored: {}", display_path, fields.join(", "));
    }

    /// Finalize configuration after loading: apply CLI options, resolve paths.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.apply_command_options(cli);
        self.normalize_paths(&root, cli);
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute image directory.
    pub fn images_dir(&self) -> PathBuf {
        self.root_join(&self.build.images.dir)
    }

    /// Absolute path the feed is written to.
    pub fn feed_output_path(&self) -> PathBuf {
        self.build.output.join(&self.build.feed.path)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Validate { verbose } => crate::logger::set_verbose(*verbose),
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.feed.format, args.format.as_ref());
        self.build.clean = args.clean;
        if args.drafts {
            self.build.skip_drafts = false;
        }

        // Override site URL if provided via CLI
        if let Some(ref url) = args.site_url {
            self.site.info.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize content/output paths relative to the root directory.
    ///
    /// `build.images.dir` stays relative: it is part of every image lookup key.
    fn normalize_paths(&mut self, root: &Path, cli: &Cli) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = normalize_path(root);
        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors before failing.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.info.validate(self.build.feed.enable, &mut diag);
        self.build.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site.info]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!(
        "[site.info]\ntitle = \"Test\"\ndescription = \"Test\"\nurl = \"https://example.com\"\n{extra}"
    );
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[site\ntitle = \"My Blog\"").is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.info.title, "");
        assert_eq!(config.site.info.language, "en");
        assert!(config.build.feed.enable);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site.info]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.info.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_validate_reports_all_errors() {
        let config = SiteConfig::from_str("[build.images]\nextensions = []").unwrap();
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        // title, description, url and extensions
        assert_eq!(diag.errors().len(), 4);
    }

    #[test]
    fn test_validate_ok_with_required_fields() {
        let config = test_parse_config("");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_finalize_applies_cli_and_root() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from([
            "quire",
            "--output",
            "public",
            "build",
            "--minify",
            "--format",
            "atom",
            "--site-url",
            "https://blog.example.org",
            "--drafts",
        ]);

        let mut config = test_parse_config("");
        config.config_path = dir.path().join("quire.toml");
        config.finalize(&cli);

        let root = normalize_path(dir.path());
        assert_eq!(config.get_root(), root.as_path());
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.build.content, root.join("src/content/posts"));
        assert_eq!(config.images_dir(), root.join("src/assets/posts/images"));
        assert_eq!(config.feed_output_path(), root.join("public/rss.xml"));
        assert!(config.build.minify);
        assert!(!config.build.skip_drafts);
        assert_eq!(config.build.feed.format, FeedFormat::Atom);
        assert_eq!(config.site.info.url.as_deref(), Some("https://blog.example.org"));
    }
}
