//! Command-line interface definitions.

use crate::config::FeedFormat;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Quire: feed builder for Markdown blogs
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Posts directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: quire.toml)
    #[arg(short = 'C', long, default_value = "quire.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the feed and publish referenced images
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Check post dates and image references without writing anything
    #[command(visible_alias = "v")]
    Validate {
        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },
}

/// Build command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Minify the feed XML
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Feed format to generate
    #[arg(short, long, value_enum)]
    pub format: Option<FeedFormat>,

    /// Include draft posts
    #[arg(short, long)]
    pub drafts: bool,

    /// Override site URL for deployment.
    ///
    /// Item links in the feed are made absolute against this URL.
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_defaults() {
        let cli = Cli::parse_from(["quire", "build"]);
        assert_eq!(cli.config, PathBuf::from("quire.toml"));
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build command");
        };
        assert!(!build_args.clean);
        assert!(build_args.minify.is_none());
        assert!(build_args.format.is_none());
    }

    #[test]
    fn test_parse_validate_alias() {
        let cli = Cli::parse_from(["quire", "-C", "site/quire.toml", "v", "--verbose"]);
        assert_eq!(cli.config, PathBuf::from("site/quire.toml"));
        assert!(matches!(cli.command, Commands::Validate { verbose: true }));
    }
}
