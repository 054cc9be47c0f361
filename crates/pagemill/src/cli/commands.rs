//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::matter::MatterStyle;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter by tag (case-insensitive)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Include draft documents
    #[arg(short, long)]
    pub drafts: bool,

    /// Only show documents dated on or after this date (e.g. "2018-02-22")
    #[arg(long, value_name = "DATE")]
    pub since: Option<NaiveDate>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// The document slug to show
    pub slug: String,

    /// Show only the front matter
    #[arg(short, long, conflicts_with = "body_only")]
    pub matter_only: bool,

    /// Show only the body
    #[arg(short, long)]
    pub body_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Tags command arguments.
#[derive(Debug, Args)]
pub struct TagsCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Exit non-zero when lint findings are reported, not only on parse
    /// failures
    #[arg(short, long)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// New command arguments.
#[derive(Debug, Args)]
pub struct NewCommand {
    /// Slug for the new document (becomes `<slug>.md` under the content root)
    pub slug: String,

    /// Title for the new document (defaults to the slug, title-cased)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Front matter style
    #[arg(short, long, value_enum)]
    pub style: Option<MatterStyleArg>,

    /// Mark the new document as a draft
    #[arg(short, long)]
    pub draft: bool,

    /// Tags for the new document (repeatable)
    #[arg(long, value_name = "TAG")]
    pub tag: Vec<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Front matter style argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatterStyleArg {
    /// YAML front matter fenced by `---`
    Yaml,
    /// TOML front matter fenced by `+++`
    Toml,
}

impl From<MatterStyleArg> for MatterStyle {
    fn from(arg: MatterStyleArg) -> Self {
        match arg {
            MatterStyleArg::Yaml => Self::Yaml,
            MatterStyleArg::Toml => Self::Toml,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
