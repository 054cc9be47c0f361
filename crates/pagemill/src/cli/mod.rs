//! Command-line interface for pagemill.
//!
//! This module provides the CLI structure and command handlers for the
//! `pmill` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CheckCommand, ConfigCommand, ListCommand, MatterStyleArg, NewCommand, OutputFormat,
    ShowCommand, TagsCommand,
};

/// pmill - Work with front-matter-annotated Markdown content
///
/// A toolkit for content trees where every document carries a YAML or TOML
/// front matter block: list and inspect documents, check publishing
/// conventions, and scaffold new pages.
#[derive(Debug, Parser)]
#[command(name = "pmill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory of the content tree (overrides configuration)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List documents in the content tree
    List(ListCommand),

    /// Show a single document
    Show(ShowCommand),

    /// List tags and how many documents carry each
    Tags(TagsCommand),

    /// Check the content tree against publishing conventions
    Check(CheckCommand),

    /// Create a new document with scaffolded front matter
    New(NewCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
