//! `pagemill` - A toolkit for front-matter-annotated Markdown content
//!
//! This library provides the core functionality for parsing, querying, and
//! checking trees of Markdown documents whose metadata lives in a leading
//! YAML (`---`) or TOML (`+++`) front matter block.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod lint;
pub mod logging;
pub mod matter;
pub mod store;

pub use config::Config;
pub use document::{Document, FrontMatter};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use matter::{MatterStyle, MetaValue};
pub use store::{ContentStore, ListQuery};
