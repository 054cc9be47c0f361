//! Error types for pagemill.
//!
//! This module defines all error types used throughout the pagemill crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::matter::MatterStyle;

/// The main error type for pagemill operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Front Matter Errors ===
    /// The document does not start with a front matter delimiter.
    #[error("document has no front matter block")]
    MissingFrontMatter,

    /// The front matter block is opened but never closed.
    #[error("front matter opened with '{fence}' is never closed", fence = .style.fence())]
    UnclosedFrontMatter {
        /// The delimiter style that opened the block.
        style: MatterStyle,
    },

    /// A metadata key appears more than once in the front matter block.
    #[error("duplicate front matter key: {key}")]
    DuplicateKey {
        /// The offending key.
        key: String,
    },

    /// A date value could not be parsed in any accepted form.
    #[error("unparsable date: {value}")]
    InvalidDate {
        /// The raw date value.
        value: String,
    },

    /// The front matter block is structurally invalid.
    #[error("invalid front matter: {message}")]
    InvalidFrontMatter {
        /// Description of the structural problem.
        message: String,
    },

    /// YAML front matter failed to parse.
    #[error("YAML front matter error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML front matter failed to parse.
    #[error("TOML front matter error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML front matter failed to serialize.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // === Store Errors ===
    /// The content root directory does not exist.
    #[error("content root not found: {path}")]
    ContentRootMissing {
        /// Path that was expected to be the content root.
        path: PathBuf,
    },

    /// A document file could not be read.
    #[error("failed to read document at {path}: {source}")]
    DocumentRead {
        /// Path to the document file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// No document with the requested slug exists in the store.
    #[error("no document with slug '{0}'")]
    NotFound(String),

    /// A document already exists at the target path.
    #[error("document already exists at {path}")]
    DocumentExists {
        /// Path to the existing document.
        path: PathBuf,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for pagemill operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate key error.
    #[must_use]
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Create an unparsable date error.
    #[must_use]
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Create a structural front matter error.
    #[must_use]
    pub fn invalid_front_matter(message: impl Into<String>) -> Self {
        Self::InvalidFrontMatter {
            message: message.into(),
        }
    }

    /// Create a not found error for a slug.
    #[must_use]
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound(slug.into())
    }

    /// Check if this error indicates a missing document.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error came from parsing a document's front matter.
    #[must_use]
    pub fn is_front_matter_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFrontMatter
                | Self::UnclosedFrontMatter { .. }
                | Self::DuplicateKey { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidFrontMatter { .. }
                | Self::Yaml(_)
                | Self::Toml(_)
        )
    }
}
