//! Content store for pagemill.
//!
//! This module provides file-backed document storage: discovery of
//! candidate files under a content root, per-file parsing, and the
//! listing, lookup, and grouping queries a site's content pipeline
//! needs. Each document is read to completion independently; a file
//! that fails to parse is recorded as a failure without aborting the
//! scan.

pub mod scan;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::document::Document;
use crate::error::{Error, Result};

pub use scan::discover_files;

/// A file that could not be parsed during a scan.
#[derive(Debug)]
pub struct ScanFailure {
    /// Path to the offending file.
    pub path: PathBuf,
    /// The parse or read error.
    pub error: Error,
}

/// Query parameters for a listing.
///
/// The default query is the published listing: drafts excluded, no
/// filters, no limit.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Include documents with the draft flag set.
    pub include_drafts: bool,

    /// Only documents carrying this tag (case-insensitive).
    pub tag: Option<String>,

    /// Only documents dated at or after this instant. Undated documents
    /// never match when set.
    pub since: Option<DateTime<Utc>>,

    /// Maximum number of results.
    pub limit: Option<usize>,
}

/// A tag label with the number of documents carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    /// The tag label as written in the content.
    pub tag: String,
    /// Number of documents carrying the tag.
    pub count: usize,
}

/// Aggregate statistics about a content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Total number of parsed documents.
    pub document_count: usize,
    /// Number of documents with the draft flag set.
    pub draft_count: usize,
    /// Number of distinct tag labels.
    pub tag_count: usize,
    /// Number of files that failed to parse.
    pub failure_count: usize,
    /// Date of the newest dated document.
    pub newest: Option<DateTime<Utc>>,
    /// Date of the oldest dated document.
    pub oldest: Option<DateTime<Utc>>,
}

/// A content store over a directory of documents.
#[derive(Debug)]
pub struct ContentStore {
    /// The content root directory.
    root: PathBuf,
    /// Successfully parsed documents, in discovery order.
    documents: Vec<Document>,
    /// Files that failed to read or parse.
    failures: Vec<ScanFailure>,
}

impl ContentStore {
    /// Open a content store by scanning the given root directory.
    ///
    /// Every candidate file is read to completion and parsed; parse
    /// failures are collected per file and never abort the scan.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or a directory
    /// cannot be read.
    pub fn open(root: impl AsRef<Path>, extensions: &[String]) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        debug!("Scanning content root {}", root.display());

        let files = discover_files(&root, extensions)?;

        let mut documents = Vec::new();
        let mut failures = Vec::new();
        for path in files {
            match load_document(&path) {
                Ok(document) => {
                    debug!("Parsed {} as '{}'", path.display(), document.slug);
                    documents.push(document);
                }
                Err(error) => {
                    warn!("Failed to parse {}: {}", path.display(), error);
                    failures.push(ScanFailure { path, error });
                }
            }
        }

        info!(
            "Loaded {} documents from {} ({} failures)",
            documents.len(),
            root.display(),
            failures.len()
        );
        Ok(Self {
            root,
            documents,
            failures,
        })
    }

    /// The content root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All successfully parsed documents, in discovery order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Files that failed to read or parse during the scan.
    #[must_use]
    pub fn failures(&self) -> &[ScanFailure] {
        &self.failures
    }

    /// Number of parsed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no parsed documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Fetch a document by slug.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no document has the slug.
    pub fn get(&self, slug: &str) -> Result<&Document> {
        self.documents
            .iter()
            .find(|doc| doc.slug == slug)
            .ok_or_else(|| Error::not_found(slug))
    }

    /// List documents matching the query, newest first.
    ///
    /// Undated documents sort after dated ones, alphabetically by slug.
    #[must_use]
    pub fn list(&self, query: &ListQuery) -> Vec<&Document> {
        let mut results: Vec<&Document> = self
            .documents
            .iter()
            .filter(|doc| query.include_drafts || !doc.is_draft())
            .filter(|doc| query.tag.as_ref().map_or(true, |tag| doc.has_tag(tag)))
            .filter(|doc| {
                query.since.map_or(true, |since| {
                    doc.front_matter.date.is_some_and(|date| date >= since)
                })
            })
            .collect();

        results.sort_by(|a, b| {
            match (b.front_matter.date, a.front_matter.date) {
                (Some(b_date), Some(a_date)) => {
                    b_date.cmp(&a_date).then_with(|| a.slug.cmp(&b.slug))
                }
                (Some(_), None) => std::cmp::Ordering::Greater,
                (None, Some(_)) => std::cmp::Ordering::Less,
                (None, None) => a.slug.cmp(&b.slug),
            }
        });

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }
        results
    }

    /// Group non-draft documents by tag label.
    ///
    /// Sorted by descending count, then by label.
    #[must_use]
    pub fn tags(&self) -> Vec<TagCount> {
        let mut counts: Vec<TagCount> = Vec::new();
        for doc in self.documents.iter().filter(|doc| !doc.is_draft()) {
            for tag in &doc.front_matter.tags {
                match counts.iter_mut().find(|entry| entry.tag == *tag) {
                    Some(entry) => entry.count += 1,
                    None => counts.push(TagCount {
                        tag: tag.clone(),
                        count: 1,
                    }),
                }
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        counts
    }

    /// Aggregate statistics for the store.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let dates: Vec<DateTime<Utc>> = self
            .documents
            .iter()
            .filter_map(|doc| doc.front_matter.date)
            .collect();

        StoreStats {
            document_count: self.documents.len(),
            draft_count: self.documents.iter().filter(|doc| doc.is_draft()).count(),
            tag_count: self.tags().len(),
            failure_count: self.failures.len(),
            newest: dates.iter().max().copied(),
            oldest: dates.iter().min().copied(),
        }
    }
}

fn load_document(path: &Path) -> Result<Document> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::DocumentRead {
        path: path.to_path_buf(),
        source,
    })?;
    Document::parse(path, &source)
}
