//! Lint execution engine.
//!
//! Applies the built-in rules to documents and whole stores, collecting
//! findings into a report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::Document;
use crate::lint::rules::{builtin_rules, LintRule};
use crate::store::ContentStore;

/// Configuration for the content linter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Whether linting is enabled.
    pub enabled: bool,

    /// Whether unrecognized front matter keys are allowed.
    pub allow_unknown_keys: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_unknown_keys: false,
        }
    }
}

/// A single lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFinding {
    /// Name of the rule that produced the finding.
    pub rule: &'static str,

    /// Human readable description of the problem.
    pub message: String,
}

/// The result of linting a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintResult {
    /// The document passed every enabled rule.
    Passed,

    /// The document violated one or more rules.
    Findings(Vec<LintFinding>),
}

impl LintResult {
    /// Whether the document passed.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// The findings, empty when the document passed.
    #[must_use]
    pub fn findings(&self) -> &[LintFinding] {
        match self {
            Self::Passed => &[],
            Self::Findings(findings) => findings,
        }
    }
}

/// A lint report covering a whole content store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    /// Findings per document, keyed by slug. Clean documents are omitted.
    pub document_findings: Vec<(String, Vec<LintFinding>)>,

    /// Findings that apply to the store as a whole.
    pub store_findings: Vec<LintFinding>,
}

impl LintReport {
    /// Whether the report contains no findings at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.document_findings.is_empty() && self.store_findings.is_empty()
    }

    /// Total number of findings across documents and the store.
    #[must_use]
    pub fn total(&self) -> usize {
        self.document_findings
            .iter()
            .map(|(_, findings)| findings.len())
            .sum::<usize>()
            + self.store_findings.len()
    }
}

/// Checks documents against the configured lint rules.
#[derive(Debug)]
pub struct ContentLinter {
    config: LintConfig,
    rules: Vec<LintRule>,
}

impl ContentLinter {
    /// Create a linter with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LintConfig::default())
    }

    /// Create a linter with the given configuration.
    #[must_use]
    pub fn with_config(config: LintConfig) -> Self {
        Self {
            config,
            rules: builtin_rules(),
        }
    }

    /// Check a single document against every enabled rule.
    #[must_use]
    pub fn check(&self, document: &Document) -> LintResult {
        if !self.config.enabled {
            return LintResult::Passed;
        }

        let mut findings = Vec::new();

        for rule in &self.rules {
            if let Some(message) = rule.check(document) {
                debug!("Rule {} flagged {}: {}", rule.name, document.slug, message);
                findings.push(LintFinding {
                    rule: rule.name,
                    message,
                });
            }
        }

        if !self.config.allow_unknown_keys && !document.front_matter.extra.is_empty() {
            let keys: Vec<&str> = document
                .front_matter
                .extra
                .iter()
                .map(|(key, _)| key.as_str())
                .collect();
            findings.push(LintFinding {
                rule: "unknown_keys",
                message: format!("unrecognized front matter keys: {}", keys.join(", ")),
            });
        }

        if findings.is_empty() {
            LintResult::Passed
        } else {
            LintResult::Findings(findings)
        }
    }

    /// Check every document in a store, plus store-wide invariants.
    ///
    /// In addition to the per-document rules this detects slug collisions,
    /// where two files would publish under the same address.
    #[must_use]
    pub fn check_store(&self, store: &ContentStore) -> LintReport {
        let mut report = LintReport::default();

        if !self.config.enabled {
            return report;
        }

        for document in store.documents() {
            if let LintResult::Findings(findings) = self.check(document) {
                report
                    .document_findings
                    .push((document.slug.clone(), findings));
            }
        }

        let mut slug_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for document in store.documents() {
            *slug_counts.entry(document.slug.as_str()).or_insert(0) += 1;
        }
        for (slug, count) in slug_counts {
            if count > 1 {
                report.store_findings.push(LintFinding {
                    rule: "slug_collision",
                    message: format!("slug '{slug}' is shared by {count} documents"),
                });
            }
        }

        report
    }
}

impl Default for ContentLinter {
    fn default() -> Self {
        Self::new()
    }
}
