//! Content linting for parsed documents.
//!
//! This module checks documents against publishing conventions:
//!
//! - **Per-document rules**: Missing titles or dates, empty bodies,
//!   duplicate tags, overlong descriptions, and future-dated published
//!   documents.
//!
//! - **Unknown key detection**: Flags front matter keys outside the
//!   recognized set, unless configured to allow them.
//!
//! - **Store-wide checks**: Slug collisions across the content tree.
//!
//! # Example
//!
//! ```
//! use pagemill::document::Document;
//! use pagemill::lint::{ContentLinter, LintResult};
//!
//! let doc = Document::parse(
//!     "about.md",
//!     "---\ntitle: About\ndate: 2018-02-22\n---\nHello there.\n",
//! )
//! .unwrap();
//!
//! let linter = ContentLinter::new();
//! match linter.check(&doc) {
//!     LintResult::Passed => println!("Document is clean"),
//!     LintResult::Findings(findings) => {
//!         for finding in findings {
//!             println!("{}: {}", finding.rule, finding.message);
//!         }
//!     }
//! }
//! ```

mod checker;
mod rules;

pub use checker::{ContentLinter, LintConfig, LintFinding, LintReport, LintResult};
pub use rules::{builtin_rules, LintRule, MAX_DESCRIPTION_LENGTH};
