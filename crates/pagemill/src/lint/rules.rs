//! Built-in lint rules.
//!
//! This module provides the pre-defined per-document checks applied by
//! the linter: metadata completeness and body sanity conventions a site
//! build would otherwise trip over at render time.

use chrono::Utc;

use crate::document::Document;

/// Maximum description length before a finding is reported. Longer
/// descriptions get truncated by search engines and social previews.
pub const MAX_DESCRIPTION_LENGTH: usize = 160;

/// A named per-document lint rule.
#[derive(Debug)]
pub struct LintRule {
    /// Name of the rule for identification.
    pub name: &'static str,

    /// Description of what this rule checks.
    pub description: &'static str,

    check: fn(&Document) -> Option<String>,
}

impl LintRule {
    /// Create a new lint rule.
    #[must_use]
    pub fn new(
        name: &'static str,
        description: &'static str,
        check: fn(&Document) -> Option<String>,
    ) -> Self {
        Self {
            name,
            description,
            check,
        }
    }

    /// Run the rule against a document, returning a finding message on
    /// violation.
    #[must_use]
    pub fn check(&self, document: &Document) -> Option<String> {
        (self.check)(document)
    }
}

/// Get all built-in lint rules.
#[must_use]
pub fn builtin_rules() -> Vec<LintRule> {
    vec![
        LintRule::new(
            "missing_title",
            "Documents should declare a title",
            |doc| match doc.front_matter.title.as_deref() {
                None | Some("") => Some("document has no title".to_string()),
                Some(_) => None,
            },
        ),
        LintRule::new(
            "missing_date",
            "Documents should declare a publication date",
            |doc| {
                doc.front_matter
                    .date
                    .is_none()
                    .then(|| "document has no date".to_string())
            },
        ),
        LintRule::new("empty_body", "Documents should have body text", |doc| {
            doc.body
                .trim()
                .is_empty()
                .then(|| "document body is empty".to_string())
        }),
        LintRule::new(
            "duplicate_tag",
            "Tag labels should be unique within a document",
            |doc| {
                let tags = &doc.front_matter.tags;
                for (i, tag) in tags.iter().enumerate() {
                    if tags[..i].iter().any(|seen| seen.eq_ignore_ascii_case(tag)) {
                        return Some(format!("tag '{tag}' is listed more than once"));
                    }
                }
                None
            },
        ),
        LintRule::new(
            "long_description",
            "Descriptions should fit in a meta tag",
            |doc| {
                doc.front_matter.description.as_deref().and_then(|desc| {
                    (desc.chars().count() > MAX_DESCRIPTION_LENGTH).then(|| {
                        format!(
                            "description is {} characters (max {MAX_DESCRIPTION_LENGTH})",
                            desc.chars().count()
                        )
                    })
                })
            },
        ),
        LintRule::new(
            "future_date",
            "Published documents should not be dated in the future",
            |doc| {
                doc.front_matter.date.and_then(|date| {
                    (!doc.is_draft() && date > Utc::now())
                        .then(|| format!("publication date {} is in the future", date.date_naive()))
                })
            },
        ),
    ]
}
