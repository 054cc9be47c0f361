//! Core document types for pagemill.
//!
//! This module defines the fundamental data structures representing a
//! content document: its typed front matter and its untouched body.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::matter::{decode, encode, split_document, MatterStyle, MetaValue};

/// The metadata keys with typed representations in [`FrontMatter`].
pub const RECOGNIZED_KEYS: &[&str] = &[
    "title",
    "date",
    "draft",
    "description",
    "author",
    "tags",
    "meta_img",
];

/// Typed front matter attributes of a document.
///
/// Keys outside [`RECOGNIZED_KEYS`] are preserved in `extra` so that
/// serialization is lossless.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FrontMatter {
    /// Document title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publication date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    /// Document author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Short description, typically used for meta tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Social preview image path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_img: Option<String>,

    /// Tag labels, order preserved.
    pub tags: Vec<String>,

    /// Draft flag: when true the document is excluded from published
    /// listings.
    pub draft: bool,

    /// Unrecognized keys, in source order.
    #[serde(serialize_with = "serialize_extra")]
    pub extra: Vec<(String, MetaValue)>,
}

fn serialize_extra<S: Serializer>(
    pairs: &[(String, MetaValue)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(pairs.iter().map(|(k, v)| (k, v)))
}

impl FrontMatter {
    /// Build typed front matter from decoded key/value pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized key carries a value of the wrong
    /// shape, or if the date cannot be parsed in any accepted form.
    pub fn from_pairs(pairs: Vec<(String, MetaValue)>) -> Result<Self> {
        let mut matter = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "title" => matter.title = Some(expect_text(&key, &value)?),
                "author" => matter.author = Some(expect_text(&key, &value)?),
                "description" => matter.description = Some(expect_text(&key, &value)?),
                "meta_img" => matter.meta_img = Some(expect_text(&key, &value)?),
                "date" => {
                    let raw = value
                        .as_str()
                        .ok_or_else(|| Error::invalid_date(format!("{value:?}")))?;
                    matter.date = Some(parse_date(raw)?);
                }
                "tags" => matter.tags = expect_tags(&value)?,
                "draft" => {
                    matter.draft = value.as_bool().ok_or_else(|| {
                        Error::invalid_front_matter("'draft' must be a boolean")
                    })?;
                }
                _ => matter.extra.push((key, value)),
            }
        }

        Ok(matter)
    }

    /// Convert back into key/value pairs in canonical order.
    ///
    /// Recognized keys come first (title, date, author, description,
    /// meta_img, tags, draft), followed by the preserved extra keys.
    /// `draft` is emitted only when set; absent keys are omitted.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, MetaValue)> {
        let mut pairs = Vec::new();

        if let Some(title) = &self.title {
            pairs.push(("title".to_string(), MetaValue::String(title.clone())));
        }
        if let Some(date) = self.date {
            pairs.push(("date".to_string(), MetaValue::Datetime(format_date(date))));
        }
        if let Some(author) = &self.author {
            pairs.push(("author".to_string(), MetaValue::String(author.clone())));
        }
        if let Some(description) = &self.description {
            pairs.push((
                "description".to_string(),
                MetaValue::String(description.clone()),
            ));
        }
        if let Some(meta_img) = &self.meta_img {
            pairs.push(("meta_img".to_string(), MetaValue::String(meta_img.clone())));
        }
        if !self.tags.is_empty() {
            pairs.push((
                "tags".to_string(),
                MetaValue::List(
                    self.tags
                        .iter()
                        .map(|tag| MetaValue::String(tag.clone()))
                        .collect(),
                ),
            ));
        }
        if self.draft {
            pairs.push(("draft".to_string(), MetaValue::Bool(true)));
        }

        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

fn expect_text(key: &str, value: &MetaValue) -> Result<String> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| Error::invalid_front_matter(format!("'{key}' must be a string")))
}

fn expect_tags(value: &MetaValue) -> Result<Vec<String>> {
    match value {
        // A bare string is accepted as a single-tag list.
        MetaValue::String(tag) => Ok(vec![tag.clone()]),
        MetaValue::List(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(ToString::to_string).ok_or_else(|| {
                    Error::invalid_front_matter("'tags' must be a list of strings")
                })
            })
            .collect(),
        _ => Err(Error::invalid_front_matter(
            "'tags' must be a list of strings",
        )),
    }
}

/// Parse a date value in any of the accepted forms.
///
/// Accepted: RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`,
/// and bare `YYYY-MM-DD` (midnight UTC).
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if no form matches.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(Error::invalid_date(raw))
}

/// Format a date back into its canonical source form.
///
/// Midnight UTC dates collapse to bare `YYYY-MM-DD`; everything else is
/// RFC 3339.
#[must_use]
pub fn format_date(date: DateTime<Utc>) -> String {
    if date.time() == NaiveTime::MIN {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.to_rfc3339()
    }
}

/// Normalize a file stem into a slug.
///
/// Lowercases, collapses runs of non-alphanumeric characters into single
/// hyphens, and trims leading/trailing hyphens.
///
/// # Panics
///
/// Panics if the built-in pattern is invalid.
#[must_use]
pub fn slugify(stem: &str) -> String {
    let separators = Regex::new("[^a-z0-9]+").expect("invalid slug pattern");
    separators
        .replace_all(&stem.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// A parsed content document.
///
/// Each document is an independently-owned file: a metadata block
/// followed by a body, with no relationships to other documents beyond
/// shared tag values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Path to the source file.
    pub path: PathBuf,

    /// Slug derived from the file stem.
    pub slug: String,

    /// The delimiter style the document was written in.
    pub style: MatterStyle,

    /// Typed front matter attributes.
    pub front_matter: FrontMatter,

    /// The body, byte-for-byte as it appeared after the closing fence.
    pub body: String,

    /// BLAKE3 hash of the full source, for change detection.
    pub content_hash: String,
}

impl Document {
    /// Parse a document from its source text.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata block is missing, unclosed, or
    /// malformed.
    pub fn parse(path: impl Into<PathBuf>, source: &str) -> Result<Self> {
        let path = path.into();
        let raw = split_document(source)?;
        let pairs = decode(raw.style, &raw.block)?;
        let front_matter = FrontMatter::from_pairs(pairs)?;

        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("untitled");
        let slug = slugify(stem);

        Ok(Self {
            path,
            slug,
            style: raw.style,
            front_matter,
            body: raw.body,
            content_hash: Self::compute_hash(source),
        })
    }

    /// Compute the BLAKE3 hash of the given source text.
    #[must_use]
    pub fn compute_hash(source: &str) -> String {
        blake3::hash(source.as_bytes()).to_hex().to_string()
    }

    /// Check if this document's source matches the given hash.
    #[must_use]
    pub fn matches_hash(&self, hash: &str) -> bool {
        self.content_hash == hash
    }

    /// Whether the draft flag is set.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.front_matter.draft
    }

    /// Whether the document carries the given tag (case-insensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.front_matter
            .tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// The title, falling back to the slug when absent.
    #[must_use]
    pub fn title_or_slug(&self) -> &str {
        self.front_matter.title.as_deref().unwrap_or(&self.slug)
    }

    /// Number of whitespace-separated words in the body.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Serialize the document back into source form.
    ///
    /// The front matter is re-encoded in the document's own delimiter
    /// style; the body is appended unaltered.
    ///
    /// # Errors
    ///
    /// Returns an error if the front matter cannot be re-encoded.
    pub fn to_source(&self) -> Result<String> {
        let block = encode(self.style, &self.front_matter.to_pairs())?;
        let fence = self.style.fence();
        Ok(format!("{fence}\n{block}{fence}\n{body}", body = self.body))
    }

    /// Borrow the source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const YAML_DOC: &str = "---\ntitle: About me\ndate: 2018-03-23\ntags:\n- personal\n---\n# About\n\nHi there.\n";
    const TOML_DOC: &str = "+++\ntitle = \"Dynamic parameters in PowerShell\"\ndate = 2018-04-12\ndraft = false\ntags = [\"powershell\", \"automation\"]\n+++\nDynamic parameters are built at runtime.\n";

    #[test]
    fn test_parse_yaml_document() {
        let doc = Document::parse("content/about.md", YAML_DOC).unwrap();

        assert_eq!(doc.slug, "about");
        assert_eq!(doc.style, MatterStyle::Yaml);
        assert_eq!(doc.front_matter.title.as_deref(), Some("About me"));
        assert_eq!(doc.front_matter.tags, vec!["personal"]);
        assert!(!doc.is_draft());
        assert_eq!(doc.body, "# About\n\nHi there.\n");
    }

    #[test]
    fn test_parse_toml_document() {
        let doc = Document::parse("content/posts/dynamic-parameters.md", TOML_DOC).unwrap();

        assert_eq!(doc.slug, "dynamic-parameters");
        assert_eq!(doc.style, MatterStyle::Toml);
        assert_eq!(
            doc.front_matter.title.as_deref(),
            Some("Dynamic parameters in PowerShell")
        );
        assert!(!doc.front_matter.draft);
        assert_eq!(doc.front_matter.tags, vec!["powershell", "automation"]);
        assert_eq!(doc.body, "Dynamic parameters are built at runtime.\n");
    }

    #[test]
    fn test_parse_date_forms() {
        let midnight = Utc.with_ymd_and_hms(2018, 3, 23, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2018-03-23").unwrap(), midnight);

        let morning = Utc.with_ymd_and_hms(2018, 3, 23, 9, 30, 0).unwrap();
        assert_eq!(parse_date("2018-03-23T09:30:00").unwrap(), morning);
        assert_eq!(parse_date("2018-03-23 09:30:00").unwrap(), morning);
        assert_eq!(parse_date("2018-03-23T09:30:00Z").unwrap(), morning);
        assert_eq!(parse_date("2018-03-23T11:30:00+02:00").unwrap(), morning);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("next tuesday"),
            Err(Error::InvalidDate { .. })
        ));
        assert!(matches!(parse_date("2018-23-03"), Err(Error::InvalidDate { .. })));
    }

    #[test]
    fn test_parse_document_with_bad_date() {
        let source = "---\ntitle: t\ndate: sometime\n---\nbody\n";
        let result = Document::parse("bad.md", source);
        assert!(matches!(result, Err(Error::InvalidDate { .. })));
    }

    #[test]
    fn test_format_date_round_trip() {
        let date = parse_date("2018-03-23").unwrap();
        assert_eq!(format_date(date), "2018-03-23");

        let datetime = parse_date("2018-03-23T09:30:00Z").unwrap();
        assert_eq!(format_date(datetime), "2018-03-23T09:30:00+00:00");
        assert_eq!(parse_date(&format_date(datetime)).unwrap(), datetime);
    }

    #[test]
    fn test_draft_defaults_to_false() {
        let matter = FrontMatter::from_pairs(vec![]).unwrap();
        assert!(!matter.draft);
    }

    #[test]
    fn test_draft_must_be_boolean() {
        let pairs = vec![("draft".to_string(), MetaValue::String("yes".into()))];
        let result = FrontMatter::from_pairs(pairs);
        assert!(matches!(result, Err(Error::InvalidFrontMatter { .. })));
    }

    #[test]
    fn test_single_tag_string_coerced_to_list() {
        let pairs = vec![("tags".to_string(), MetaValue::String("powershell".into()))];
        let matter = FrontMatter::from_pairs(pairs).unwrap();
        assert_eq!(matter.tags, vec!["powershell"]);
    }

    #[test]
    fn test_unknown_keys_preserved_in_extra() {
        let source = "---\ntitle: t\nlayout: post\nweight: 3\n---\nbody\n";
        let doc = Document::parse("x.md", source).unwrap();

        assert_eq!(doc.front_matter.extra.len(), 2);
        assert_eq!(doc.front_matter.extra[0].0, "layout");
        assert_eq!(doc.front_matter.extra[1].1, MetaValue::Integer(3));
    }

    #[test]
    fn test_front_matter_pairs_round_trip() {
        let source = "---\ntitle: About me\ndate: 2018-03-23\ntags:\n- personal\ndraft: true\n---\n";
        let doc = Document::parse("about.md", source).unwrap();
        let rebuilt = FrontMatter::from_pairs(doc.front_matter.to_pairs()).unwrap();
        assert_eq!(rebuilt, doc.front_matter);
    }

    #[test]
    fn test_to_source_round_trip() {
        let doc = Document::parse("about.md", YAML_DOC).unwrap();
        assert_eq!(doc.to_source().unwrap(), YAML_DOC);
    }

    #[test]
    fn test_to_source_round_trip_toml() {
        let doc = Document::parse("post.md", TOML_DOC).unwrap();
        // `draft = false` is canonicalized away; the rest survives.
        let source = doc.to_source().unwrap();
        assert!(source.starts_with("+++\ntitle = \"Dynamic parameters in PowerShell\"\n"));
        assert!(source.ends_with("+++\nDynamic parameters are built at runtime.\n"));
    }

    #[test]
    fn test_parse_keeps_path_and_derives_slug() {
        let doc = Document::parse("content/posts/My First Post.md", YAML_DOC).unwrap();
        assert_eq!(doc.path(), Path::new("content/posts/My First Post.md"));
        assert_eq!(doc.slug, "my-first-post");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("About Me"), "about-me");
        assert_eq!(slugify("2018_dynamic params!"), "2018-dynamic-params");
        assert_eq!(slugify("--already-slug--"), "already-slug");
    }

    #[test]
    fn test_hash_consistency() {
        let hash1 = Document::compute_hash(YAML_DOC);
        let hash2 = Document::compute_hash(YAML_DOC);
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, Document::compute_hash(TOML_DOC));

        let doc = Document::parse("about.md", YAML_DOC).unwrap();
        assert!(doc.matches_hash(&hash1));
        assert!(!doc.matches_hash("bogus"));
    }

    #[test]
    fn test_title_or_slug() {
        let doc = Document::parse("about.md", YAML_DOC).unwrap();
        assert_eq!(doc.title_or_slug(), "About me");

        let doc = Document::parse("untitled-note.md", "---\n---\nbody\n").unwrap();
        assert_eq!(doc.title_or_slug(), "untitled-note");
    }

    #[test]
    fn test_has_tag_case_insensitive() {
        let doc = Document::parse("post.md", TOML_DOC).unwrap();
        assert!(doc.has_tag("powershell"));
        assert!(doc.has_tag("PowerShell"));
        assert!(!doc.has_tag("rust"));
    }

    #[test]
    fn test_word_count() {
        let doc = Document::parse("post.md", TOML_DOC).unwrap();
        assert_eq!(doc.word_count(), 6);
    }

    #[test]
    fn test_document_serialize_json() {
        let doc = Document::parse("about.md", YAML_DOC).unwrap();
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["slug"], "about");
        assert_eq!(json["style"], "yaml");
        assert_eq!(json["front_matter"]["title"], "About me");
        assert_eq!(json["front_matter"]["tags"][0], "personal");
    }
}
