//! Delimiter recognition and raw block extraction.
//!
//! This module performs the format sniff: it recognizes which delimiter
//! style opens a document, extracts the raw metadata block, and hands
//! back the body untouched.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The front matter delimiter style of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatterStyle {
    /// `---` fences around `key: value` lines.
    Yaml,
    /// `+++` fences around `key = value` lines.
    Toml,
}

impl MatterStyle {
    /// The fence line that opens and closes a block in this style.
    #[must_use]
    pub fn fence(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

impl std::fmt::Display for MatterStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

/// The result of splitting a document into metadata block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatter {
    /// The delimiter style that opened the block.
    pub style: MatterStyle,

    /// The raw metadata block between the fences, delimiters excluded.
    pub block: String,

    /// Everything after the closing fence's newline, byte-for-byte.
    pub body: String,
}

impl RawMatter {
    /// Reassemble the original document source.
    #[must_use]
    pub fn to_source(&self) -> String {
        format!(
            "{fence}\n{block}{fence}\n{body}",
            fence = self.style.fence(),
            block = self.block,
            body = self.body
        )
    }
}

/// Split a document into its metadata block and body.
///
/// The opening fence must be the first line of the document (a UTF-8 BOM
/// before it is tolerated). The body is everything after the closing
/// fence line and is returned unaltered.
///
/// # Errors
///
/// Returns [`Error::MissingFrontMatter`] if the document does not start
/// with a recognized fence, and [`Error::UnclosedFrontMatter`] if the
/// opening fence is never closed.
pub fn split_document(source: &str) -> Result<RawMatter> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let (first_line, rest) = match source.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (source, ""),
    };

    let style = match first_line.trim_end_matches('\r') {
        "---" => MatterStyle::Yaml,
        "+++" => MatterStyle::Toml,
        _ => return Err(Error::MissingFrontMatter),
    };

    let fence = style.fence();
    let mut pos = 0;
    loop {
        let line_end = rest[pos..].find('\n').map_or(rest.len(), |i| pos + i);
        let line = &rest[pos..line_end];

        if line.trim_end_matches('\r') == fence {
            let body_start = if line_end < rest.len() {
                line_end + 1
            } else {
                line_end
            };
            return Ok(RawMatter {
                style,
                block: rest[..pos].to_string(),
                body: rest[body_start..].to_string(),
            });
        }

        if line_end >= rest.len() {
            return Err(Error::UnclosedFrontMatter { style });
        }
        pos = line_end + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matter_style_display() {
        assert_eq!(MatterStyle::Yaml.to_string(), "yaml");
        assert_eq!(MatterStyle::Toml.to_string(), "toml");
    }

    #[test]
    fn test_matter_style_fence() {
        assert_eq!(MatterStyle::Yaml.fence(), "---");
        assert_eq!(MatterStyle::Toml.fence(), "+++");
    }

    #[test]
    fn test_split_yaml_document() {
        let source = "---\ntitle: About me\n---\n# Hello\n\nBody text.\n";
        let raw = split_document(source).unwrap();

        assert_eq!(raw.style, MatterStyle::Yaml);
        assert_eq!(raw.block, "title: About me\n");
        assert_eq!(raw.body, "# Hello\n\nBody text.\n");
    }

    #[test]
    fn test_split_toml_document() {
        let source = "+++\ntitle = \"About me\"\n+++\n# Hello\n\nBody text.\n";
        let raw = split_document(source).unwrap();

        assert_eq!(raw.style, MatterStyle::Toml);
        assert_eq!(raw.block, "title = \"About me\"\n");
        assert_eq!(raw.body, "# Hello\n\nBody text.\n");
    }

    #[test]
    fn test_split_body_passed_through_unaltered() {
        let body = "Line one.\r\n\n  indented\n```\ncode --- not a fence\n```\n";
        let yaml = format!("---\ntitle: t\n---\n{body}");
        let toml = format!("+++\ntitle = \"t\"\n+++\n{body}");

        assert_eq!(split_document(&yaml).unwrap().body, body);
        assert_eq!(split_document(&toml).unwrap().body, body);
    }

    #[test]
    fn test_split_missing_front_matter() {
        let result = split_document("# Just a heading\n\nNo metadata here.\n");
        assert!(matches!(result, Err(Error::MissingFrontMatter)));
    }

    #[test]
    fn test_split_empty_document() {
        let result = split_document("");
        assert!(matches!(result, Err(Error::MissingFrontMatter)));
    }

    #[test]
    fn test_split_unclosed_yaml_block() {
        let result = split_document("---\ntitle: About me\ndate: 2018-03-23\n");
        assert!(matches!(
            result,
            Err(Error::UnclosedFrontMatter {
                style: MatterStyle::Yaml
            })
        ));
    }

    #[test]
    fn test_split_unclosed_toml_block() {
        let result = split_document("+++\ntitle = \"About me\"\n");
        assert!(matches!(
            result,
            Err(Error::UnclosedFrontMatter {
                style: MatterStyle::Toml
            })
        ));
    }

    #[test]
    fn test_split_mismatched_fence_is_unclosed() {
        // A +++ line does not close a --- block.
        let result = split_document("---\ntitle: t\n+++\nbody\n");
        assert!(matches!(result, Err(Error::UnclosedFrontMatter { .. })));
    }

    #[test]
    fn test_split_empty_block() {
        let raw = split_document("---\n---\nbody\n").unwrap();
        assert_eq!(raw.block, "");
        assert_eq!(raw.body, "body\n");
    }

    #[test]
    fn test_split_empty_body() {
        let raw = split_document("---\ntitle: t\n---\n").unwrap();
        assert_eq!(raw.body, "");

        // Closing fence without a trailing newline.
        let raw = split_document("---\ntitle: t\n---").unwrap();
        assert_eq!(raw.body, "");
    }

    #[test]
    fn test_split_fence_must_be_first_line() {
        let result = split_document("\n---\ntitle: t\n---\nbody\n");
        assert!(matches!(result, Err(Error::MissingFrontMatter)));
    }

    #[test]
    fn test_split_tolerates_bom() {
        let raw = split_document("\u{feff}---\ntitle: t\n---\nbody\n").unwrap();
        assert_eq!(raw.block, "title: t\n");
        assert_eq!(raw.body, "body\n");
    }

    #[test]
    fn test_split_tolerates_crlf_fences() {
        let raw = split_document("---\r\ntitle: t\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(raw.style, MatterStyle::Yaml);
        assert_eq!(raw.block, "title: t\r\n");
        assert_eq!(raw.body, "body\r\n");
    }

    #[test]
    fn test_split_later_fence_belongs_to_body() {
        let source = "---\ntitle: t\n---\nintro\n---\noutro\n";
        let raw = split_document(source).unwrap();
        assert_eq!(raw.body, "intro\n---\noutro\n");
    }

    #[test]
    fn test_to_source_round_trip() {
        let source = "---\ntitle: About me\ndraft: false\n---\n# Hello\n\nBody.\n";
        let raw = split_document(source).unwrap();
        assert_eq!(raw.to_source(), source);

        let source = "+++\ndraft = false\n+++\nBody.\n";
        let raw = split_document(source).unwrap();
        assert_eq!(raw.to_source(), source);
    }

    #[test]
    fn test_raw_matter_serde_style() {
        let json = serde_json::to_string(&MatterStyle::Yaml).unwrap();
        assert_eq!(json, "\"yaml\"");
        let style: MatterStyle = serde_json::from_str("\"toml\"").unwrap();
        assert_eq!(style, MatterStyle::Toml);
    }
}
