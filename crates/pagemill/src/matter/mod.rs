//! Front matter parsing and serialization.
//!
//! A document consists of a metadata block followed by a body. Two
//! delimiter styles are recognized:
//!
//! - **YAML style**: a line of `---` opens and closes a block of
//!   `key: value` lines.
//! - **TOML style**: a line of `+++` opens and closes a block of
//!   `key = value` lines.
//!
//! Parsing is a two-step affair: [`split_document`] performs the format
//! sniff and separates the raw block from the body (which passes through
//! byte-for-byte), then [`decode`] turns the block into an ordered list
//! of key/value pairs. [`encode`] is the inverse of `decode`: for
//! canonically formatted blocks the round trip reproduces the input.
//!
//! # Example
//!
//! ```
//! use pagemill::matter::{decode, split_document, MatterStyle, MetaValue};
//!
//! let source = "---\ntitle: About me\ndraft: false\n---\nHello.\n";
//! let raw = split_document(source).unwrap();
//! assert_eq!(raw.style, MatterStyle::Yaml);
//! assert_eq!(raw.body, "Hello.\n");
//!
//! let pairs = decode(raw.style, &raw.block).unwrap();
//! assert_eq!(pairs[0].1, MetaValue::String("About me".to_string()));
//! assert_eq!(pairs[1].1, MetaValue::Bool(false));
//! ```

mod codec;
mod split;

pub use codec::{decode, encode, MetaValue};
pub use split::{split_document, MatterStyle, RawMatter};
