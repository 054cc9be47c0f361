//! # pagemill Design Documentation
//!
//! This crate contains design documentation, architectural decision records,
//! and implementation guides for the pagemill project.
//!
//! ## Documentation Location
//!
//! All design documents are located in the `docs/` directory at the root
//! of this crate.
//!
//! Key documents:
//! - `architecture.md` - Overall system architecture
//! - `front-matter.md` - Front matter format and round-trip rules

// This is a documentation-only crate
#![no_std]
