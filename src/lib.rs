//! # Document Composer Library
//!
//! This library assembles a single composite document from an ordered
//! manifest of section names. Each name is resolved against a library of
//! pre-authored document fragments, and the resolved fragments are merged,
//! in order, onto a master template with their paragraph, run and table
//! formatting intact. It backs the `doc-composer` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use doc_composer::library::{LibraryIndex, MatchResult};
//! use doc_composer::manifest;
//! use std::path::PathBuf;
//!
//! let entries = manifest::parse("# Report\n- Cover Page\n- Exec Summary\n").unwrap();
//! assert_eq!(entries.len(), 2);
//!
//! let index = LibraryIndex::from_files([
//!     ("cover-page".to_string(), PathBuf::from("library/cover-page.xml")),
//!     ("executive-summary".to_string(), PathBuf::from("library/executive-summary.xml")),
//! ]);
//!
//! assert!(matches!(index.resolve(&entries[0].label, 0.6), MatchResult::Exact(_)));
//! assert!(matches!(index.resolve(&entries[1].label, 0.6), MatchResult::Fuzzy(_, _)));
//! ```
//!
//! ## Core Concepts
//!
//! - **Document model (`document`)**: Blocks of paragraphs, tables and page
//!   breaks with optional formatting, loaded from and saved to `.docx`
//!   archives or Flat OPC WordprocessingML files.
//! - **Normalization (`normalize`)**: Canonical matching keys for labels and
//!   file stems.
//! - **Library (`library`)**: The key index over a directory of fragments,
//!   with exact and fuzzy resolution.
//! - **Manifest (`manifest`)**: Ordered section labels from bullet lines.
//! - **Merge (`merge`)**: The engine appending sources onto the master,
//!   including segment separators.
//! - **Phases (`phases`)**: The pipeline tying everything together.
//!
//! ## Execution Flow
//!
//! [`phases::execute`] parses the manifest, indexes the library, resolves
//! every entry, asks a [`phases::Confirm`] strategy about fuzzy matches and
//! missing entries, loads the sources in parallel, merges them in manifest
//! order and writes the output. Fatal conditions abort before the output is
//! touched; recoverable ones become warnings on the returned
//! [`phases::CompositionReport`].

pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod library;
pub mod manifest;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod phases;
pub mod suggestions;

#[cfg(test)]
mod normalize_proptest;
