//! # Manifest Parsing
//!
//! A manifest is a plain UTF-8 text (usually Markdown) listing the sections to
//! compose, one per bullet line:
//!
//! ```text
//! # Q4 Report
//!
//! - Cover Page
//! - Executive Summary
//! * Financial Results
//! ```
//!
//! Only lines matching `^\s*[-*]\s+(.+)$` are read. Headings, prose, numbered
//! lists and nesting carry no meaning; an indented bullet is just another
//! entry in document order.

use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::suggestions;

/// Bullet line pattern, evaluated per line.
const BULLET_PATTERN: &str = r"^\s*[-*]\s+(.+)$";

/// One requested section, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Label text with surrounding whitespace trimmed
    pub label: String,
    /// Zero-based position among the manifest's bullet lines
    pub order: usize,
}

/// Extract the ordered bullet labels from manifest text.
///
/// Returns an empty vector when the text has no bullet lines; callers that
/// need at least one entry should use [`parse_manifest`] or [`from_file`].
pub fn parse(content: &str) -> Result<Vec<ManifestEntry>> {
    let bullet = Regex::new(BULLET_PATTERN)?;

    let entries = content
        .lines()
        .filter_map(|line| bullet.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|label| !label.is_empty())
        .enumerate()
        .map(|(order, label)| ManifestEntry { label, order })
        .collect();

    Ok(entries)
}

/// Parse manifest text, failing with `ManifestEmpty` when nothing is listed.
///
/// `origin` only names the manifest in the error.
pub fn parse_manifest(content: &str, origin: &Path) -> Result<Vec<ManifestEntry>> {
    let entries = parse(content)?;
    if entries.is_empty() {
        return Err(suggestions::manifest_empty(origin));
    }
    Ok(entries)
}

/// Read and parse a manifest file.
pub fn from_file(path: &Path) -> Result<Vec<ManifestEntry>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => suggestions::manifest_not_found(path),
        _ => Error::Io(e),
    })?;
    parse_manifest(&content, path)
}
