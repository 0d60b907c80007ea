//! Label normalization for manifest-to-library matching
//!
//! Manifest labels ("Executive Summary") and library file stems
//! ("executive_summary") are compared through a canonical key: lowercase
//! alphanumeric words joined by single hyphens. Lowercasing uses Unicode
//! simple case mapping, which does not depend on the process locale.

use serde::Serialize;
use std::fmt;

/// Canonical matching key derived from a label or a file stem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '_'
}

fn is_list_marker(c: char) -> bool {
    c == '-' || c == '*' || c.is_whitespace()
}

/// Normalize a label into its matching key.
///
/// Steps, in order:
/// 1. Strip leading list-marker characters (`-`, `*`) and whitespace.
/// 2. Lowercase.
/// 3. Collapse runs of whitespace, `-` and `_` into a single `-`.
/// 4. Drop every other character that is not alphanumeric.
///
/// Separators are only emitted between two kept characters, so the key never
/// starts or ends with `-` and never contains `--`. That keeps the function
/// idempotent even when a dropped character sat between two separators.
///
/// ```
/// use doc_composer::normalize::normalize;
///
/// assert_eq!(normalize("- Executive Summary").as_str(), "executive-summary");
/// assert_eq!(normalize("financial_results (Q4)").as_str(), "financial-results-q4");
/// ```
pub fn normalize(label: &str) -> NormalizedKey {
    let stripped = label.trim_start_matches(is_list_marker);

    let mut key = String::with_capacity(stripped.len());
    let mut pending_separator = false;

    for c in stripped.chars().flat_map(char::to_lowercase) {
        if is_separator(c) {
            pending_separator = true;
        } else if c.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('-');
            }
            pending_separator = false;
            key.push(c);
        }
    }

    NormalizedKey(key)
}
