//! # Error Suggestions
//!
//! This module provides helper functions for building errors that carry a
//! hint. Errors should tell users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::suggestions;
//!
//! // Instead of:
//! return Err(Error::MasterNotFound { path, hint: None });
//!
//! // Use:
//! return Err(suggestions::master_not_found(&path));
//! ```

use std::path::Path;

use crate::error::Error;

/// How many library documents a hint lists before summarizing the rest.
const MAX_LISTED: usize = 12;

/// Error for a manifest file that does not exist or cannot be read.
pub fn manifest_not_found(path: &Path) -> Error {
    Error::ManifestNotFound {
        path: path.to_path_buf(),
        hint: Some("Pass --manifest with the path to a Markdown bullet list".to_string()),
    }
}

/// Error for a manifest without bullet lines.
pub fn manifest_empty(path: &Path) -> Error {
    Error::ManifestEmpty {
        path: path.to_path_buf(),
        hint: Some("List each section on its own line starting with '- ' or '* '".to_string()),
    }
}

/// Error for a missing or empty library directory.
pub fn library_not_found(path: &Path, extension: Option<&str>) -> Error {
    let kinds = match extension {
        Some(ext) => format!(".{ext}"),
        None => ".docx or .xml".to_string(),
    };
    Error::LibraryNotFound {
        path: path.to_path_buf(),
        hint: Some(format!(
            "Use --library or DOC_COMPOSER_LIBRARY to point at a directory of {kinds} documents"
        )),
    }
}

/// Error for a missing master template.
pub fn master_not_found(path: &Path) -> Error {
    Error::MasterNotFound {
        path: path.to_path_buf(),
        hint: Some("Pass --master with an existing template document".to_string()),
    }
}

/// Error for a run where nothing could be composed.
///
/// The hint lists what the library does contain, so a typo in the manifest
/// is easy to spot.
pub fn no_valid_documents(unresolved: Vec<String>, available: &[String]) -> Error {
    Error::NoValidDocuments {
        unresolved,
        hint: Some(available_documents_hint(available)),
    }
}

/// Error for declined fuzzy matches, listing the library contents.
pub fn fuzzy_rejected(available: &[String]) -> Error {
    Error::FuzzyMatchRejected {
        hint: Some(available_documents_hint(available)),
    }
}

/// Render the "available documents" hint line.
pub fn available_documents_hint(available: &[String]) -> String {
    if available.is_empty() {
        return "The library contains no documents".to_string();
    }

    let mut listed: Vec<&str> = available.iter().take(MAX_LISTED).map(String::as_str).collect();
    let remaining = available.len().saturating_sub(MAX_LISTED);
    let more = if remaining > 0 {
        format!(" (and {remaining} more)")
    } else {
        String::new()
    };
    listed.sort_unstable();

    format!("Available documents: {}{more}", listed.join(", "))
}
