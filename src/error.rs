//! # Error Handling
//!
//! This module defines the centralized error type for `doc-composer`. It uses
//! the `thiserror` library to build an `Error` enum whose variants follow the
//! composition taxonomy one-to-one, so callers can tell a missing manifest
//! from an empty library or a declined confirmation without string matching.
//!
//! ## Fatal and recoverable kinds
//!
//! Every variant returned from a pipeline function is fatal for that run. The
//! recoverable kinds (an unresolved manifest entry, a source document that
//! cannot be loaded) never escape the pipeline as `Err`; they are collected
//! as warnings on the `CompositionReport`. `SourceDocumentLoad` still exists
//! as a variant because loading a single document returns it, and the
//! orchestrator downgrades it to a warning.
//!
//! ## User-declined runs
//!
//! `FuzzyMatchRejected` and `CompositionDeclined` are not failures: the user
//! (or a configured policy) said no. `Error::is_user_declined` identifies
//! them and `Error::exit_code` maps them to status 0.

use std::path::PathBuf;
use thiserror::Error;

fn render_hint(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for doc-composer operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest file does not exist or cannot be read.
    #[error("Manifest file not found: {}{}", path.display(), render_hint(hint))]
    ManifestNotFound {
        path: PathBuf,
        hint: Option<String>,
    },

    /// The manifest was read but contains no bullet lines.
    #[error("No documents found in manifest {}{}", path.display(), render_hint(hint))]
    ManifestEmpty {
        path: PathBuf,
        hint: Option<String>,
    },

    /// The library directory is missing or holds no documents.
    #[error("Library not found or empty: {}{}", path.display(), render_hint(hint))]
    LibraryNotFound {
        path: PathBuf,
        hint: Option<String>,
    },

    /// None of the manifest entries produced a document to merge.
    #[error("No valid documents to compose ({} unresolved){}", unresolved.len(), render_hint(hint))]
    NoValidDocuments {
        /// Labels that could not be resolved or loaded
        unresolved: Vec<String>,
        hint: Option<String>,
    },

    /// The confirmation strategy rejected the proposed fuzzy matches.
    #[error("Fuzzy matches rejected{}", render_hint(hint))]
    FuzzyMatchRejected { hint: Option<String> },

    /// The confirmation strategy declined to continue without missing entries.
    #[error("Composition declined: {missing} manifest entries have no match")]
    CompositionDeclined { missing: usize },

    /// The master template does not exist.
    #[error("Master template not found: {}{}", path.display(), render_hint(hint))]
    MasterNotFound {
        path: PathBuf,
        hint: Option<String>,
    },

    /// A source document could not be loaded or parsed.
    #[error("Failed to load document {}: {message}", path.display())]
    SourceDocumentLoad { path: PathBuf, message: String },

    /// The composite document could not be persisted or verified.
    #[error("Failed to write output {}: {message}", path.display())]
    OutputWrite { path: PathBuf, message: String },

    /// A document's XML did not have the expected WordprocessingML shape.
    #[error("Document parse error: {message}")]
    DocumentParse { message: String },

    /// The configuration file is malformed or holds an invalid value.
    #[error("Configuration error: {message}{}", render_hint(hint))]
    ConfigParse {
        message: String,
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether the run stopped because a confirmation was declined rather
    /// than because something went wrong.
    pub fn is_user_declined(&self) -> bool {
        matches!(
            self,
            Error::FuzzyMatchRejected { .. } | Error::CompositionDeclined { .. }
        )
    }

    /// Process exit status for this error: 0 for declined runs, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_user_declined() {
            0
        } else {
            1
        }
    }

    /// Shorthand for a `DocumentParse` error.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::DocumentParse {
            message: message.into(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_not_found_display_includes_hint() {
        let error = Error::ManifestNotFound {
            path: PathBuf::from("report.md"),
            hint: Some("Pass --manifest with an existing file".to_string()),
        };
        let display = error.to_string();
        assert!(display.contains("Manifest file not found: report.md"));
        assert!(display.contains("\n  hint: Pass --manifest"));
    }

    #[test]
    fn test_display_without_hint_has_no_hint_line() {
        let error = Error::MasterNotFound {
            path: PathBuf::from("master.xml"),
            hint: None,
        };
        assert_eq!(error.to_string(), "Master template not found: master.xml");
    }

    #[test]
    fn test_no_valid_documents_counts_unresolved() {
        let error = Error::NoValidDocuments {
            unresolved: vec!["A".to_string(), "B".to_string()],
            hint: None,
        };
        assert!(error.to_string().contains("2 unresolved"));
    }

    #[test]
    fn test_declined_errors_exit_zero() {
        let rejected = Error::FuzzyMatchRejected { hint: None };
        let declined = Error::CompositionDeclined { missing: 1 };
        assert!(rejected.is_user_declined());
        assert!(declined.is_user_declined());
        assert_eq!(rejected.exit_code(), 0);
        assert_eq!(declined.exit_code(), 0);
    }

    #[test]
    fn test_fatal_errors_exit_one() {
        let errors = [
            Error::ManifestEmpty {
                path: PathBuf::from("m.md"),
                hint: None,
            },
            Error::LibraryNotFound {
                path: PathBuf::from("lib"),
                hint: None,
            },
            Error::OutputWrite {
                path: PathBuf::from("out.xml"),
                message: "disk full".to_string(),
            },
            Error::parse("missing w:body"),
        ];
        for error in errors {
            assert!(!error.is_user_declined());
            assert_eq!(error.exit_code(), 1);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: Error = io.into();
        assert!(error.to_string().starts_with("I/O error:"));
    }
}
