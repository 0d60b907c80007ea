//! # Library Index and Resolution
//!
//! The library is a flat directory of document fragments. Each file's stem is
//! normalized once, when the index is built, and manifest labels are resolved
//! against those keys:
//!
//! 1. **Exact**: the normalized label equals a key.
//! 2. **Fuzzy**: otherwise, the key with the highest sequence similarity
//!    ([`similarity::ratio`]) at or above the threshold.
//! 3. **None**: nothing reaches the threshold.
//!
//! ## Determinism
//!
//! Files are indexed in lexicographic filename order. When two stems
//! normalize to the same key, the later filename wins and the collision is
//! recorded. Keys are stored in a `BTreeMap`, so when several keys tie for
//! the best fuzzy score the lexicographically smallest one is chosen.
//!
//! Resolution never touches the filesystem; documents are loaded later, by
//! the orchestrator.

pub mod similarity;

use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{DocumentFormat, WordPackage};
use crate::error::{Error, Result};
use crate::normalize::{normalize, NormalizedKey};
use crate::suggestions;

/// A document available in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryDocument {
    /// Normalized file stem; the document's identity in the index
    pub key: NormalizedKey,
    /// File stem as found on disk
    pub stem: String,
    pub path: PathBuf,
}

impl LibraryDocument {
    /// Load and parse the document.
    ///
    /// Any failure is reported as `SourceDocumentLoad`, which the
    /// orchestrator treats as recoverable.
    pub fn load(&self) -> Result<WordPackage> {
        WordPackage::open(&self.path).map_err(|e| Error::SourceDocumentLoad {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// File name for display, falling back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Outcome of resolving one manifest label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Exact(LibraryDocument),
    /// A similar key, with its similarity score
    Fuzzy(LibraryDocument, f64),
    None,
}

impl MatchResult {
    pub fn document(&self) -> Option<&LibraryDocument> {
        match self {
            MatchResult::Exact(doc) | MatchResult::Fuzzy(doc, _) => Some(doc),
            MatchResult::None => None,
        }
    }

    /// 1.0 for exact matches, the similarity for fuzzy ones, 0.0 otherwise.
    pub fn score(&self) -> f64 {
        match self {
            MatchResult::Exact(_) => 1.0,
            MatchResult::Fuzzy(_, score) => *score,
            MatchResult::None => 0.0,
        }
    }

    pub fn is_fuzzy(&self) -> bool {
        matches!(self, MatchResult::Fuzzy(..))
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, MatchResult::None)
    }
}

/// Two library files whose stems normalize to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub key: NormalizedKey,
    /// The file that was indexed first and then replaced
    pub replaced: PathBuf,
    /// The file the key now points at
    pub kept: PathBuf,
}

/// Normalized-key index over a library directory.
#[derive(Debug, Clone, Default)]
pub struct LibraryIndex {
    documents: BTreeMap<NormalizedKey, LibraryDocument>,
    collisions: Vec<Collision>,
}

impl LibraryIndex {
    /// Scan `dir` (non-recursively) for `.{extension}` documents, or for
    /// every supported format (`.docx`, `.xml`) when `extension` is `None`.
    ///
    /// Fails with `LibraryNotFound` when the directory is missing or holds no
    /// matching documents.
    pub fn build(dir: &Path, extension: Option<&str>) -> Result<Self> {
        if !dir.is_dir() {
            return Err(suggestions::library_not_found(dir, extension));
        }

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let matches_extension = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| match extension {
                    Some(wanted) => e.eq_ignore_ascii_case(wanted),
                    None => DocumentFormat::is_known_extension(e),
                });
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !matches_extension || stem.starts_with('.') {
                continue;
            }
            files.push((stem.to_string(), path.clone()));
        }
        files.sort_by(|a, b| a.1.file_name().cmp(&b.1.file_name()));

        let index = Self::from_files(files);
        if index.is_empty() {
            return Err(suggestions::library_not_found(dir, extension));
        }

        debug!(
            "Indexed {} documents from {}",
            index.len(),
            dir.display()
        );
        Ok(index)
    }

    /// Index `(stem, path)` pairs in the given order.
    pub fn from_files<I>(files: I) -> Self
    where
        I: IntoIterator<Item = (String, PathBuf)>,
    {
        let mut index = LibraryIndex::default();
        for (stem, path) in files {
            index.insert(stem, path);
        }
        index
    }

    fn insert(&mut self, stem: String, path: PathBuf) {
        let key = normalize(&stem);
        if key.is_empty() {
            debug!("Skipping {}: stem has no matchable characters", path.display());
            return;
        }

        let document = LibraryDocument {
            key: key.clone(),
            stem,
            path,
        };
        if let Some(previous) = self.documents.insert(key.clone(), document.clone()) {
            warn!(
                "Library files {} and {} share the key '{}'; using {}",
                previous.path.display(),
                document.path.display(),
                key,
                document.path.display()
            );
            self.collisions.push(Collision {
                key,
                replaced: previous.path,
                kept: document.path,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, key: &NormalizedKey) -> Option<&LibraryDocument> {
        self.documents.get(key)
    }

    /// Documents in key order.
    pub fn documents(&self) -> impl Iterator<Item = &LibraryDocument> {
        self.documents.values()
    }

    /// File stems of every indexed document, in key order.
    pub fn available(&self) -> Vec<String> {
        self.documents.values().map(|d| d.stem.clone()).collect()
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Resolve a label: exact key first, then the best fuzzy candidate whose
    /// similarity is at least `threshold`.
    pub fn resolve(&self, label: &str, threshold: f64) -> MatchResult {
        let key = normalize(label);

        if let Some(document) = self.documents.get(&key) {
            return MatchResult::Exact(document.clone());
        }
        if key.is_empty() {
            return MatchResult::None;
        }

        let mut best: Option<(&LibraryDocument, f64)> = None;
        for (candidate, document) in &self.documents {
            // candidate first: the ratio is not symmetric
            let score = similarity::ratio(candidate.as_str(), key.as_str());
            if score < threshold {
                continue;
            }
            // strict comparison keeps the first (smallest) key on ties
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((document, score));
            }
        }

        match best {
            Some((document, score)) => MatchResult::Fuzzy(document.clone(), score),
            None => MatchResult::None,
        }
    }
}
