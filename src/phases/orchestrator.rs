//! Orchestrator for the complete composition
//!
//! This module coordinates all phases behind a single call. Fatal conditions
//! stop the run before anything is written; recoverable ones (unresolved
//! entries, sources that fail to load, content that cannot be copied) are
//! collected as warnings on the returned [`CompositionReport`].

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::resolve::{self, Confirm, Resolution};
use super::write;
use crate::defaults::DEFAULT_FUZZY_THRESHOLD;
use crate::document::{DocumentFormat, WordPackage};
use crate::error::{Error, Result};
use crate::library::LibraryIndex;
use crate::manifest;
use crate::merge::MergeEngine;
use crate::suggestions;

/// Inputs of one composition run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeRequest {
    pub manifest: PathBuf,
    pub library: PathBuf,
    pub master: PathBuf,
    pub output: PathBuf,
    /// Inclusive fuzzy-match threshold
    pub threshold: f64,
    /// Extension of library documents, without the dot; `None` accepts
    /// every supported format
    pub extension: Option<String>,
    /// Run every phase except writing the output
    pub dry_run: bool,
}

impl ComposeRequest {
    pub fn new(
        manifest: impl Into<PathBuf>,
        library: impl Into<PathBuf>,
        master: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        ComposeRequest {
            manifest: manifest.into(),
            library: library.into(),
            master: master.into(),
            output: output.into(),
            threshold: DEFAULT_FUZZY_THRESHOLD,
            extension: None,
            dry_run: false,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A source document that made it into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedDocument {
    pub label: String,
    pub path: PathBuf,
    /// Blocks appended, separator excluded
    pub blocks: usize,
}

/// Result of a successful composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionReport {
    /// Every manifest entry with its match, in manifest order
    pub resolved: Vec<Resolution>,
    /// Documents actually merged, in output order
    pub merged: Vec<MergedDocument>,
    pub output: PathBuf,
    /// Bytes written, or that would have been written in a dry run
    pub output_size: u64,
    pub dry_run: bool,
    /// Recoverable problems, in the order they occurred
    pub warnings: Vec<String>,
}

/// Execute the complete composition.
///
/// The sequence is:
/// 1. Parse the manifest (`ManifestNotFound`, `ManifestEmpty`)
/// 2. Index the library (`LibraryNotFound`)
/// 3. Resolve every entry
/// 4. Confirm fuzzy matches (`FuzzyMatchRejected`)
/// 5. Require at least one resolved entry (`NoValidDocuments`)
/// 6. Confirm unresolved entries (`CompositionDeclined`)
/// 7. Check and load the master (`MasterNotFound`), load sources in parallel
/// 8. Merge in manifest order, skipping sources that failed to load
/// 9. Write and verify the output (`OutputWrite`), unless dry-running
pub fn execute(request: &ComposeRequest, confirm: &dyn Confirm) -> Result<CompositionReport> {
    let mut warnings = Vec::new();

    // Phase 1: Parsing
    let entries = manifest::from_file(&request.manifest)?;
    info!(
        "Manifest {} lists {} sections",
        request.manifest.display(),
        entries.len()
    );

    // Phase 2: Indexing
    let index = LibraryIndex::build(&request.library, request.extension.as_deref())?;
    for collision in index.collisions() {
        warnings.push(format!(
            "{} and {} both normalize to '{}'; using {}",
            file_name(&collision.replaced),
            file_name(&collision.kept),
            collision.key,
            file_name(&collision.kept)
        ));
    }

    // Phase 3: Resolution
    let resolved = resolve::execute(&entries, &index, request.threshold);

    // Phase 4: Confirmation
    let proposals = resolve::fuzzy_proposals(&resolved);
    if !proposals.is_empty() && !confirm.accept_fuzzy(&proposals) {
        return Err(suggestions::fuzzy_rejected(&index.available()));
    }

    let missing = resolve::unresolved(&resolved);
    if missing.len() == resolved.len() {
        return Err(suggestions::no_valid_documents(missing, &index.available()));
    }
    for label in &missing {
        warnings.push(format!("No match found for '{label}'"));
    }
    if !missing.is_empty() && !confirm.continue_with_missing(&missing) {
        return Err(Error::CompositionDeclined {
            missing: missing.len(),
        });
    }

    // Phase 5: Loading
    if !request.master.is_file() {
        return Err(suggestions::master_not_found(&request.master));
    }
    let master = WordPackage::open(&request.master)?;

    let documents: Vec<(&str, &Path)> = resolved
        .iter()
        .filter_map(|r| {
            r.result
                .document()
                .map(|doc| (r.entry.label.as_str(), doc.path.as_path()))
        })
        .collect();
    let loaded: Vec<Result<WordPackage>> = resolved
        .par_iter()
        .filter_map(|r| r.result.document())
        .map(|doc| doc.load())
        .collect();

    if loaded.iter().all(|l| l.is_err()) {
        for (result, (label, _)) in loaded.iter().zip(&documents) {
            if let Err(e) = result {
                warn!("Skipping '{}': {}", label, e);
            }
        }
        let labels = documents.iter().map(|(l, _)| l.to_string()).collect();
        return Err(suggestions::no_valid_documents(labels, &index.available()));
    }

    // Phase 6: Merging
    let mut engine = MergeEngine::new(master);
    let mut merged = Vec::with_capacity(documents.len());
    for (result, (label, path)) in loaded.into_iter().zip(documents) {
        match result {
            Ok(source) => {
                let outcome = engine.merge(&source, label)?;
                warnings.extend(outcome.warnings);
                merged.push(MergedDocument {
                    label: label.to_string(),
                    path: path.to_path_buf(),
                    blocks: outcome.blocks,
                });
            }
            Err(e) => {
                warn!("Skipping '{}': {}", label, e);
                warnings.push(format!("Skipped '{label}': {e}"));
            }
        }
    }
    let composed = engine.finish();

    // Phase 7: Writing
    let output_size = if request.dry_run {
        composed
            .to_bytes(DocumentFormat::for_path(&request.output))?
            .len() as u64
    } else {
        write::execute(&composed, &request.output)?
    };

    info!(
        "Composed {} of {} sections into {} ({} bytes{})",
        merged.len(),
        resolved.len(),
        request.output.display(),
        output_size,
        if request.dry_run { ", dry run" } else { "" }
    );

    Ok(CompositionReport {
        resolved,
        merged,
        output: request.output.clone(),
        output_size,
        dry_run: request.dry_run,
        warnings,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
