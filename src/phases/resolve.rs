//! Phase 3 and 4: Resolution and Confirmation
//!
//! Resolution is pure: every manifest entry is matched against the library
//! index and the results are returned in manifest order. Deciding what to do
//! about fuzzy matches and unresolved entries is delegated to a [`Confirm`]
//! strategy, so batch runs and tests never block on a prompt.

use log::{debug, info};
use serde::Serialize;

use crate::library::{LibraryIndex, MatchResult};
use crate::manifest::ManifestEntry;

/// A manifest entry with its match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub entry: ManifestEntry,
    pub result: MatchResult,
}

/// A fuzzy match awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyProposal {
    /// Label as written in the manifest
    pub label: String,
    /// Stem of the library document it would resolve to
    pub candidate: String,
    pub score: f64,
}

/// Decides whether a composition may proceed.
pub trait Confirm {
    /// Called once, with every fuzzy match of the run, when there is any.
    fn accept_fuzzy(&self, proposals: &[FuzzyProposal]) -> bool;

    /// Called once, with every unresolved label, when some entries resolved
    /// and some did not.
    fn continue_with_missing(&self, missing: &[String]) -> bool;
}

/// Fixed answers for non-interactive runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub accept_fuzzy: bool,
    pub continue_with_missing: bool,
}

impl Policy {
    /// Accept fuzzy matches and continue past missing entries.
    pub fn accept_all() -> Self {
        Policy {
            accept_fuzzy: true,
            continue_with_missing: true,
        }
    }
}

impl Default for Policy {
    /// Reject fuzzy matches, continue past missing entries.
    fn default() -> Self {
        Policy {
            accept_fuzzy: false,
            continue_with_missing: true,
        }
    }
}

impl Confirm for Policy {
    fn accept_fuzzy(&self, _proposals: &[FuzzyProposal]) -> bool {
        self.accept_fuzzy
    }

    fn continue_with_missing(&self, _missing: &[String]) -> bool {
        self.continue_with_missing
    }
}

/// Resolve every entry against the index, in manifest order.
pub fn execute(entries: &[ManifestEntry], index: &LibraryIndex, threshold: f64) -> Vec<Resolution> {
    entries
        .iter()
        .map(|entry| {
            let result = index.resolve(&entry.label, threshold);
            match &result {
                MatchResult::Exact(doc) => {
                    debug!("'{}' -> {} (exact)", entry.label, doc.file_name())
                }
                MatchResult::Fuzzy(doc, score) => info!(
                    "'{}' -> {} (fuzzy, {:.0}%)",
                    entry.label,
                    doc.file_name(),
                    score * 100.0
                ),
                MatchResult::None => info!("'{}' has no match", entry.label),
            }
            Resolution {
                entry: entry.clone(),
                result,
            }
        })
        .collect()
}

/// Fuzzy matches among `resolutions`, in manifest order.
pub fn fuzzy_proposals(resolutions: &[Resolution]) -> Vec<FuzzyProposal> {
    resolutions
        .iter()
        .filter_map(|r| match &r.result {
            MatchResult::Fuzzy(doc, score) => Some(FuzzyProposal {
                label: r.entry.label.clone(),
                candidate: doc.stem.clone(),
                score: *score,
            }),
            _ => None,
        })
        .collect()
}

/// Labels of the unresolved entries, in manifest order.
pub fn unresolved(resolutions: &[Resolution]) -> Vec<String> {
    resolutions
        .iter()
        .filter(|r| !r.result.is_resolved())
        .map(|r| r.entry.label.clone())
        .collect()
}
