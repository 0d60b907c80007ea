//! Implementation of the phases of a composition run.
//!
//! ## Overview
//!
//! A composition follows these phases:
//! 1. Parsing - Read the manifest into ordered entries
//! 2. Indexing - Build the normalized library index
//! 3. Resolution - Resolve every entry, exact then fuzzy ([`resolve`])
//! 4. Confirmation - Ask the [`resolve::Confirm`] strategy about fuzzy matches
//!    and unresolved entries
//! 5. Loading - Load the master and the resolved sources (sources in parallel)
//! 6. Merging - Append the sources onto the master in manifest order
//! 7. Writing - Persist and verify the output ([`write`])
//!
//! [`orchestrator::execute`] runs them in sequence. Every fatal condition is
//! detected before the output path is touched, so an aborted run never
//! leaves partial output behind.

pub mod orchestrator;
pub mod resolve;
pub mod write;

pub use orchestrator::{execute, ComposeRequest, CompositionReport, MergedDocument};
pub use resolve::{Confirm, FuzzyProposal, Policy, Resolution};
