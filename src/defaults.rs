//! Default values for doc-composer configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Configuration file looked up in the working directory when no
/// `--config` flag or `DOC_COMPOSER_CONFIG` variable is given.
pub const DEFAULT_CONFIG_FILENAME: &str = ".doc-composer.yaml";

/// Library directory used when neither the CLI nor the config names one.
pub const DEFAULT_LIBRARY_DIR: &str = "./library";

/// Inclusive similarity a fuzzy candidate must reach to resolve.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// Returns the default library directory as a path.
pub fn default_library_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LIBRARY_DIR)
}
