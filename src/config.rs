//! # Configuration File
//!
//! Optional settings read from `.doc-composer.yaml` in the working directory,
//! or from the file named by `--config` / `DOC_COMPOSER_CONFIG`:
//!
//! ```yaml
//! library: ./library
//! fuzzy_threshold: 0.6
//! extension: docx      # default: both docx and xml
//! on_fuzzy: prompt      # prompt | accept | reject
//! on_missing: prompt    # prompt | continue | abort
//! ```
//!
//! Every key is optional. Values given on the command line (or through their
//! environment variables) take precedence over the file, and the file over
//! the built-in defaults.

use crate::defaults::{default_library_dir, DEFAULT_CONFIG_FILENAME, DEFAULT_FUZZY_THRESHOLD};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when resolution produced fuzzy matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuzzyPolicy {
    /// Ask on a terminal, reject otherwise
    #[default]
    Prompt,
    Accept,
    Reject,
}

/// What to do when some manifest entries have no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Ask on a terminal, continue otherwise
    #[default]
    Prompt,
    Continue,
    Abort,
}

/// Settings from the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Library directory; relative paths are taken from the working directory
    pub library: Option<PathBuf>,
    pub fuzzy_threshold: f64,
    /// Only index library files with this extension
    pub extension: Option<String>,
    pub on_fuzzy: FuzzyPolicy,
    pub on_missing: MissingPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            library: None,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            extension: None,
            on_fuzzy: FuzzyPolicy::default(),
            on_missing: MissingPolicy::default(),
        }
    }
}

impl Settings {
    /// Library directory: the command-line value if given, then the file's,
    /// then `./library`.
    pub fn library_dir(&self, from_cli: Option<&Path>) -> PathBuf {
        from_cli
            .map(Path::to_path_buf)
            .or_else(|| self.library.clone())
            .unwrap_or_else(default_library_dir)
    }

    fn validate(mut self) -> Result<Self> {
        if !self.fuzzy_threshold.is_finite() || !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(Error::ConfigParse {
                message: format!(
                    "fuzzy_threshold must be between 0.0 and 1.0, got {}",
                    self.fuzzy_threshold
                ),
                hint: Some(format!(
                    "The default is {DEFAULT_FUZZY_THRESHOLD}; higher values require closer matches"
                )),
            });
        }

        if let Some(extension) = self.extension.take() {
            let extension = extension.trim().trim_start_matches('.').to_string();
            if extension.is_empty() {
                return Err(Error::ConfigParse {
                    message: "extension must not be empty".to_string(),
                    hint: Some(
                        "Remove the key to index both .docx and .xml documents".to_string(),
                    ),
                });
            }
            self.extension = Some(extension);
        }

        Ok(self)
    }
}

/// Parse settings from YAML text. Empty text yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Settings> {
    if yaml_content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings =
        serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(
                "Valid keys are library, fuzzy_threshold, extension, on_fuzzy, on_missing"
                    .to_string(),
            ),
        })?;
    settings.validate()
}

/// Parse settings from a YAML file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load settings from `explicit`, or from `.doc-composer.yaml` in `working_dir`
/// if present, or fall back to the defaults.
///
/// An explicitly named file must exist.
pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Settings> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(Error::ConfigParse {
                message: format!("configuration file not found: {}", path.display()),
                hint: Some(format!(
                    "Remove --config to use ./{DEFAULT_CONFIG_FILENAME} or the built-in defaults"
                )),
            });
        }
        return from_file(path);
    }

    let implicit = working_dir.join(DEFAULT_CONFIG_FILENAME);
    if implicit.is_file() {
        log::debug!("Using configuration {}", implicit.display());
        return from_file(implicit);
    }
    Ok(Settings::default())
}
