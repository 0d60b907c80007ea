//! # Terminal Output
//!
//! Rendering of resolution results and composition reports for the CLI, and
//! the colour/emoji switch that goes with it.
//!
//! Colour is decided once per run from the `--color` flag and the usual
//! environment conventions: `NO_COLOR`, `CLICOLOR=0`, `CLICOLOR_FORCE=1` and
//! `TERM=dumb`. When colour is off, emoji are replaced by bracketed tags so
//! the output stays greppable.
//!
//! Renderers return `String`s; the caller decides where they go.

use console::style;
use std::env;
use std::fmt::Write;

use crate::library::{LibraryIndex, MatchResult};
use crate::phases::{CompositionReport, FuzzyProposal};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Build from the `--color` flag value: `always`, `never` or `auto`.
    ///
    /// `always` wins over `NO_COLOR`; `auto` consults the environment and
    /// whether stdout is a terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // presence alone disables, even when empty
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// `emoji_str` when colour is on, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

fn percent(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// One line per manifest entry describing how it resolved.
pub fn render_resolution(config: &OutputConfig, report: &CompositionReport) -> String {
    let mut out = String::new();
    for resolution in &report.resolved {
        let label = &resolution.entry.label;
        let _ = match &resolution.result {
            MatchResult::Exact(doc) => writeln!(
                out,
                "  {} {} -> {}",
                emoji(config, "✅", "[OK]"),
                label,
                doc.file_name()
            ),
            MatchResult::Fuzzy(doc, score) => writeln!(
                out,
                "  {} {} -> {} ({} match)",
                emoji(config, "🔎", "[FUZZY]"),
                label,
                doc.file_name(),
                percent(*score)
            ),
            MatchResult::None => writeln!(
                out,
                "  {} {} (no match)",
                emoji(config, "❌", "[MISSING]"),
                label
            ),
        };
    }
    out
}

/// Summary of a finished composition, warnings included.
pub fn render_report(config: &OutputConfig, report: &CompositionReport) -> String {
    let mut out = render_resolution(config, report);
    out.push('\n');

    for warning in &report.warnings {
        let _ = writeln!(out, "{} {}", emoji(config, "⚠️ ", "[WARN]"), warning);
    }
    if !report.warnings.is_empty() {
        out.push('\n');
    }

    let headline = if report.dry_run {
        format!(
            "{} Dry run: would write {} ({} bytes)",
            emoji(config, "🔎", "[DRY RUN]"),
            report.output.display(),
            report.output_size
        )
    } else {
        format!(
            "{} Composed {} ({} bytes)",
            emoji(config, "✅", "[DONE]"),
            report.output.display(),
            report.output_size
        )
    };
    let headline = if config.use_color {
        style(headline).green().bold().to_string()
    } else {
        headline
    };
    let _ = writeln!(out, "{headline}");
    let _ = writeln!(
        out,
        "   {} of {} sections merged",
        report.merged.len(),
        report.resolved.len()
    );
    out
}

/// Fuzzy matches as shown before asking for confirmation.
pub fn render_proposals(config: &OutputConfig, proposals: &[FuzzyProposal]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} Some sections matched approximately:",
        emoji(config, "🔎", "[FUZZY]")
    );
    for proposal in proposals {
        let _ = writeln!(
            out,
            "  {} -> {} ({} match)",
            proposal.label,
            proposal.candidate,
            percent(proposal.score)
        );
    }
    out
}

/// Library listing for the `ls` command: stem and normalized key per line.
pub fn render_library(config: &OutputConfig, index: &LibraryIndex) -> String {
    let width = index.documents().map(|d| d.stem.len()).max().unwrap_or(0);
    let mut out = String::new();
    for doc in index.documents() {
        let key = if config.use_color {
            style(doc.key.as_str()).dim().to_string()
        } else {
            doc.key.to_string()
        };
        let _ = writeln!(out, "{:<width$}  {}", doc.stem, key);
    }
    out
}
