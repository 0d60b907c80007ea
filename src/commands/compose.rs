//! Compose command implementation
//!
//! Runs the full composition pipeline: parse the manifest, resolve every
//! section against the library, confirm fuzzy matches and missing sections,
//! merge onto the master template and write the output.
//!
//! Confirmation follows the configuration's `on_fuzzy` / `on_missing`
//! policies. `prompt` asks on the terminal when both stdin and stderr are
//! terminals; otherwise fuzzy matches are rejected and missing sections are
//! skipped. `--yes` answers yes to everything.

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm as Prompt};
use std::io::IsTerminal;
use std::path::PathBuf;

use doc_composer::config::{self, FuzzyPolicy, MissingPolicy, Settings};
use doc_composer::output::{self, emoji, OutputConfig};
use doc_composer::phases::{self, ComposeRequest, Confirm, FuzzyProposal};

/// Arguments for the compose command
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Manifest listing the sections to compose, one bullet per line
    #[arg(short, long, value_name = "PATH")]
    pub manifest: PathBuf,

    /// Master template the sections are appended to
    #[arg(long, value_name = "PATH")]
    pub master: PathBuf,

    /// Where to write the composed document (`.docx` is zipped, anything
    /// else is Flat OPC XML)
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Library directory (defaults to the config's `library`, then ./library)
    #[arg(short, long, value_name = "DIR", env = "DOC_COMPOSER_LIBRARY")]
    pub library: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "DOC_COMPOSER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimum similarity for a fuzzy match, between 0.0 and 1.0
    #[arg(long, value_name = "RATIO", value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Accept fuzzy matches and continue past missing sections without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Resolve and merge, but do not write the output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the composition report as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_threshold(value: &str) -> std::result::Result<f64, String> {
    let threshold: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(format!("{threshold} is not between 0.0 and 1.0"))
    }
}

/// Confirmation driven by configured policies, with optional prompting.
struct Confirmation<'a> {
    fuzzy: FuzzyPolicy,
    missing: MissingPolicy,
    assume_yes: bool,
    interactive: bool,
    output: &'a OutputConfig,
}

impl<'a> Confirmation<'a> {
    fn new(settings: &Settings, args: &ComposeArgs, output: &'a OutputConfig) -> Self {
        Confirmation {
            fuzzy: settings.on_fuzzy,
            missing: settings.on_missing,
            assume_yes: args.yes,
            interactive: std::io::stdin().is_terminal() && std::io::stderr().is_terminal(),
            output,
        }
    }

    fn ask(&self, question: &str) -> bool {
        Prompt::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(true)
            .interact_on(&console::Term::stderr())
            .unwrap_or(false)
    }
}

impl Confirm for Confirmation<'_> {
    fn accept_fuzzy(&self, proposals: &[FuzzyProposal]) -> bool {
        if self.assume_yes {
            return true;
        }
        match self.fuzzy {
            FuzzyPolicy::Accept => true,
            FuzzyPolicy::Reject => false,
            FuzzyPolicy::Prompt if self.interactive => {
                eprint!("{}", output::render_proposals(self.output, proposals));
                self.ask("Use these matches?")
            }
            FuzzyPolicy::Prompt => false,
        }
    }

    fn continue_with_missing(&self, missing: &[String]) -> bool {
        if self.assume_yes {
            return true;
        }
        match self.missing {
            MissingPolicy::Continue => true,
            MissingPolicy::Abort => false,
            MissingPolicy::Prompt if self.interactive => {
                eprintln!(
                    "{} No match for: {}",
                    emoji(self.output, "⚠️ ", "[WARN]"),
                    missing.join(", ")
                );
                self.ask("Continue without these sections?")
            }
            MissingPolicy::Prompt => true,
        }
    }
}

/// Execute the compose command
pub fn execute(args: ComposeArgs, output: &OutputConfig) -> Result<()> {
    let working_dir = std::env::current_dir()?;
    let settings = config::load(args.config.as_deref(), &working_dir)?;

    let request = ComposeRequest::new(
        &args.manifest,
        settings.library_dir(args.library.as_deref()),
        &args.master,
        &args.output,
    )
    .with_threshold(args.threshold.unwrap_or(settings.fuzzy_threshold))
    .with_extension(settings.extension.clone())
    .with_dry_run(args.dry_run);

    if !args.quiet && !args.json {
        println!(
            "{} Composing {} from {}",
            emoji(output, "📄", "[COMPOSE]"),
            request.output.display(),
            request.library.display()
        );
        println!();
    }

    let confirmation = Confirmation::new(&settings, &args, output);
    let report = phases::execute(&request, &confirmation)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !args.quiet {
        print!("{}", output::render_report(output, &report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(yes: bool) -> ComposeArgs {
        ComposeArgs {
            manifest: PathBuf::from("manifest.md"),
            master: PathBuf::from("master.xml"),
            output: PathBuf::from("out.xml"),
            library: None,
            config: None,
            threshold: None,
            yes,
            dry_run: false,
            quiet: true,
            json: false,
        }
    }

    fn confirmation<'a>(
        fuzzy: FuzzyPolicy,
        missing: MissingPolicy,
        yes: bool,
        output: &'a OutputConfig,
    ) -> Confirmation<'a> {
        Confirmation {
            fuzzy,
            missing,
            assume_yes: yes,
            interactive: false,
            output,
        }
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("0.75"), Ok(0.75));
        assert!(parse_threshold("1.5").is_err());
        assert!(parse_threshold("high").is_err());
    }

    #[test]
    fn test_prompt_policy_without_terminal() {
        let output = OutputConfig::from_env_and_flag("never");
        let c = confirmation(FuzzyPolicy::Prompt, MissingPolicy::Prompt, false, &output);
        assert!(!c.accept_fuzzy(&[]));
        assert!(c.continue_with_missing(&["x".to_string()]));
    }

    #[test]
    fn test_fixed_policies() {
        let output = OutputConfig::from_env_and_flag("never");
        let c = confirmation(FuzzyPolicy::Accept, MissingPolicy::Abort, false, &output);
        assert!(c.accept_fuzzy(&[]));
        assert!(!c.continue_with_missing(&[]));
    }

    #[test]
    fn test_yes_overrides_policies() {
        let output = OutputConfig::from_env_and_flag("never");
        let c = confirmation(FuzzyPolicy::Reject, MissingPolicy::Abort, true, &output);
        assert!(c.accept_fuzzy(&[]));
        assert!(c.continue_with_missing(&[]));
    }

    #[test]
    fn test_new_takes_policies_from_settings() {
        let output = OutputConfig::from_env_and_flag("never");
        let settings = Settings {
            on_fuzzy: FuzzyPolicy::Accept,
            ..Settings::default()
        };
        let c = Confirmation::new(&settings, &args(false), &output);
        assert_eq!(c.fuzzy, FuzzyPolicy::Accept);
        assert_eq!(c.missing, MissingPolicy::Prompt);
        assert!(!c.assume_yes);
    }
}
