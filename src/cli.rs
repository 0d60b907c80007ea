//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use doc_composer::output::OutputConfig;

/// Document Composer - Assemble documents from a library of sections
#[derive(Parser, Debug)]
#[command(name = "doc-composer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["auto", "always", "never"]
    )]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose a document from a manifest, a library and a master template
    Compose(commands::compose::ComposeArgs),

    /// List the documents in a library with their matching keys
    Ls(commands::ls::LsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Compose(args) => commands::compose::execute(args, &output),
            Commands::Ls(args) => commands::ls::execute(args, &output),
        }
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compose_with_globals() {
        let cli = Cli::try_parse_from([
            "doc-composer",
            "--color",
            "never",
            "compose",
            "--manifest",
            "m.md",
            "--master",
            "master.xml",
            "--output",
            "out.xml",
            "--yes",
        ])
        .unwrap();
        assert_eq!(cli.color, "never");
        assert_eq!(cli.log_level, "warn");
        assert!(matches!(cli.command, Commands::Compose(ref a) if a.yes));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result = Cli::try_parse_from(["doc-composer", "--color", "purple", "ls"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_compose_requires_paths() {
        let result = Cli::try_parse_from(["doc-composer", "compose", "--manifest", "m.md"]);
        assert!(result.is_err());
    }
}
