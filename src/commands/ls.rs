//! # Ls Command Implementation
//!
//! Lists the documents of a library together with the normalized key each
//! one is matched by, which is the quickest way to see why a manifest label
//! does or does not resolve. Key collisions are reported after the listing.
//!
//! This command is read-only.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use doc_composer::config;
use doc_composer::library::LibraryIndex;
use doc_composer::output::{self, emoji, OutputConfig};

/// List library documents and their matching keys
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Library directory (defaults to the config's `library`, then ./library)
    #[arg(short, long, value_name = "DIR", env = "DOC_COMPOSER_LIBRARY")]
    pub library: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "DOC_COMPOSER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show only the number of documents
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, output: &OutputConfig) -> Result<()> {
    let working_dir = std::env::current_dir()?;
    let settings = config::load(args.config.as_deref(), &working_dir)?;
    let library = settings.library_dir(args.library.as_deref());

    let index = LibraryIndex::build(&library, settings.extension.as_deref())?;

    if args.count {
        println!("{}", index.len());
        return Ok(());
    }

    print!("{}", output::render_library(output, &index));
    for collision in index.collisions() {
        eprintln!(
            "{} {} is shadowed by {} (key '{}')",
            emoji(output, "⚠️ ", "[WARN]"),
            collision.replaced.display(),
            collision.kept.display(),
            collision.key
        );
    }

    Ok(())
}
