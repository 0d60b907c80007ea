//! # Document Composer CLI
//!
//! This is the binary entry point for the `doc-composer` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the selected command.
//! - Translating top-level errors into messages and exit codes. A run the
//!   user declined (rejected fuzzy matches, refused to continue with missing
//!   sections) exits with status 0; every other failure exits with 1.
//!
//! The composition logic lives in the `doc_composer` library crate; the binary
//! is a thin wrapper around it.

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;

use doc_composer::error::Error;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<Error>() {
            Some(e) if e.is_user_declined() => {
                eprintln!("{e}");
                ExitCode::SUCCESS
            }
            _ => {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}
