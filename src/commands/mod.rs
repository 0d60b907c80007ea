//! # CLI Command Implementations
//!
//! One module per subcommand of the `doc-composer` command-line tool.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct with the command's options, derived using `clap`.
//! - An `execute` function taking the parsed `Args` and the run's
//!   `OutputConfig`, calling into the `doc_composer` library for the work.

pub mod compose;
pub mod ls;
