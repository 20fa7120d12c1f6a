//! roadtrace CLI library.
//!
//! Subcommand handlers and output formatting for the `roadtrace-cli` binary.

pub mod commands;
pub mod output;
