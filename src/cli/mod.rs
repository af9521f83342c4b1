//! Command Line Interface (CLI) layer for kinofetch.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the interactive session and
//! the batch `--query` mode. It wires user-provided options to the library
//! functionality exposed via `kinofetch::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
