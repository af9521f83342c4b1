//! kinofetch CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, resolve the client
//! configuration, and run either the interactive loop or the given queries.
//! For programmatic use, prefer the library API (`kinofetch::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
