//! `pmap` binary entry point: parse CLI args, initialize `tracing`
//! (mirroring `piscem`'s `main.rs` quiet/verbose split), and dispatch to
//! the subcommand handlers in [`pufferfish_core::cli`].

use anyhow::Result;
use clap::Parser;
use pufferfish_core::cli::{Cli, Commands};
use std::io;
use tracing::Level;

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet { Level::WARN } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Index(opts) => pufferfish_core::cli::index_cmd::run(opts),
        Commands::Align(opts) => pufferfish_core::cli::align::run(opts),
        Commands::Validate(opts) => pufferfish_core::cli::validate::run(opts),
        Commands::Lookup(opts) => pufferfish_core::cli::lookup::run(opts),
        Commands::Examine(opts) => pufferfish_core::cli::examine::run(opts),
    }
}
