//! Command-line surface. Per spec.md §1/§6, `index`/`align`/`validate`/
//! `lookup`/`examine` are external collaborators of the mapping core: this
//! module is the thinnest possible front door onto [`crate::index`] and
//! [`crate::mem`], mirroring `piscem`'s `Cli`/`Commands` split
//! (`piscem_commands.rs`) rather than reimplementing a production mapper's
//! full option surface.

pub mod align;
pub mod examine;
pub mod index_cmd;
pub mod lookup;
pub mod validate;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sparse k-mer index lookup and MEM chaining over a cdBG index.
#[derive(Debug, Parser)]
#[command(name = "pmap", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// be quiet (warnings and errors only).
    #[arg(short, long)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a cdBG index (out of scope for this crate; reports why).
    Index(index_cmd::IndexOpts),
    /// Map reads against a loaded index and print chain summaries.
    Align(align::AlignOpts),
    /// Check the on-disk invariants of spec.md §8 against a loaded index.
    Validate(validate::ValidateOpts),
    /// Project a single k-mer through the index and print the hit.
    Lookup(lookup::LookupOpts),
    /// Print index header/summary statistics.
    Examine(examine::ExamineOpts),
}

/// Shared `--index <dir>` argument every subcommand but `index` takes.
#[derive(Debug, Clone, clap::Args)]
pub struct IndexArg {
    /// Path to a directory holding the on-disk index layout of spec.md §6.
    #[arg(short, long)]
    pub index: PathBuf,
}
