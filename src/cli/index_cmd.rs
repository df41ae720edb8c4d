//! `pmap index` — cdBG construction is explicitly out of scope (spec.md
//! §1: "Index construction ... Only the on-disk layout the core reads is
//! specified"). This stub exists so `pmap`'s subcommand list matches the
//! real program's (spec.md §6) without pretending to build an MPHF,
//! enumerate unitigs, or pick a sampling rate.

use anyhow::{bail, Result};
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub struct IndexOpts {
    /// Reference FASTA file(s) to index (accepted for CLI-shape parity
    /// only; construction is not implemented by this crate).
    #[arg(short = 's', long, value_delimiter = ',')]
    pub ref_seqs: Vec<PathBuf>,

    /// k-mer length the (unimplemented) build would use.
    #[arg(short, long, default_value_t = 31)]
    pub klen: u8,

    /// Output index directory.
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(_opts: IndexOpts) -> Result<()> {
    bail!(
        "index construction (cdBG build, unitig enumeration, MPHF \
         construction, sampling selection) is out of scope for this crate; \
         build the index with an external tool and point `pmap` at its \
         output directory with --index"
    )
}
