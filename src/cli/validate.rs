//! `pmap validate` — check the structural invariants of spec.md §8 that
//! can be verified from the loaded artifacts without enumerating the
//! full k-mer key space (that would require re-deriving the MPHF's
//! input, which index construction owns, not this crate).

use crate::cli::IndexArg;
use crate::index::SparseIndex;
use anyhow::{bail, Result};

#[derive(Debug, clap::Args)]
pub struct ValidateOpts {
    #[command(flatten)]
    pub index_arg: IndexArg,
}

pub fn run(opts: ValidateOpts) -> Result<()> {
    let index = SparseIndex::load(&opts.index_arg.index)?;
    let problems = index.validate_structure();
    if problems.is_empty() {
        println!("ok: {} unitigs, {} sampled k-mers", index.num_unitigs(), index.num_sampled_kmers());
        Ok(())
    } else {
        for p in &problems {
            eprintln!("invariant violation: {p}");
        }
        bail!("{} invariant violation(s) found", problems.len());
    }
}
