//! `pmap lookup` — project a single k-mer through the index and print the
//! resulting `ProjectedHit` (spec.md §4.3), exercising exactly the
//! `SparseIndex::project` entry point spec.md §6 names as caller-facing.

use crate::cli::IndexArg;
use crate::index::SparseIndex;
use crate::kmer::CanonicalKmer;
use anyhow::{bail, Context, Result};

#[derive(Debug, clap::Args)]
pub struct LookupOpts {
    #[command(flatten)]
    pub index_arg: IndexArg,

    /// The k-mer to project (must be exactly `k` bases long, A/C/G/T).
    pub kmer: String,
}

pub fn run(opts: LookupOpts) -> Result<()> {
    let index = SparseIndex::load(&opts.index_arg.index)?;
    let k = index.k();
    if opts.kmer.len() != k as usize {
        bail!(
            "k-mer {:?} has length {} but this index was built with k={k}",
            opts.kmer,
            opts.kmer.len()
        );
    }
    let kmer = CanonicalKmer::from_seq(opts.kmer.as_bytes())
        .with_context(|| format!("k-mer {:?} contains a non-ACGT base", opts.kmer))?;

    let hit = index.project(&kmer);
    if hit.is_empty() {
        println!("not found");
        return Ok(());
    }

    println!("contig_idx         : {}", hit.contig_idx);
    println!("global_pos         : {}", hit.global_pos);
    println!("contig_pos         : {}", hit.contig_pos);
    println!("contig_orientation : {}", hit.contig_orientation);
    println!("contig_len         : {}", hit.contig_len);
    for (ref_id, ref_pos, ref_is_fw) in index.ref_range(&hit) {
        println!(
            "  -> ref {} ({}) pos {} {}",
            ref_id,
            index.ref_name(ref_id),
            ref_pos,
            if ref_is_fw { "+" } else { "-" }
        );
    }
    Ok(())
}
