//! `pmap align` — drive one or more reads through the mapping core and
//! print the resulting chain clusters. FASTA/FASTQ parsing and SAM/CIGAR
//! emission are out of scope (spec.md §1); this subcommand accepts a
//! minimal one-sequence-per-line (or single-line-FASTA) input just
//! sufficient to exercise `SparseIndex::project`, `MemCollector::collect`
//! and `MemChainer::find_opt_chain` end to end.

use crate::cli::IndexArg;
use crate::index::sparse_index::ProjectedHit;
use crate::index::SparseIndex;
use crate::kmer::CanonicalKmer;
use crate::mem::MemClusters;
use crate::worker::{ReadWorker, DEFAULT_MAX_ALLOWED_REFS_PER_HIT, DEFAULT_MAX_SPLICE_GAP};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, clap::Args)]
pub struct AlignOpts {
    #[command(flatten)]
    pub index_arg: IndexArg,

    /// Path to a text file with one read sequence per line (blank lines
    /// and lines starting with '>' are ignored, so a single-record-per-
    /// line FASTA also works).
    pub reads: PathBuf,

    /// `maxAllowedRefsPerHit` threshold (spec.md §4.4).
    #[arg(long, default_value_t = DEFAULT_MAX_ALLOWED_REFS_PER_HIT)]
    pub max_allowed_refs_per_hit: usize,

    /// `maxSpliceGap` passed to the chainer (spec.md §4.5).
    #[arg(long, default_value_t = DEFAULT_MAX_SPLICE_GAP)]
    pub max_splice_gap: u32,

    /// Disable the heuristic early-termination rule during chaining.
    #[arg(long)]
    pub no_heuristic: bool,
}

/// Enumerate every length-`k` window of `read` and project it through the
/// index, discarding windows that contain a non-ACGT base. This plays the
/// role of the "external k-mer iterator" spec.md's data-flow diagram
/// (§2) hands to `SparseIndex::project`.
fn collect_hits(index: &SparseIndex, read: &[u8]) -> Vec<(u32, ProjectedHit)> {
    let k = index.k() as usize;
    if read.len() < k {
        return Vec::new();
    }
    let mut qc = crate::index::QueryCache::default();
    let mut hits = Vec::with_capacity(read.len() - k + 1);
    for (rpos, window) in read.windows(k).enumerate() {
        if let Some(kmer) = CanonicalKmer::from_seq(window) {
            let hit = index.project_with_cache(&kmer, &mut qc);
            if !hit.is_empty() {
                hits.push((rpos as u32, hit));
            }
        }
    }
    hits
}

fn format_clusters(read_id: usize, read_len: u32, clusters: &MemClusters, index: &SparseIndex) -> String {
    let mut out = format!("read {read_id} (len={read_len})\n");
    let mut refs: Vec<&u32> = clusters.keys().collect();
    refs.sort();
    for ref_id in refs {
        for c in &clusters[ref_id] {
            out.push_str(&format!(
                "  ref={} ({}) strand={} mems={} coverage={} perfect={}\n",
                ref_id,
                index.ref_name(*ref_id),
                if c.is_fw { '+' } else { '-' },
                c.mems.len(),
                c.coverage,
                c.perfect_chain,
            ));
        }
    }
    out
}

pub fn run(opts: AlignOpts) -> Result<()> {
    let index = SparseIndex::load(&opts.index_arg.index)?;

    let text = std::fs::read_to_string(&opts.reads)
        .with_context(|| format!("reading reads file {:?}", opts.reads))?;
    let reads: Vec<Vec<u8>> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('>'))
        .map(|l| l.as_bytes().to_vec())
        .collect();

    info!(n_reads = reads.len(), "aligning reads");

    let results: Vec<String> = reads
        .par_iter()
        .enumerate()
        .map_init(
            || {
                ReadWorker::with_params(
                    opts.max_allowed_refs_per_hit,
                    opts.max_splice_gap,
                    !opts.no_heuristic,
                )
            },
            |worker, (read_id, read)| {
                let hits = collect_hits(&index, read);
                let mut clusters = MemClusters::default();
                let chained = worker.process_read(&hits, &index, read.len() as u32, &mut clusters);
                if !chained {
                    warn!(read_id, "no chain produced");
                    format!("read {read_id} (len={}): no chain\n", read.len())
                } else {
                    format_clusters(read_id, read.len() as u32, &clusters, &index)
                }
            },
        )
        .collect();

    for r in results {
        print!("{r}");
    }
    Ok(())
}
