//! Per-read scratch buffers, reused across reads to avoid allocator churn
//! (spec.md §5, "Scoped resource acquisition").
//!
//! Each `rayon` worker thread owns one `ReadWorker`; the index itself is
//! `Arc`-shared and never touched through `&mut`, so no locking is needed
//! across concurrent calls to [`ReadWorker::process_read`].

use crate::index::sparse_index::{ProjectedHit, SparseIndex};
use crate::mem::chainer::{MemChainer, MemClusters};
use crate::mem::collector::MemCollector;
use crate::mem::types::{RefMemMap, UniMemInfo};

/// Default `maxAllowedRefsPerHit` threshold (spec.md §4.4).
pub const DEFAULT_MAX_ALLOWED_REFS_PER_HIT: usize = 64;

/// Default `maxSpliceGap` passed to the chainer (spec.md §4.5 scenarios).
pub const DEFAULT_MAX_SPLICE_GAP: u32 = 100;

pub struct ReadWorker {
    mem_collection: Vec<UniMemInfo>,
    ref_mem_map: RefMemMap,
    max_allowed_refs_per_hit: usize,
    max_splice_gap: u32,
    heuristic_chaining: bool,
}

impl ReadWorker {
    pub fn new() -> Self {
        ReadWorker {
            mem_collection: Vec::new(),
            ref_mem_map: RefMemMap::default(),
            max_allowed_refs_per_hit: DEFAULT_MAX_ALLOWED_REFS_PER_HIT,
            max_splice_gap: DEFAULT_MAX_SPLICE_GAP,
            heuristic_chaining: true,
        }
    }

    pub fn with_params(max_allowed_refs_per_hit: usize, max_splice_gap: u32, heuristic_chaining: bool) -> Self {
        ReadWorker {
            mem_collection: Vec::new(),
            ref_mem_map: RefMemMap::default(),
            max_allowed_refs_per_hit,
            max_splice_gap,
            heuristic_chaining,
        }
    }

    /// Run the MEM-collection and chaining pipeline for one read's hits,
    /// filling `mem_clusters` with every accepted chain. Clears its
    /// internal scratch state on both entry and exit so a panic mid-read
    /// can't leak stale state into the next call.
    ///
    /// Returns `false` if `hits` produced no survivable mems (mirrors
    /// `MemCollector::collect`'s contract).
    pub fn process_read(
        &mut self,
        hits: &[(u32, ProjectedHit)],
        index: &SparseIndex,
        read_len: u32,
        mem_clusters: &mut MemClusters,
    ) -> bool {
        self.mem_collection.clear();
        self.ref_mem_map.clear();
        mem_clusters.clear();

        let collected = MemCollector::collect(
            index,
            hits,
            self.max_allowed_refs_per_hit,
            &mut self.mem_collection,
            &mut self.ref_mem_map,
        );
        if !collected {
            return false;
        }

        MemChainer::find_opt_chain(
            &mut self.ref_mem_map,
            mem_clusters,
            self.max_splice_gap,
            read_len,
            self.heuristic_chaining,
        )
    }
}

impl Default for ReadWorker {
    fn default() -> Self {
        Self::new()
    }
}
