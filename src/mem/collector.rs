//! Converts per-read projected hits into a `RefMemMap` (spec.md §4.4).
//!
//! Grounded on `MemChainer.cpp`'s `fillMemCollection`: emplace one
//! `UniMemInfo` per surviving hit into a pre-reserved arena, then fan out
//! its `refRange` decodings into the per-`(refId, isFw)` buckets.

use crate::index::sparse_index::{ProjectedHit, SparseIndex};
use crate::mem::types::{MemInfo, RefMemMap, UniMemInfo};
use smallvec::SmallVec;

pub struct MemCollector;

impl MemCollector {
    /// `hits` is `(readPos, projectedHit)` for one read. Returns `false`
    /// (and leaves both output containers empty) if `hits` is empty or
    /// every hit was filtered by `max_allowed_refs_per_hit`.
    pub fn collect(
        index: &SparseIndex,
        hits: &[(u32, ProjectedHit)],
        max_allowed_refs_per_hit: usize,
        mem_collection: &mut Vec<UniMemInfo>,
        ref_mem_map: &mut RefMemMap,
    ) -> bool {
        if hits.is_empty() {
            return false;
        }

        let surviving: SmallVec<[&(u32, ProjectedHit); 16]> = hits
            .iter()
            .filter(|(_, hit)| {
                !hit.is_empty() && index.ref_range(hit).size() < max_allowed_refs_per_hit
            })
            .collect();

        if surviving.is_empty() {
            return false;
        }

        mem_collection.reserve(surviving.len());
        ref_mem_map.clear();

        for (rpos, hit) in surviving {
            let read_end = rpos + hit.k as u32;
            let uni = UniMemInfo {
                contig_idx: hit.contig_idx,
                contig_orientation: hit.contig_orientation,
                rpos: *rpos,
                k: hit.k,
                contig_pos: hit.contig_pos,
                global_unitig_start: hit.global_pos - hit.contig_pos as u64,
                contig_len: hit.contig_len,
                read_end,
            };
            let uni_idx = mem_collection.len();
            mem_collection.push(uni);

            for (ref_id, ref_pos, ref_is_fw) in index.ref_range(hit) {
                let is_fw = ref_is_fw == hit.contig_orientation;
                let tpos = if hit.contig_orientation {
                    ref_pos + hit.contig_pos as u64
                } else {
                    ref_pos + (hit.contig_len - hit.contig_pos - hit.k as u32) as u64
                };
                let mem = MemInfo::new(uni_idx, &mem_collection[uni_idx], tpos, is_fw);
                ref_mem_map.entry((ref_id, is_fw)).or_default().push(mem);
            }
        }

        true
    }
}

// Exercised end-to-end (surviving-hit fan-out, max_allowed_refs_per_hit
// filtering, empty-input short-circuit) in tests/test_mem_pipeline.rs
// against a real loaded SparseIndex fixture.
