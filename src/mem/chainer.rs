//! Li 2018-style sparse DP chaining over a read's `RefMemMap` (spec.md §4.5).
//!
//! Grounded on `MemChainer.cpp`'s `findOptChain`: consensus filter, sort,
//! compaction scan, DP with `alpha`/`beta`, heuristic early termination,
//! tie-preserving backtrack, defensive re-compaction of the emitted
//! cluster.

use crate::mem::types::{MemCluster, MemInfo, RefMemMap};
use fxhash::FxHashMap;
use smallvec::SmallVec;

/// Fraction of the running-max hit count below which a `(refId, isFw)`
/// key is skipped outright (spec.md §4.5, "Consensus filter").
pub const DEFAULT_CONSENSUS_FRACTION: f64 = 0.65;

/// Heuristic successful-extension budget before a chain scan breaks early
/// (spec.md §4.5, "Termination heuristics").
const HEURISTIC_ROUNDS: i32 = 2;

/// `alpha(qdiff, rdiff, ilen)`: bounded match-length contribution.
pub fn alpha(qdiff: i64, rdiff: i64, ilen: i64) -> f64 {
    let min_diff = qdiff.min(rdiff) as f64;
    (ilen as f64).min(min_diff)
}

/// `beta(qdiff, rdiff, avgseed)`: log-linear gap penalty, `+inf` outside
/// the splice-gap budget or on a backward read-gap.
pub fn beta(qdiff: i64, rdiff: i64, avgseed: f64, max_splice_gap: u32) -> f64 {
    if qdiff < 0 || qdiff.max(rdiff) as u64 > max_splice_gap as u64 {
        return f64::INFINITY;
    }
    let l = qdiff - rdiff;
    let al = l.unsigned_abs() as f64;
    if al == 0.0 {
        0.0
    } else {
        0.05 * avgseed * al + 0.5 * al.log2()
    }
}

/// Grow-in-place compaction of overlapping/abutting MEMs along both the
/// read and reference axes (spec.md §4.5, "MEM compaction"; also used as
/// the defensive post-chain pass).
///
/// `mem_list` must already be sorted by `(tpos + extendedlen)` ascending,
/// ties broken by read-end position (ascending when `is_fw`, descending
/// otherwise) — callers are responsible for that sort before the first
/// call; the defensive second pass on an emitted cluster relies on the
/// cluster already being in chained (and therefore compatible) order.
fn compact(mem_list: &mut Vec<MemInfo>, is_fw: bool) {
    if mem_list.is_empty() {
        return;
    }
    let mut prev_qend: i64 = 0;
    let mut prev_rend: i64 = 0;
    let mut current_idx: usize = 0;

    for i in 0..mem_list.len() {
        let (qstart, qend, rstart, rend) = {
            let hi = &mem_list[i];
            let qstart = if is_fw {
                hi.rpos as i64
            } else {
                // readLen isn't needed here: qstart/qend only feed the
                // overlap comparison below, which is translation-invariant.
                -(hi.rpos as i64 + hi.extendedlen as i64)
            };
            let qend = if is_fw {
                hi.rpos as i64 + hi.extendedlen as i64
            } else {
                -(hi.rpos as i64)
            };
            let rstart = hi.tpos as i64;
            let rend = hi.tpos as i64 + hi.extendedlen as i64;
            (qstart, qend, rstart, rend)
        };

        let overlap_read = prev_qend - qstart;
        let overlap_ref = prev_rend - rstart;

        if i > 0 && overlap_ref >= 0 && overlap_ref == overlap_read {
            let extension = (rend - prev_rend) as u32;
            let new_rpos = mem_list[i].rpos;
            mem_list[current_idx].extendedlen += extension;
            if !is_fw {
                mem_list[current_idx].rpos = new_rpos;
            }
            mem_list[i].extendedlen = MemInfo::REMOVED;
        } else {
            current_idx = i;
        }

        prev_qend = qend;
        prev_rend = rend;
    }

    mem_list.retain(|m| !m.is_removed());
}

/// This read's compacted/chained clusters keyed by reference id — more
/// than one `(refId, isFw)` key may map to it if both the forward and
/// reverse strand produced distinct chains.
pub type MemClusters = FxHashMap<u32, Vec<MemCluster>>;

pub struct MemChainer;

impl MemChainer {
    /// Chain every `(refId, isFw)` bucket of `ref_mem_map`, appending
    /// accepted clusters into `mem_clusters`. Returns `false` (emitting
    /// nothing) if `ref_mem_map` is empty.
    ///
    /// # Panics
    /// Panics (invariant violation, spec.md §7) if backtracking from an
    /// accepted chain end ever produces a negative index — this can only
    /// happen if `p[]` was left uninitialized, which the DP below never
    /// does for a non-empty `mem_list`.
    pub fn find_opt_chain(
        ref_mem_map: &mut RefMemMap,
        mem_clusters: &mut MemClusters,
        max_splice_gap: u32,
        read_len: u32,
        heuristic: bool,
    ) -> bool {
        if ref_mem_map.is_empty() {
            return false;
        }

        let avgseed = 31.0f64;
        let mut max_hits: usize = 0;

        for ((ref_id, is_fw), mem_list) in ref_mem_map.iter_mut() {
            let n_hits = mem_list.len();
            if (n_hits as f64) < DEFAULT_CONSENSUS_FRACTION * max_hits as f64 {
                continue;
            }
            if n_hits > max_hits {
                max_hits = n_hits;
            }

            mem_list.sort_by(|a, b| {
                let aref = a.tpos + a.extendedlen as u64;
                let bref = b.tpos + b.extendedlen as u64;
                if aref != bref {
                    aref.cmp(&bref)
                } else {
                    let aread = a.rpos + a.extendedlen;
                    let bread = b.rpos + b.extendedlen;
                    if *is_fw {
                        aread.cmp(&bread)
                    } else {
                        bread.cmp(&aread)
                    }
                }
            });

            compact(mem_list, *is_fw);
            if mem_list.is_empty() {
                continue;
            }

            let n = mem_list.len();
            let mut f = vec![0.0f64; n];
            let mut p = vec![0usize; n];

            let mut best_score = f64::MIN;
            let mut best_chain_ends: SmallVec<[usize; 4]> = SmallVec::new();

            for i in 0..n {
                let hi = &mem_list[i];
                let qi = hi.rpos as i64 + hi.extendedlen as i64;
                let ri = hi.tpos as i64 + hi.extendedlen as i64;
                f[i] = hi.extendedlen as f64;
                p[i] = i;

                let mut rounds = HEURISTIC_ROUNDS;
                for j in (0..i).rev() {
                    let hj = &mem_list[j];
                    let qj = hj.rpos as i64 + hj.extendedlen as i64;
                    let rj = hj.tpos as i64 + hj.extendedlen as i64;

                    let qdiff = if *is_fw {
                        qi - qj
                    } else {
                        (qj - hj.extendedlen as i64) - (qi - hi.extendedlen as i64)
                    };
                    let rdiff = ri - rj;

                    let score = f[j] + alpha(qdiff, rdiff, hi.extendedlen as i64)
                        - beta(qdiff, rdiff, avgseed, max_splice_gap);

                    if score > f[i] {
                        f[i] = score;
                        p[i] = j;
                    }

                    if heuristic && p[i] != i {
                        rounds -= 1;
                        if rounds <= 0 {
                            break;
                        }
                    }
                    if rdiff > 2 * read_len as i64 {
                        break;
                    }
                }

                if f[i] > best_score {
                    best_score = f[i];
                    best_chain_ends.clear();
                    best_chain_ends.push(i);
                } else if f[i] == best_score {
                    best_chain_ends.push(i);
                }
            }

            let mut seen = vec![false; n];
            let mut new_clusters = Vec::new();

            for end in best_chain_ends {
                let mut should_add = true;
                let mut indices_rev: SmallVec<[usize; 8]> = SmallVec::new();
                let mut cur = end;
                let mut last_ptr = p[cur];
                while last_ptr < cur {
                    if seen[cur] {
                        should_add = false;
                    }
                    indices_rev.push(cur);
                    seen[cur] = true;
                    cur = last_ptr;
                    last_ptr = p[cur];
                }
                if seen[cur] {
                    should_add = false;
                }
                indices_rev.push(cur);

                if should_add {
                    let mut mems: Vec<MemInfo> =
                        indices_rev.iter().rev().map(|&idx| mem_list[idx]).collect();
                    compact(&mut mems, *is_fw);
                    let perfect_chain = best_score == read_len as f64;
                    new_clusters.push(MemCluster {
                        ref_id: *ref_id,
                        is_fw: *is_fw,
                        mems,
                        coverage: best_score,
                        perfect_chain,
                    });
                }
            }

            mem_clusters.entry(*ref_id).or_default().extend(new_clusters);
        }

        true
    }
}
