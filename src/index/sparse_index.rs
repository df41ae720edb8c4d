//! The sparse k-mer index: `SparseIndex::project` (spec.md §4.3).

use crate::bitpacked::BitPackedVector;
use crate::error::IndexError;
use crate::index::extension::ExtensionTable;
use crate::index::layout::{self, ContigTable, IndexInfo};
use crate::kmer::{seq_window_to_kmer_word, CanonicalKmer, KmerMatchType};
use crate::rank_select::RankSelectBitvector;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// All read-only state loaded once at startup (spec.md §5: shared,
/// immutable, safe for arbitrary concurrent readers).
struct IndexData {
    k: u8,
    num_kmers: u64,
    last_seq_pos: u64,

    seq: BitPackedVector,
    boundary: RankSelectBitvector,
    mphf: crate::mphf::MinPerfHash,
    presence: RankSelectBitvector,
    sampled_pos: BitPackedVector,
    extension: ExtensionTable,

    uref_table: BitPackedVector,
    upos_table: BitPackedVector,
    contig_offsets: BitPackedVector,

    ref_names: Vec<String>,
    ref_lengths: Vec<u32>,
}

/// Sentinel contig index marking an empty/failed projection.
pub const EMPTY_CONTIG: u32 = u32::MAX;

#[derive(Debug, Clone)]
pub struct ProjectedHit {
    pub contig_idx: u32,
    pub global_pos: u64,
    pub contig_pos: u32,
    pub contig_orientation: bool,
    pub contig_len: u32,
    pub k: u8,
    ref_range: RefRangeBounds,
}

#[derive(Debug, Clone, Copy, Default)]
struct RefRangeBounds {
    start: u64,
    end: u64,
}

impl ProjectedHit {
    fn empty(k: u8) -> Self {
        ProjectedHit {
            contig_idx: EMPTY_CONTIG,
            global_pos: u64::MAX,
            contig_pos: u32::MAX,
            contig_orientation: true,
            contig_len: 0,
            k,
            ref_range: RefRangeBounds::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contig_idx == EMPTY_CONTIG
    }
}

/// Single-entry memoisation of the last resolved unitig boundaries, to
/// short-circuit the rank/select pair when consecutive queries fall in the
/// same unitig (spec.md §4.3, "Two-stage lookup with mutable cache").
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    prev_rank: Option<u64>,
    contig_start: u64,
    contig_end: u64,
}

/// Lazy iterator over `(refId, refPos, refIsFw)` decodings for one
/// projected hit, built from the `uref`/`upos` tables keyed by contig
/// ordinal (spec.md §6).
///
/// Position is packed as `(refPos << 1) | isFw` in `upos_table` — see
/// DESIGN.md for this choice.
pub struct RefRange {
    data: Arc<IndexData>,
    pos: u64,
    end: u64,
}

impl RefRange {
    fn new(data: Arc<IndexData>, bounds: RefRangeBounds) -> Self {
        RefRange {
            data,
            pos: bounds.start,
            end: bounds.end,
        }
    }

    pub fn size(&self) -> usize {
        (self.end - self.pos) as usize
    }
}

impl Iterator for RefRange {
    type Item = (u32, u64, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let ref_id = self.data.uref_table.get(self.pos as usize) as u32;
        let packed = self.data.upos_table.get(self.pos as usize);
        let ref_pos = packed >> 1;
        let is_fw = (packed & 1) == 1;
        self.pos += 1;
        Some((ref_id, ref_pos, is_fw))
    }
}

impl ExactSizeIterator for RefRange {
    fn len(&self) -> usize {
        self.size()
    }
}

#[derive(Clone)]
pub struct SparseIndex {
    data: Arc<IndexData>,
}

impl SparseIndex {
    pub fn k(&self) -> u8 {
        self.data.k
    }

    pub fn ref_name(&self, ref_id: u32) -> &str {
        &self.data.ref_names[ref_id as usize]
    }

    pub fn ref_len(&self, ref_id: u32) -> u32 {
        self.data.ref_lengths[ref_id as usize]
    }

    pub fn num_refs(&self) -> usize {
        self.data.ref_names.len()
    }

    /// Number of unitigs (`B`'s popcount, spec.md §3).
    pub fn num_unitigs(&self) -> u64 {
        self.data.boundary.popcount()
    }

    /// Number of sampled k-mers (`P`'s popcount, spec.md §3).
    pub fn num_sampled_kmers(&self) -> u64 {
        self.data.presence.popcount()
    }

    /// Total k-mers the MPHF was built over (`N` in spec.md's notation).
    pub fn num_kmers(&self) -> u64 {
        self.data.num_kmers
    }

    /// Check the structural invariants of spec.md §8 that can be verified
    /// purely from the loaded artifacts (without enumerating the full
    /// k-mer key space). Returns a list of violation descriptions; empty
    /// means every check passed.
    pub fn validate_structure(&self) -> Vec<String> {
        let d = &self.data;
        let mut problems = Vec::new();

        // Invariant: popcount(P) == |S| (spec.md §3, "Sampled positions").
        if d.presence.popcount() != d.sampled_pos.len() as u64 {
            problems.push(format!(
                "presence popcount {} does not match sampled_pos length {}",
                d.presence.popcount(),
                d.sampled_pos.len()
            ));
        }

        // Invariant: one boundary bit per unitig, and contig_offsets has
        // exactly one more entry than the number of unitigs (fencepost).
        let n_unitigs = d.boundary.popcount();
        if d.contig_offsets.len() as u64 != n_unitigs + 1 {
            problems.push(format!(
                "contig_offsets has {} entries but boundary implies {} unitigs",
                d.contig_offsets.len(),
                n_unitigs
            ));
        }

        // Invariant: B[p] = 1 iff p is the last nucleotide of a unitig —
        // spot-check that select1(rank1(len)-1) lands on the final base.
        if n_unitigs > 0 {
            let last = d.boundary.select1(n_unitigs - 1);
            if last as u64 != d.boundary.len() as u64 - 1 {
                problems.push(format!(
                    "last unitig boundary at {last} does not reach the end of seq ({})",
                    d.boundary.len() - 1
                ));
            }
        }

        problems
    }

    /// Project `kmer` without a cross-call cache.
    pub fn project(&self, kmer: &CanonicalKmer) -> ProjectedHit {
        let mut qc = QueryCache::default();
        self.project_with_cache(kmer, &mut qc)
    }

    /// Project `kmer`, using and updating `qc` to short-circuit repeated
    /// lookups that land in the same unitig (spec.md §4.3).
    pub fn project_with_cache(&self, kmer: &CanonicalKmer, qc: &mut QueryCache) -> ProjectedHit {
        let d = &self.data;
        let k = d.k;

        // Step 1: canonicalise.
        let mut mer = *kmer;
        if !mer.is_fw_canonical() {
            mer.swap();
        }
        let mut km = mer.word;

        // Step 2.
        let mut idx = d.mphf.lookup(km);
        if idx as u64 >= d.num_kmers {
            return ProjectedHit::empty(k);
        }

        let mut did_walk = false;
        let pos: u64;
        let mut rank = d.presence.rank1(idx);

        if d.presence.get(idx) {
            pos = d.sampled_pos.get(rank as usize);
        } else {
            did_walk = true;
            let extension_pos = idx - rank as usize;
            let ext = d.extension.get(extension_pos);

            if !ext.canonical && mer.is_fw_canonical() {
                mer.swap();
            }
            let (_ext, signed_shift) = d.extension.apply(extension_pos, &mut mer);

            km = mer.canonical_word();
            idx = d.mphf.lookup(km);
            if idx as u64 >= d.num_kmers {
                return ProjectedHit::empty(k);
            }
            rank = d.presence.rank1(idx);
            if !d.presence.get(idx) {
                return ProjectedHit::empty(k);
            }
            let sampled = d.sampled_pos.get(rank as usize) as i64;
            pos = (sampled + signed_shift) as u64;
        }

        self.get_ref_pos_helper(kmer, pos, Some(qc), did_walk)
    }

    fn get_ref_pos_helper(
        &self,
        mer: &CanonicalKmer,
        pos: u64,
        qc: Option<&mut QueryCache>,
        did_walk: bool,
    ) -> ProjectedHit {
        let d = &self.data;
        let k = d.k;
        if pos > d.last_seq_pos {
            return ProjectedHit::empty(k);
        }

        let fk = seq_window_to_kmer_word(d.seq.get_int(2 * pos, 2 * k as u32), k);
        let keq = mer.is_equivalent(fk);
        if keq == KmerMatchType::NoMatch {
            return ProjectedHit::empty(k);
        }

        let rank = d.boundary.rank1(pos as usize) as u64;

        // Step 7: boundary-crossing check, only needed after a walk.
        if did_walk && k > 1 {
            let crosses = d.boundary.get_int(pos, (k - 1) as u32);
            if crosses > 0 {
                return ProjectedHit::empty(k);
            }
        }

        let (start, end) = match qc {
            Some(qc) if qc.prev_rank == Some(rank) => (qc.contig_start, qc.contig_end),
            Some(qc) => {
                let start = if rank == 0 {
                    0
                } else {
                    d.boundary.select1(rank - 1) as u64 + 1
                };
                let end = d.boundary.select1(rank) as u64;
                qc.prev_rank = Some(rank);
                qc.contig_start = start;
                qc.contig_end = end;
                (start, end)
            }
            None => {
                let start = if rank == 0 {
                    0
                } else {
                    d.boundary.select1(rank - 1) as u64 + 1
                };
                let end = d.boundary.select1(rank) as u64;
                (start, end)
            }
        };

        let rel_pos = (pos - start) as u32;
        let clen = (end + 1 - start) as u32;
        let hit_fw = keq == KmerMatchType::Identity;

        let contig_range = self.contig_range(rank as u32);

        ProjectedHit {
            contig_idx: rank as u32,
            global_pos: pos,
            contig_pos: rel_pos,
            contig_orientation: hit_fw,
            contig_len: clen,
            k,
            ref_range: contig_range,
        }
    }

    fn contig_range(&self, contig_idx: u32) -> RefRangeBounds {
        let d = &self.data;
        let start = d.contig_offsets.get(contig_idx as usize);
        let end = d.contig_offsets.get(contig_idx as usize + 1);
        RefRangeBounds { start, end }
    }

    /// Materialise the lazy `refRange` for a given hit.
    pub fn ref_range(&self, hit: &ProjectedHit) -> RefRange {
        RefRange::new(self.data.clone(), hit.ref_range)
    }

    /// Load the on-disk layout of spec.md §6 from `dir`.
    pub fn load(dir: &Path) -> Result<Self, IndexError> {
        layout::require_dir(dir)?;

        info!(dir = %dir.display(), "loading sparse index");
        let info = IndexInfo::load(dir)?;
        let ctable = ContigTable::load(dir).unwrap_or_default();

        let seq = BitPackedVector::deserialize(&dir.join(layout::SEQ))?;
        let boundary = RankSelectBitvector::deserialize(&dir.join(layout::RANK))?;
        let mphf = crate::mphf::MinPerfHash::load(&dir.join(layout::MPH))?;
        let presence = RankSelectBitvector::deserialize(&dir.join(layout::PRESENCE))?;
        let sampled_pos = BitPackedVector::deserialize(&dir.join(layout::SAMPLEPOS))?;

        let ext_table = BitPackedVector::deserialize(&dir.join(layout::EXTENSION_BITPACKED))?;
        let ext_boundaries = RankSelectBitvector::deserialize(&dir.join(layout::EXTENSION_BOUNDARIES))?;
        let ext_size = BitPackedVector::deserialize(&dir.join(layout::EXTENSIONSIZE))?;
        let direction = RankSelectBitvector::deserialize(&dir.join(layout::DIRECTION))?;
        let canonical_ness = RankSelectBitvector::deserialize(&dir.join(layout::CANONICAL))?;
        let extension = ExtensionTable::new(
            ext_table,
            ext_boundaries,
            ext_size,
            direction,
            canonical_ness,
            info.extension_size,
        );

        let uref_table = BitPackedVector::deserialize(&dir.join(layout::UREFTABLE))?;
        let upos_table = BitPackedVector::deserialize(&dir.join(layout::UPOSTABLE))?;
        let contig_offsets = BitPackedVector::deserialize(&dir.join(layout::CONTIG_OFFSETS))?;

        let num_refs = ctable.ref_names.len();
        // spec.md's original falls back to a default fill when the
        // optional reference-length sidecar is absent (see SPEC_FULL.md §3.6).
        let ref_lengths = load_ref_lengths(dir, num_refs);

        let last_seq_pos = (seq.len() as u64).saturating_sub(info.k as u64);

        Ok(SparseIndex {
            data: Arc::new(IndexData {
                k: info.k,
                num_kmers: info.num_kmers,
                last_seq_pos,
                seq,
                boundary,
                mphf,
                presence,
                sampled_pos,
                extension,
                uref_table,
                upos_table,
                contig_offsets,
                ref_names: ctable.ref_names,
                ref_lengths,
            }),
        })
    }
}

fn load_ref_lengths(dir: &Path, num_refs: usize) -> Vec<u32> {
    let path = dir.join(layout::REFLENGTH);
    if let Ok(text) = std::fs::read_to_string(&path) {
        if let Ok(v) = serde_json::from_str::<Vec<u32>>(&text) {
            return v;
        }
    }
    vec![1000u32; num_refs]
}
