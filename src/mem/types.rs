//! Per-read MEM data model (spec.md §3): `UniMemInfo`, `MemInfo`,
//! `MemCluster`, `RefMemMap`.

use fxhash::FxHashMap;

/// A k-mer hit anchored to its unitig, independent of any particular
/// reference decoding.
#[derive(Debug, Clone, Copy)]
pub struct UniMemInfo {
    pub contig_idx: u32,
    pub contig_orientation: bool,
    pub rpos: u32,
    pub k: u8,
    pub contig_pos: u32,
    pub global_unitig_start: u64,
    pub contig_len: u32,
    pub read_end: u32,
}

/// `UniMemInfo` projected onto one `(refId, isFw)` decoding.
///
/// `uni` indexes into the read's `memCollection` arena rather than holding
/// a direct reference, so the vector can grow (new hits being emplaced)
/// without invalidating entries already pushed into a `RefMemMap` bucket
/// (spec.md §9, "Pointer stability in memCollection").
#[derive(Debug, Clone, Copy)]
pub struct MemInfo {
    pub uni: usize,
    pub tpos: u64,
    pub is_fw: bool,
    pub extendedlen: u32,
    pub rpos: u32,
}

impl MemInfo {
    pub fn new(uni_idx: usize, uni: &UniMemInfo, tpos: u64, is_fw: bool) -> Self {
        MemInfo {
            uni: uni_idx,
            tpos,
            is_fw,
            extendedlen: uni.k as u32,
            rpos: uni.rpos,
        }
    }

    /// Sentinel `extendedlen` marking an entry removed by compaction
    /// (spec.md §4.5, "MEM compaction").
    pub const REMOVED: u32 = u32::MAX;

    pub fn is_removed(&self) -> bool {
        self.extendedlen == Self::REMOVED
    }
}

/// A chain for one `(refId, isFw)`.
#[derive(Debug, Clone)]
pub struct MemCluster {
    pub ref_id: u32,
    pub is_fw: bool,
    pub mems: Vec<MemInfo>,
    pub coverage: f64,
    pub perfect_chain: bool,
}

/// Mapping from `(refId, isFw)` to the list of `MemInfo` hits decoded
/// against that reference/orientation, built by `MemCollector::collect`
/// and consumed by `MemChainer::find_opt_chain`.
pub type RefMemMap = FxHashMap<(u32, bool), Vec<MemInfo>>;
