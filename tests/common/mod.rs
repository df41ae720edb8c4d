//! Shared fixture-building helpers for the integration tests: write a
//! minimal on-disk index directory (spec.md §6) and load it back through
//! the real `SparseIndex::load` path, rather than poking at `IndexData`
//! directly (that's only available to the in-crate unit tests).

use pufferfish_core::bitpacked::BitPackedVector;
use pufferfish_core::kmer::{encode_base, encode_kmer, CanonicalKmer};
use pufferfish_core::mphf::MinPerfHash;
use pufferfish_core::rank_select::RankSelectBitvector;
use std::path::Path;

/// One entry of the extension table (spec.md §3, "Extension table").
pub struct ExtEntry {
    pub codes: Vec<u64>,
    pub dir_fw: bool,
    pub canonical: bool,
}

/// Everything needed to serialize a fixture index directory.
pub struct Fixture {
    pub k: u8,
    pub extension_size: u32,
    /// 2-bit base codes for the whole concatenated unitig sequence.
    pub seq_codes: Vec<u64>,
    /// Positions (0-indexed into `seq_codes`) that are the last base of a
    /// unitig.
    pub boundary_positions: Vec<usize>,
    /// Canonical k-mer words actually present in the index, in MPHF slot
    /// order (slot == index into this vector).
    pub keys: Vec<u64>,
    /// `presence[h] = true` iff `keys[h]` is sampled.
    pub presence: Vec<bool>,
    /// Unitig position for each sampled key, in the order their `h`s
    /// appear (i.e. indexed by `rank1(presence, h)`).
    pub sampled_positions: Vec<u64>,
    /// One extension entry per unsampled key, in the same relative order.
    pub extensions: Vec<ExtEntry>,
    /// Contig offsets into the (refId, refPos) tables, one more entry
    /// than the number of unitigs (fencepost).
    pub contig_offsets: Vec<u64>,
    /// Parallel (refId, refPos, refIsFw) arrays indexed by contig ordinal.
    pub uref: Vec<u64>,
    pub upos_packed: Vec<u64>,
    pub ref_names: Vec<String>,
}

impl Fixture {
    pub fn write(&self, dir: &Path) {
        let info = serde_json::json!({
            "k": self.k,
            "num_kmers": self.keys.len() as u64,
            "num_sampled_kmers": self.sampled_positions.len() as u64,
            "extension_size": self.extension_size,
            "have_edge_vec": false,
            "have_ref_seq": false,
            "num_decoys": 0,
            "first_decoy_index": 0,
        });
        std::fs::write(dir.join("info.json"), info.to_string()).unwrap();

        let ctable = serde_json::json!({
            "ref_names": self.ref_names,
            "ref_ext": vec![0u32; self.ref_names.len()],
        });
        std::fs::write(dir.join("ctable.bin"), ctable.to_string()).unwrap();

        BitPackedVector::pack(&self.seq_codes, 2)
            .serialize(&dir.join("seq.bin"))
            .unwrap();

        RankSelectBitvector::from_set_positions(self.seq_codes.len(), &self.boundary_positions)
            .serialize(&dir.join("rank.bin"))
            .unwrap();

        MinPerfHash::build(&self.keys).save(&dir.join("mphf.bin")).unwrap();

        let presence_positions: Vec<usize> = self
            .presence
            .iter()
            .enumerate()
            .filter(|(_, &p)| p)
            .map(|(i, _)| i)
            .collect();
        RankSelectBitvector::from_set_positions(self.presence.len(), &presence_positions)
            .serialize(&dir.join("presence.bin"))
            .unwrap();

        BitPackedVector::pack(&self.sampled_positions, 32)
            .serialize(&dir.join("sample_pos.bin"))
            .unwrap();

        let mut ext_codes = Vec::new();
        let mut ext_starts = Vec::new();
        let mut ext_lens = Vec::new();
        let mut dir_positions = Vec::new();
        let mut canon_positions = Vec::new();
        for (i, e) in self.extensions.iter().enumerate() {
            ext_starts.push(ext_codes.len());
            ext_lens.push(e.codes.len() as u64);
            ext_codes.extend_from_slice(&e.codes);
            if e.dir_fw {
                dir_positions.push(i);
            }
            if e.canonical {
                canon_positions.push(i);
            }
        }
        BitPackedVector::pack(&ext_codes, 2)
            .serialize(&dir.join("extension_bp.bin"))
            .unwrap();
        RankSelectBitvector::from_set_positions(ext_codes.len().max(1), &ext_starts)
            .serialize(&dir.join("extension_bound.bin"))
            .unwrap();
        BitPackedVector::pack(&ext_lens, 8)
            .serialize(&dir.join("extension_size.bin"))
            .unwrap();
        RankSelectBitvector::from_set_positions(self.extensions.len().max(1), &dir_positions)
            .serialize(&dir.join("direction.bin"))
            .unwrap();
        RankSelectBitvector::from_set_positions(self.extensions.len().max(1), &canon_positions)
            .serialize(&dir.join("canonical.bin"))
            .unwrap();

        BitPackedVector::pack(&self.uref, 32)
            .serialize(&dir.join("uref.bin"))
            .unwrap();
        BitPackedVector::pack(&self.upos_packed, 40)
            .serialize(&dir.join("upos.bin"))
            .unwrap();
        BitPackedVector::pack(&self.contig_offsets, 32)
            .serialize(&dir.join("contig_offsets.bin"))
            .unwrap();
    }
}

pub fn canon_of(seq: &[u8]) -> u64 {
    CanonicalKmer::from_seq(seq).unwrap().canonical_word()
}

pub fn seq_codes(seq: &[u8]) -> Vec<u64> {
    seq.iter().map(|&b| encode_base(b).unwrap()).collect()
}

#[allow(dead_code)]
pub fn kmer_word(seq: &[u8]) -> u64 {
    encode_kmer(seq, seq.len() as u8).unwrap()
}
