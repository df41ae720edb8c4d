//! Recovers an unsampled k-mer's unitig position via the bounded walk of
//! spec.md §3 ("Extension table") and §4.3 step 5.
//!
//! Each unsampled k-mer (indexed by `h - rank1(P, h)`) stores a direction
//! bit, a canonical-ness bit, and a short run of 2-bit base codes; applying
//! those codes in sequence shifts the query k-mer to a neighbour that *is*
//! sampled, at which point its position can be read directly and corrected
//! by the accumulated signed shift.

use crate::bitpacked::BitPackedVector;
use crate::kmer::CanonicalKmer;
use crate::rank_select::RankSelectBitvector;

/// The `E` table: per-unsampled-kmer direction, canonical-ness, and base
/// codes, bit-packed as described in spec.md §3/§6.
pub struct ExtensionTable {
    /// Concatenated 2-bit base codes for every entry, back to back.
    ext_table: BitPackedVector,
    /// Marks the start code-index of each entry within `ext_table`.
    ext_boundaries: RankSelectBitvector,
    /// Per-entry code count.
    ext_size: BitPackedVector,
    /// Per-entry direction bit (1 = shift forward).
    direction: RankSelectBitvector,
    /// Per-entry canonical-ness bit.
    canonical_ness: RankSelectBitvector,
    /// Maximum extension length (`extensionSize` in spec.md).
    extension_size: u32,
}

/// One decoded extension entry.
pub struct Extension {
    /// Base codes left-aligned within a 2*`extension_size`-bit word, as
    /// described in spec.md §4.3 step 5d (so code `i` sits at bit offset
    /// `2*(i-1)` counting from 1 at the top).
    pub word: u64,
    pub len: u32,
    pub dir_fw: bool,
    pub canonical: bool,
}

impl ExtensionTable {
    pub fn new(
        ext_table: BitPackedVector,
        ext_boundaries: RankSelectBitvector,
        ext_size: BitPackedVector,
        direction: RankSelectBitvector,
        canonical_ness: RankSelectBitvector,
        extension_size: u32,
    ) -> Self {
        ExtensionTable {
            ext_table,
            ext_boundaries,
            ext_size,
            direction,
            canonical_ness,
            extension_size,
        }
    }

    pub fn extension_size(&self) -> u32 {
        self.extension_size
    }

    /// Decode entry `ep` (the extension-entry index `h - rank1(P, h)`).
    pub fn get(&self, ep: usize) -> Extension {
        let start = self.ext_boundaries.select1(ep as u64);
        let len = self.ext_size.get(ep) as u32;
        let raw = self.ext_table.get_int(start as u64 * 2, len * 2);
        let word = raw << (2 * (self.extension_size - len));
        Extension {
            word,
            len,
            dir_fw: self.direction.get(ep),
            canonical: self.canonical_ness.get(ep),
        }
    }

    /// Apply entry `ep`'s recorded shifts to `mer`, mutating it in place and
    /// returning the accumulated `signedShift` (spec.md §4.3 step 5d:
    /// negative if the walk moved forward, positive if backward).
    ///
    /// `mer` must already have been swapped to match the extension's
    /// recorded orientation by the caller (spec.md step 5c) before calling.
    pub fn apply(&self, ep: usize, mer: &mut CanonicalKmer) -> (Extension, i64) {
        let ext = self.get(ep);
        let mut signed_shift: i64 = 0;
        let llimit = self.extension_size - ext.len;
        if ext.dir_fw {
            for i in (llimit + 1..=self.extension_size).rev() {
                let shift = 2 * (i - 1);
                let code = (ext.word >> shift) & 0x3;
                mer.shift_fw(code);
                signed_shift -= 1;
            }
        } else {
            for i in (llimit + 1..=self.extension_size).rev() {
                let shift = 2 * (i - 1);
                let code = (ext.word >> shift) & 0x3;
                mer.shift_bw(code);
                signed_shift += 1;
            }
        }
        (ext, signed_shift)
    }
}
