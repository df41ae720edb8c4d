//! Fixed-width packed-integer array over a `u64` word buffer.
//!
//! Mirrors the on-disk layout described in spec.md §6: a stored element
//! width (`m_bits`), an element count, and a flat array of 64-bit words
//! holding the bit-packed elements back to back, least-significant-bit
//! first within each word.

use crate::bits::{get_bits, set_bits};
use crate::error::IndexError;
use std::io::Read;
use std::path::Path;

/// A fixed-width packed-integer array.
#[derive(Debug, Clone, Default)]
pub struct BitPackedVector {
    words: Vec<u64>,
    len: usize,
    bits: u32,
}

impl BitPackedVector {
    /// Build from already-packed words (used by tests and by loaders that
    /// construct the buffer directly rather than through `deserialize`).
    pub fn from_raw(words: Vec<u64>, len: usize, bits: u32) -> Self {
        assert!(bits > 0 && bits <= 64, "bit width must be in 1..=64");
        BitPackedVector { words, len, bits }
    }

    /// Pack `values` into a fresh vector using `bits` bits per element.
    pub fn pack(values: &[u64], bits: u32) -> Self {
        assert!(bits > 0 && bits <= 64, "bit width must be in 1..=64");
        let total_bits = values.len() as u64 * bits as u64;
        let n_words = ((total_bits + 63) / 64) as usize;
        let mut words = vec![0u64; n_words.max(1)];
        let mask = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
        for (i, &v) in values.iter().enumerate() {
            let bit_off = i as u64 * bits as u64;
            set_bits(&mut words, bit_off, bits, v & mask);
        }
        BitPackedVector {
            words,
            len: values.len(),
            bits,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bit_width(&self) -> u32 {
        self.bits
    }

    /// Read an arbitrary unaligned field of up to 64 bits, spanning at
    /// most two words, starting at `bit_offset`.
    #[inline]
    pub fn get_int(&self, bit_offset: u64, bit_width: u32) -> u64 {
        assert!(bit_width <= 64, "bit_width must be <= 64");
        get_bits(&self.words, bit_offset, bit_width)
    }

    /// Read the `idx`-th packed element (using the vector's own element
    /// width).
    #[inline]
    pub fn get(&self, idx: usize) -> u64 {
        debug_assert!(idx < self.len, "index {idx} out of bounds ({})", self.len);
        self.get_int(idx as u64 * self.bits as u64, self.bits)
    }

    /// Write the on-disk layout `deserialize` reads back: a little-endian
    /// header (`m_bits: u32`, `len: u64`) followed by the packed `u64`
    /// words. Used by test fixtures that build a throwaway index
    /// directory on disk; a real index builder would use the same layout.
    pub fn serialize(&self, path: &Path) -> std::io::Result<()> {
        let mut buf = Vec::with_capacity(12 + self.words.len() * 8);
        buf.extend_from_slice(&self.bits.to_le_bytes());
        buf.extend_from_slice(&(self.len as u64).to_le_bytes());
        for &w in &self.words {
            buf.extend_from_slice(&w.to_le_bytes());
        }
        std::fs::write(path, buf)
    }

    /// Load from the on-disk layout: a little-endian header
    /// (`m_bits: u32`, `len: u64`) followed by the packed `u64` words.
    pub fn deserialize(path: &Path) -> Result<Self, IndexError> {
        let mut f = std::fs::File::open(path)
            .map_err(|e| IndexError::missing_artifact(path, e))?;
        let mut hdr = [0u8; 12];
        f.read_exact(&mut hdr)
            .map_err(|_| IndexError::malformed_header(path))?;
        let bits = u32::from_le_bytes(hdr[0..4].try_into().unwrap());
        let len = u64::from_le_bytes(hdr[4..12].try_into().unwrap()) as usize;
        if bits == 0 || bits > 64 {
            return Err(IndexError::bit_width_out_of_range(path, bits));
        }
        let mut rest = Vec::new();
        f.read_to_end(&mut rest)
            .map_err(|_| IndexError::malformed_header(path))?;
        if rest.len() % 8 != 0 {
            return Err(IndexError::malformed_header(path));
        }
        let words: Vec<u64> = rest
            .chunks_exact(8)
            .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
            .collect();
        Ok(BitPackedVector { words, len, bits })
    }
}
