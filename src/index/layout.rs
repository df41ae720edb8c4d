//! The on-disk index layout of spec.md §6: filenames and the `info.json`
//! header. Construction of these artifacts is out of scope (spec.md §1);
//! this module only knows how to name and parse them.

use crate::error::IndexError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const INFO: &str = "info.json";
pub const MPH: &str = "mphf.bin";
pub const SEQ: &str = "seq.bin";
pub const RANK: &str = "rank.bin";
pub const PRESENCE: &str = "presence.bin";
pub const SAMPLEPOS: &str = "sample_pos.bin";
pub const EXTENSION_BITPACKED: &str = "extension_bp.bin";
pub const EXTENSION_BOUNDARIES: &str = "extension_bound.bin";
pub const EXTENSIONSIZE: &str = "extension_size.bin";
pub const DIRECTION: &str = "direction.bin";
pub const CANONICAL: &str = "canonical.bin";
pub const CTABLE: &str = "ctable.bin";
pub const UREFTABLE: &str = "uref.bin";
pub const UPOSTABLE: &str = "upos.bin";
pub const CONTIG_OFFSETS: &str = "contig_offsets.bin";
pub const REFLENGTH: &str = "reflengths.bin";
pub const REFACCUMLENGTH: &str = "refAccumLengths.bin";
pub const COMPLETEREFLENGTH: &str = "completeRefLengths.bin";
pub const REFSEQ: &str = "refseq.bin";
pub const EQTABLE: &str = "eqtable.bin";
pub const EDGE: &str = "edge.bin";

/// Parsed `info.json` header (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexInfo {
    pub k: u8,
    pub num_kmers: u64,
    pub num_sampled_kmers: u64,
    pub extension_size: u32,
    pub have_edge_vec: bool,
    pub have_ref_seq: bool,
    pub num_decoys: u32,
    pub first_decoy_index: u32,
}

impl IndexInfo {
    pub fn load(dir: &Path) -> Result<Self, IndexError> {
        let path = dir.join(INFO);
        let text = std::fs::read_to_string(&path)
            .map_err(|e| IndexError::missing_artifact(&path, e))?;
        serde_json::from_str(&text).map_err(|_| IndexError::malformed_header(&path))
    }
}

/// `(refNames, refExt)`, the contig table's reference-side metadata.
///
/// The original on-disk `ctable.bin` is a cereal binary archive; this crate
/// reads the same logical content from a JSON sidecar instead (see
/// DESIGN.md for the rationale — the exact byte layout of the original
/// serialization is not specified by spec.md beyond its field list).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContigTable {
    pub ref_names: Vec<String>,
    pub ref_ext: Vec<u32>,
}

impl ContigTable {
    pub fn load(dir: &Path) -> Result<Self, IndexError> {
        let path = dir.join(CTABLE);
        let text = std::fs::read_to_string(&path)
            .map_err(|e| IndexError::missing_artifact(&path, e))?;
        serde_json::from_str(&text).map_err(|_| IndexError::malformed_header(&path))
    }
}

pub fn artifact_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

pub fn require_dir(dir: &Path) -> Result<(), IndexError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(IndexError::missing_directory(dir))
    }
}
