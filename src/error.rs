//! Error taxonomy for the mapping core (spec.md §7).
//!
//! `NotFound`, `Filtered`, and `EmptyInput` are recovered locally and never
//! surface as `Err` — they show up as sentinel values (`ProjectedHit`'s
//! `contigIdx = MAX`, a skipped hit, a `false` return) per the lookup/collect
//! paths' "never throw" policy. Only the load-time failures below are
//! represented as a real error type, since those are the ones allowed to
//! abort the process.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors that can occur while loading index artifacts from disk.
///
/// These are the only error conditions the core is allowed to surface as
/// `Err` rather than a sentinel: the index is a prerequisite, so a
/// corrupted or missing artifact aborts loading rather than degrading.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("required index artifact is missing: {path}")]
    MissingArtifact { path: PathBuf },

    #[error("index artifact has a malformed header: {path}")]
    MalformedHeader { path: PathBuf },

    #[error("index artifact {path} declares an out-of-range bit width: {bits}")]
    BitWidthOutOfRange { path: PathBuf, bits: u32 },

    #[error("index directory does not exist: {path}")]
    MissingDirectory { path: PathBuf },

    #[error(
        "chain backtracking reached an unset predecessor (invariant violation): \
         {hit_count} hits, best score {best_score}"
    )]
    InvariantViolation { hit_count: usize, best_score: f64 },
}

impl IndexError {
    pub fn missing_artifact(path: impl AsRef<Path>, _source: std::io::Error) -> Self {
        IndexError::MissingArtifact {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn malformed_header(path: impl AsRef<Path>) -> Self {
        IndexError::MalformedHeader {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn bit_width_out_of_range(path: impl AsRef<Path>, bits: u32) -> Self {
        IndexError::BitWidthOutOfRange {
            path: path.as_ref().to_path_buf(),
            bits,
        }
    }

    pub fn missing_directory(path: impl AsRef<Path>) -> Self {
        IndexError::MissingDirectory {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn invariant_violation(hit_count: usize, best_score: f64) -> Self {
        IndexError::InvariantViolation {
            hit_count,
            best_score,
        }
    }
}
