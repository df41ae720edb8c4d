//! Mapping core for a cdBG-based sequence aligner: sparse k-mer index
//! lookup plus Li-2018-style MEM chaining.
//!
//! The two subsystems described in spec.md §4 live under [`index`] (the
//! sparse k-mer index, its on-disk layout, and the extension-table walk)
//! and [`mem`] (per-read MEM collection and chaining). [`worker`] wires
//! the two together into the per-read scratch-buffer pipeline a
//! `rayon`-backed worker pool drives (spec.md §5). Index construction,
//! FASTA/FASTQ parsing, and alignment/SAM emission are external
//! collaborators and are not part of this crate (spec.md §1).

pub mod bitpacked;
pub mod bits;
pub mod cli;
pub mod error;
pub mod index;
pub mod kmer;
pub mod mem;
pub mod mphf;
pub mod rank_select;
pub mod worker;

pub use error::IndexError;
pub use index::{ProjectedHit, QueryCache, SparseIndex};
pub use mem::{MemChainer, MemClusters, MemCollector};
pub use worker::ReadWorker;
