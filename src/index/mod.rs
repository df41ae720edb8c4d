//! The sparse k-mer index: on-disk layout, extension walk, and the
//! `SparseIndex` lookup surface (spec.md §4.3, §6).

pub mod extension;
pub mod layout;
pub mod sparse_index;

pub use extension::ExtensionTable;
pub use sparse_index::{ProjectedHit, QueryCache, SparseIndex};
