//! Per-read MEM collection and chaining (spec.md §4.4, §4.5).

pub mod chainer;
pub mod collector;
pub mod types;

pub use chainer::{MemChainer, MemClusters};
pub use collector::MemCollector;
pub use types::{MemCluster, MemInfo, RefMemMap, UniMemInfo};
