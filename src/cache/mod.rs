//! Cache Module
//!
//! Query-result caching with three interchangeable strategies: pass-through,
//! bounded LRU and an unbounded memo table. Invalidation is always total.

mod bounded;
mod key;
mod lru;
mod memo;
mod stats;
mod strategy;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use bounded::BoundedLru;
pub use key::{QueryKey, QueryKind, QueryResult};
pub use lru::LruTracker;
pub use memo::UnboundedMemo;
pub use stats::CacheStats;
pub use strategy::{CacheStrategy, NoCache, QueryCache};

// == Public Constants ==
/// Default per-kind capacity of the bounded LRU strategy
pub const DEFAULT_LRU_CAPACITY: usize = 20_000;
