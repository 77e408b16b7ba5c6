//! Cache Strategy Module
//!
//! The contract every query cache satisfies, the strategy selector, and the
//! pass-through baseline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{BoundedLru, CacheStats, QueryKey, QueryResult, UnboundedMemo};

// == Query Cache Trait ==
/// Contract shared by all caching strategies.
///
/// `get` takes `&mut self` because a lookup may update recency and statistics.
pub trait QueryCache: fmt::Debug + Send + Sync {
    /// Returns the cached result for `key`, or None on a miss.
    fn get(&mut self, key: &QueryKey) -> Option<QueryResult>;

    /// Stores a freshly computed result.
    fn put(&mut self, key: QueryKey, result: QueryResult);

    /// Drops every cached entry across every query kind.
    fn invalidate_all(&mut self);

    /// Number of cached results currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;

    fn strategy(&self) -> CacheStrategy;
}

// == Cache Strategy ==
/// Selects which `QueryCache` implementation a catalog uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStrategy {
    /// Every read scans the store
    None,
    /// Bounded least-recently-used cache per query kind
    #[default]
    Lru,
    /// Unbounded memo table, cleared only by invalidation
    Memo,
}

impl CacheStrategy {
    /// Builds an empty cache for this strategy.
    ///
    /// `lru_capacity` is the per-kind bound and is ignored by the other strategies.
    pub fn build(self, lru_capacity: usize) -> Box<dyn QueryCache> {
        match self {
            CacheStrategy::None => Box::new(NoCache::new()),
            CacheStrategy::Lru => Box::new(BoundedLru::new(lru_capacity)),
            CacheStrategy::Memo => Box::new(UnboundedMemo::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStrategy::None => "none",
            CacheStrategy::Lru => "lru",
            CacheStrategy::Memo => "memo",
        }
    }
}

impl fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no-cache" | "nocache" => Ok(CacheStrategy::None),
            "lru" => Ok(CacheStrategy::Lru),
            "memo" | "memoize" => Ok(CacheStrategy::Memo),
            other => Err(format!("unknown cache strategy: {}", other)),
        }
    }
}

// == No Cache ==
/// Baseline strategy: never stores anything, every lookup misses.
#[derive(Debug, Default)]
pub struct NoCache {
    stats: CacheStats,
}

impl NoCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueryCache for NoCache {
    fn get(&mut self, _key: &QueryKey) -> Option<QueryResult> {
        self.stats.record_miss();
        None
    }

    fn put(&mut self, _key: QueryKey, _result: QueryResult) {}

    fn invalidate_all(&mut self) {
        self.stats.record_invalidation();
    }

    fn len(&self) -> usize {
        0
    }

    fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::None
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_no_cache_always_misses() {
        let mut cache = NoCache::new();
        let key = QueryKey::products_by_name("milk");

        cache.put(key.clone(), QueryResult::Products(Arc::from(Vec::new())));

        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("lru".parse::<CacheStrategy>(), Ok(CacheStrategy::Lru));
        assert_eq!(" MEMO ".parse::<CacheStrategy>(), Ok(CacheStrategy::Memo));
        assert_eq!("none".parse::<CacheStrategy>(), Ok(CacheStrategy::None));
        assert!("fifo".parse::<CacheStrategy>().is_err());
    }

    #[test]
    fn test_strategy_build() {
        for strategy in [CacheStrategy::None, CacheStrategy::Lru, CacheStrategy::Memo] {
            let cache = strategy.build(16);
            assert_eq!(cache.strategy(), strategy);
            assert!(cache.is_empty());
        }
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&CacheStrategy::Memo).unwrap();
        assert_eq!(json, "\"memo\"");
        let parsed: CacheStrategy = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, CacheStrategy::None);
    }
}
