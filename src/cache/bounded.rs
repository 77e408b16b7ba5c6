//! Bounded LRU Module
//!
//! One fixed-capacity LRU partition per query kind.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{
    CacheStats, CacheStrategy, LruTracker, QueryCache, QueryKey, QueryKind, QueryResult,
};

// == Partition ==
/// Entries and recency order for a single query kind.
#[derive(Debug, Default)]
struct Partition {
    entries: HashMap<QueryKey, QueryResult>,
    lru: LruTracker<QueryKey>,
}

// == Bounded LRU ==
/// Bounded least-recently-used cache.
///
/// Each query kind gets its own partition holding at most `capacity` results.
/// Both `get` hits and `put` count as a use. A capacity of 0 stores nothing.
#[derive(Debug)]
pub struct BoundedLru {
    partitions: HashMap<QueryKind, Partition>,
    capacity: usize,
    stats: CacheStats,
}

impl BoundedLru {
    // == Constructor ==
    /// Creates an empty cache bounded to `capacity` entries per query kind.
    pub fn new(capacity: usize) -> Self {
        Self {
            partitions: HashMap::new(),
            capacity,
            stats: CacheStats::new(),
        }
    }

    /// Number of results cached for one query kind.
    pub fn len_of(&self, kind: QueryKind) -> usize {
        self.partitions
            .get(&kind)
            .map_or(0, |partition| partition.entries.len())
    }

    /// Checks presence without counting as a use.
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.partitions
            .get(&key.kind())
            .is_some_and(|partition| partition.entries.contains_key(key))
    }
}

impl QueryCache for BoundedLru {
    fn get(&mut self, key: &QueryKey) -> Option<QueryResult> {
        let hit = self.partitions.get_mut(&key.kind()).and_then(|partition| {
            let result = partition.entries.get(key)?.clone();
            partition.lru.touch(key);
            Some(result)
        });

        match hit {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        hit
    }

    fn put(&mut self, key: QueryKey, result: QueryResult) {
        if self.capacity == 0 {
            return;
        }

        let partition = self.partitions.entry(key.kind()).or_default();
        let is_overwrite = partition.entries.contains_key(&key);

        // Make room before inserting a new key
        if !is_overwrite && partition.entries.len() >= self.capacity {
            if let Some(evicted) = partition.lru.evict_oldest() {
                partition.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(kind = %evicted.kind(), "evicted least recently used query result");
            }
        }

        partition.lru.touch(&key);
        partition.entries.insert(key, result);
    }

    fn invalidate_all(&mut self) {
        for partition in self.partitions.values_mut() {
            partition.entries.clear();
            partition.lru.clear();
        }
        self.stats.record_invalidation();
    }

    fn len(&self) -> usize {
        self.partitions
            .values()
            .map(|partition| partition.entries.len())
            .sum()
    }

    fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len());
        stats
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::Lru
    }
}
