//! Unbounded Memo Module
//!
//! A flat string-keyed memo table with no eviction.

use std::collections::HashMap;

use crate::cache::{CacheStats, CacheStrategy, QueryCache, QueryKey, QueryResult};

// == Unbounded Memo ==
/// Manual memoization table.
///
/// Keys are `QueryKey::memo_key` strings. Nothing is ever evicted: the table
/// grows with every distinct query seen until `invalidate_all` empties it.
#[derive(Debug, Default)]
pub struct UnboundedMemo {
    table: HashMap<String, QueryResult>,
    stats: CacheStats,
}

impl UnboundedMemo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueryCache for UnboundedMemo {
    fn get(&mut self, key: &QueryKey) -> Option<QueryResult> {
        let hit = self.table.get(&key.memo_key()).cloned();
        match hit {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        hit
    }

    fn put(&mut self, key: QueryKey, result: QueryResult) {
        self.table.insert(key.memo_key(), result);
    }

    fn invalidate_all(&mut self) {
        self.table.clear();
        self.stats.record_invalidation();
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.table.len());
        stats
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::Memo
    }
}
