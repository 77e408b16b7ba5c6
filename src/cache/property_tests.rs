//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check eviction and invalidation behavior of the strategies.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::{
    BoundedLru, CacheStrategy, QueryCache, QueryKey, QueryKind, QueryResult, UnboundedMemo,
};

// == Strategies ==
/// Generates keys across all five query kinds
fn query_key_strategy() -> impl Strategy<Value = QueryKey> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,12}".prop_map(|s| QueryKey::categories_by_name(&s)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(|s| QueryKey::products_by_name(&s)),
        (0.0f64..500.0, 0.0f64..500.0)
            .prop_map(|(min, max)| QueryKey::products_by_price_range(min, max)),
        (0u64..50).prop_map(QueryKey::products_by_category_id),
        "[a-zA-Z0-9 ]{0,12}".prop_map(|s| QueryKey::products_by_category_name(&s)),
    ]
}

fn result_for(key: &QueryKey) -> QueryResult {
    match key.kind() {
        QueryKind::CategoriesByName => QueryResult::Categories(Arc::from(Vec::new())),
        _ => QueryResult::Products(Arc::from(Vec::new())),
    }
}

#[derive(Debug, Clone)]
enum CacheOp {
    Get(QueryKey),
    Put(QueryKey),
    Invalidate,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => query_key_strategy().prop_map(CacheOp::Get),
        4 => query_key_strategy().prop_map(CacheOp::Put),
        1 => Just(CacheOp::Invalidate),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Inserting capacity + 1 distinct keys of one kind evicts exactly the
    // least recently used key, even after the access order was shuffled.
    #[test]
    fn prop_lru_evicts_exactly_least_recently_used(
        names in prop::collection::hash_set("[a-z]{1,8}", 3..12),
        touches in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
        extra in "[A-Z]{9}",
    ) {
        let keys: Vec<QueryKey> = names.iter().map(|n| QueryKey::products_by_name(n)).collect();
        let capacity = keys.len();
        let mut cache = BoundedLru::new(capacity);

        // Reference recency list: front = least recently used
        let mut recency: Vec<QueryKey> = Vec::new();
        for key in &keys {
            cache.put(key.clone(), result_for(key));
            recency.push(key.clone());
        }
        for index in touches {
            let key = index.get(&keys).clone();
            prop_assert!(cache.get(&key).is_some());
            recency.retain(|k| k != &key);
            recency.push(key);
        }

        let new_key = QueryKey::products_by_name(&extra);
        prop_assume!(!keys.contains(&new_key));
        cache.put(new_key.clone(), result_for(&new_key));

        let victim = &recency[0];
        prop_assert_eq!(cache.len(), capacity);
        prop_assert!(cache.get(victim).is_none(), "LRU key should be evicted");
        for survivor in &recency[1..] {
            prop_assert!(cache.contains(survivor), "non-LRU key was evicted");
        }
        prop_assert!(cache.contains(&new_key));
        prop_assert_eq!(cache.stats().evictions, 1);
    }

    // No partition ever exceeds its capacity.
    #[test]
    fn prop_capacity_enforcement(
        ops in prop::collection::vec(cache_op_strategy(), 1..200),
        capacity in 1usize..8,
    ) {
        let mut cache = BoundedLru::new(capacity);
        for op in ops {
            match op {
                CacheOp::Get(key) => { cache.get(&key); }
                CacheOp::Put(key) => {
                    let result = result_for(&key);
                    cache.put(key, result);
                }
                CacheOp::Invalidate => cache.invalidate_all(),
            }
            for kind in QueryKind::ALL {
                prop_assert!(cache.len_of(kind) <= capacity);
            }
        }
    }

    // The memo table holds exactly the distinct keys put since the last
    // invalidation, and every one of them hits.
    #[test]
    fn prop_memo_tracks_distinct_keys(ops in prop::collection::vec(cache_op_strategy(), 1..100)) {
        let mut memo = UnboundedMemo::new();
        let mut live: HashSet<QueryKey> = HashSet::new();

        for op in ops {
            match op {
                CacheOp::Get(key) => {
                    prop_assert_eq!(memo.get(&key).is_some(), live.contains(&key));
                }
                CacheOp::Put(key) => {
                    let result = result_for(&key);
                    memo.put(key.clone(), result);
                    live.insert(key);
                }
                CacheOp::Invalidate => {
                    memo.invalidate_all();
                    live.clear();
                }
            }
            prop_assert_eq!(memo.len(), live.len());
        }
    }

    // After invalidation no strategy answers any previously cached key.
    #[test]
    fn prop_invalidate_all_empties_every_strategy(
        keys in prop::collection::vec(query_key_strategy(), 1..40),
    ) {
        for strategy in [CacheStrategy::None, CacheStrategy::Lru, CacheStrategy::Memo] {
            let mut cache = strategy.build(16);
            for key in &keys {
                cache.put(key.clone(), result_for(key));
            }

            cache.invalidate_all();

            prop_assert!(cache.is_empty());
            for key in &keys {
                prop_assert!(cache.get(key).is_none());
            }
        }
    }
}
