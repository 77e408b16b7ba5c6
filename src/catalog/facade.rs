//! Catalog Facade
//!
//! Composes the category and product stores with one query cache. Every
//! successful mutation clears the whole cache before returning; every read
//! goes through the cache and falls back to a store scan on a miss.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::cache::{
    CacheStats, CacheStrategy, QueryCache, QueryKey, QueryResult, DEFAULT_LRU_CAPACITY,
};
use crate::catalog::{
    query, Category, CategoryId, CategoryStore, NewProduct, PricePoint, Product, ProductId,
    ProductStore, ProductUpdate,
};
use crate::error::{CatalogError, Result};

// == Catalog ==
/// One session's catalog.
///
/// Designed for a single mutator; callers sharing it across tasks wrap it in
/// one coarse lock (see `AppState`).
#[derive(Debug)]
pub struct Catalog {
    categories: CategoryStore,
    products: ProductStore,
    cache: Box<dyn QueryCache>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CacheStrategy::default(), DEFAULT_LRU_CAPACITY)
    }
}

impl Catalog {
    // == Constructors ==
    /// Creates an empty catalog using the given caching strategy.
    pub fn new(strategy: CacheStrategy, lru_capacity: usize) -> Self {
        Self::with_cache(strategy.build(lru_capacity))
    }

    /// Creates an empty catalog around a caller-supplied cache.
    pub fn with_cache(cache: Box<dyn QueryCache>) -> Self {
        Self {
            categories: CategoryStore::new(),
            products: ProductStore::new(),
            cache,
        }
    }

    // == Category Mutations ==
    pub fn add_category(
        &mut self,
        id: CategoryId,
        name: impl Into<String>,
        status: bool,
    ) -> Result<()> {
        self.categories.add(id, name, status)?;
        self.invalidate("add_category");
        Ok(())
    }

    pub fn update_category(
        &mut self,
        id: CategoryId,
        name: Option<String>,
        status: Option<bool>,
    ) -> Result<()> {
        self.categories.update(id, name, status)?;
        self.invalidate("update_category");
        Ok(())
    }

    /// Deletes a category that no product references.
    ///
    /// # Errors
    /// - `NotFound` if the category does not exist
    /// - `CategoryInUse` if any product still points at it
    pub fn delete_category(&mut self, id: CategoryId) -> Result<Category> {
        if !self.categories.contains(id) {
            return Err(CatalogError::category_not_found(id));
        }
        let products = self.products.count_in_category(id);
        if products > 0 {
            return Err(CatalogError::CategoryInUse { id, products });
        }

        let removed = self.categories.delete(id)?;
        self.invalidate("delete_category");
        Ok(removed)
    }

    // == Product Mutations ==
    pub fn add_product(&mut self, product: NewProduct) -> Result<()> {
        self.products.add(product, &self.categories)?;
        self.invalidate("add_product");
        Ok(())
    }

    pub fn update_product(&mut self, id: ProductId, update: ProductUpdate) -> Result<()> {
        self.products.update(id, update, &self.categories)?;
        self.invalidate("update_product");
        Ok(())
    }

    pub fn delete_product(&mut self, id: ProductId) -> Result<Product> {
        let removed = self.products.delete(id)?;
        self.invalidate("delete_product");
        Ok(removed)
    }

    /// Applies a signed stock change and returns the new quantity.
    pub fn adjust_quantity(&mut self, id: ProductId, delta: i64) -> Result<u64> {
        let quantity = self.products.adjust_quantity(id, delta)?;
        self.invalidate("adjust_quantity");
        Ok(quantity)
    }

    // == Direct Lookups ==
    pub fn get_category(&self, id: CategoryId) -> Result<Category> {
        self.categories
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::category_not_found(id))
    }

    pub fn get_product(&self, id: ProductId) -> Result<Product> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    pub fn price_history(&self, id: ProductId) -> Result<Vec<PricePoint>> {
        self.products.price_history(id).map(<[PricePoint]>::to_vec)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.all().cloned().collect()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.all().cloned().collect()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    // == Cached Queries ==
    pub fn search_categories_by_name(&mut self, name: &str) -> Arc<[Category]> {
        self.lookup(
            QueryKey::categories_by_name(name),
            QueryResult::into_categories,
        )
    }

    pub fn search_products_by_name(&mut self, name: &str) -> Arc<[Product]> {
        self.lookup(QueryKey::products_by_name(name), QueryResult::into_products)
    }

    /// Products with `min <= price <= max`.
    pub fn search_products_by_price_range(&mut self, min: f64, max: f64) -> Arc<[Product]> {
        self.lookup(
            QueryKey::products_by_price_range(min, max),
            QueryResult::into_products,
        )
    }

    pub fn search_products_by_category_id(&mut self, id: CategoryId) -> Arc<[Product]> {
        self.lookup(
            QueryKey::products_by_category_id(id),
            QueryResult::into_products,
        )
    }

    pub fn search_products_by_category_name(&mut self, name: &str) -> Arc<[Product]> {
        self.lookup(
            QueryKey::products_by_category_name(name),
            QueryResult::into_products,
        )
    }

    // == Cache Introspection ==
    pub fn strategy(&self) -> CacheStrategy {
        self.cache.strategy()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    // == Internals ==
    /// Serves `key` from the cache, or scans the stores and caches the answer.
    ///
    /// A cached answer of the wrong shape counts as a miss and is overwritten.
    fn lookup<T>(
        &mut self,
        key: QueryKey,
        select: fn(QueryResult) -> Option<Arc<[T]>>,
    ) -> Arc<[T]> {
        if let Some(hit) = self.cache.get(&key).and_then(select) {
            trace!(kind = %key.kind(), "query cache hit");
            return hit;
        }

        trace!(kind = %key.kind(), "query cache miss");
        let result = query::execute(&key, &self.categories, &self.products);
        self.cache.put(key, result.clone());
        select(result).unwrap_or_else(|| Arc::from(Vec::new()))
    }

    fn invalidate(&mut self, operation: &'static str) {
        self.cache.invalidate_all();
        debug!(operation, strategy = %self.cache.strategy(), "query cache invalidated");
    }
}
