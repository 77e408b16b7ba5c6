//! Query Engine Module
//!
//! The five read queries as pure scans over store contents. Results keep store
//! iteration order and may be empty.

use std::sync::Arc;

use crate::cache::{QueryKey, QueryResult};
use crate::catalog::{Category, CategoryId, CategoryStore, Product, ProductStore};

/// Case-insensitive substring test. `needle` must already be lowercase.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub fn categories_by_name(categories: &CategoryStore, name: &str) -> Vec<Category> {
    let needle = name.to_lowercase();
    categories
        .all()
        .filter(|category| contains_ignore_case(&category.name, &needle))
        .cloned()
        .collect()
}

pub fn products_by_name(products: &ProductStore, name: &str) -> Vec<Product> {
    let needle = name.to_lowercase();
    products
        .all()
        .filter(|product| contains_ignore_case(&product.name, &needle))
        .cloned()
        .collect()
}

/// Inclusive on both ends; an inverted range matches nothing.
pub fn products_by_price_range(products: &ProductStore, min: f64, max: f64) -> Vec<Product> {
    products
        .all()
        .filter(|product| min <= product.price && product.price <= max)
        .cloned()
        .collect()
}

pub fn products_by_category_id(products: &ProductStore, category_id: CategoryId) -> Vec<Product> {
    products
        .all()
        .filter(|product| product.category_id == category_id)
        .cloned()
        .collect()
}

/// Matches against each product's resolved category name.
pub fn products_by_category_name(
    products: &ProductStore,
    categories: &CategoryStore,
    name: &str,
) -> Vec<Product> {
    let needle = name.to_lowercase();
    products
        .all()
        .filter(|product| {
            categories
                .get(product.category_id)
                .is_some_and(|category| contains_ignore_case(&category.name, &needle))
        })
        .cloned()
        .collect()
}

/// Answers a cache key against the stores.
///
/// Name arguments in keys are already lowercase, so running the query from the
/// key gives the same answer as running it from the caller's original text.
pub fn execute(key: &QueryKey, categories: &CategoryStore, products: &ProductStore) -> QueryResult {
    match key {
        QueryKey::CategoriesByName(name) => {
            QueryResult::Categories(Arc::from(categories_by_name(categories, name)))
        }
        QueryKey::ProductsByName(name) => {
            QueryResult::Products(Arc::from(products_by_name(products, name)))
        }
        QueryKey::ProductsByPriceRange { min_bits, max_bits } => QueryResult::Products(Arc::from(
            products_by_price_range(products, f64::from_bits(*min_bits), f64::from_bits(*max_bits)),
        )),
        QueryKey::ProductsByCategoryId(id) => {
            QueryResult::Products(Arc::from(products_by_category_id(products, *id)))
        }
        QueryKey::ProductsByCategoryName(name) => QueryResult::Products(Arc::from(
            products_by_category_name(products, categories, name),
        )),
    }
}
