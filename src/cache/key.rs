//! Query Key Module
//!
//! Structured cache keys: a query kind tag plus its normalized arguments.

use std::fmt;
use std::sync::Arc;

use crate::catalog::{Category, CategoryId, Product};

// == Query Kind ==
/// The five read-query shapes the catalog answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryKind {
    CategoriesByName,
    ProductsByName,
    ProductsByPriceRange,
    ProductsByCategoryId,
    ProductsByCategoryName,
}

impl QueryKind {
    /// All kinds, in a fixed order.
    pub const ALL: [QueryKind; 5] = [
        QueryKind::CategoriesByName,
        QueryKind::ProductsByName,
        QueryKind::ProductsByPriceRange,
        QueryKind::ProductsByCategoryId,
        QueryKind::ProductsByCategoryName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::CategoriesByName => "categories_by_name",
            QueryKind::ProductsByName => "products_by_name",
            QueryKind::ProductsByPriceRange => "products_by_price_range",
            QueryKind::ProductsByCategoryId => "products_by_category_id",
            QueryKind::ProductsByCategoryName => "products_by_category_name",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Query Key ==
/// Cache key for one read query.
///
/// Name arguments are stored lowercased since every name query is
/// case-insensitive. Prices are stored as bit patterns so the key is `Eq + Hash`;
/// `-0.0` is folded into `0.0` first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    CategoriesByName(String),
    ProductsByName(String),
    ProductsByPriceRange { min_bits: u64, max_bits: u64 },
    ProductsByCategoryId(CategoryId),
    ProductsByCategoryName(String),
}

impl QueryKey {
    pub fn categories_by_name(name: &str) -> Self {
        QueryKey::CategoriesByName(name.to_lowercase())
    }

    pub fn products_by_name(name: &str) -> Self {
        QueryKey::ProductsByName(name.to_lowercase())
    }

    pub fn products_by_price_range(min: f64, max: f64) -> Self {
        QueryKey::ProductsByPriceRange {
            min_bits: normalize_price(min).to_bits(),
            max_bits: normalize_price(max).to_bits(),
        }
    }

    pub fn products_by_category_id(id: CategoryId) -> Self {
        QueryKey::ProductsByCategoryId(id)
    }

    pub fn products_by_category_name(name: &str) -> Self {
        QueryKey::ProductsByCategoryName(name.to_lowercase())
    }

    /// Returns the kind tag of this key.
    pub fn kind(&self) -> QueryKind {
        match self {
            QueryKey::CategoriesByName(_) => QueryKind::CategoriesByName,
            QueryKey::ProductsByName(_) => QueryKind::ProductsByName,
            QueryKey::ProductsByPriceRange { .. } => QueryKind::ProductsByPriceRange,
            QueryKey::ProductsByCategoryId(_) => QueryKind::ProductsByCategoryId,
            QueryKey::ProductsByCategoryName(_) => QueryKind::ProductsByCategoryName,
        }
    }

    /// Builds the flat string key used by the memo table.
    ///
    /// Text arguments are debug-quoted so that no two distinct keys render
    /// to the same string.
    pub fn memo_key(&self) -> String {
        match self {
            QueryKey::CategoriesByName(name)
            | QueryKey::ProductsByName(name)
            | QueryKey::ProductsByCategoryName(name) => format!("{}({:?})", self.kind(), name),
            QueryKey::ProductsByPriceRange { min_bits, max_bits } => format!(
                "{}({:?},{:?})",
                self.kind(),
                f64::from_bits(*min_bits),
                f64::from_bits(*max_bits)
            ),
            QueryKey::ProductsByCategoryId(id) => format!("{}({})", self.kind(), id),
        }
    }
}

fn normalize_price(price: f64) -> f64 {
    if price == 0.0 {
        0.0
    } else {
        price
    }
}

// == Query Result ==
/// A cached query answer. Slices are shared, so a cache hit is a refcount bump.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Categories(Arc<[Category]>),
    Products(Arc<[Product]>),
}

impl QueryResult {
    /// Returns the category list, or None if this is a product answer.
    pub fn into_categories(self) -> Option<Arc<[Category]>> {
        match self {
            QueryResult::Categories(categories) => Some(categories),
            QueryResult::Products(_) => None,
        }
    }

    /// Returns the product list, or None if this is a category answer.
    pub fn into_products(self) -> Option<Arc<[Product]>> {
        match self {
            QueryResult::Products(products) => Some(products),
            QueryResult::Categories(_) => None,
        }
    }
}
