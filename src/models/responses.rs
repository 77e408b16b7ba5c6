//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, CacheStrategy};
use crate::catalog::{PricePoint, ProductId};

/// Acknowledgement for mutations
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result list for every search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse<T> {
    pub count: usize,
    pub results: Vec<T>,
}

impl<T: Clone> SearchResponse<T> {
    pub fn new(results: &[T]) -> Self {
        Self {
            count: results.len(),
            results: results.to_vec(),
        }
    }
}

/// Response body for GET /products/:id/price-history
#[derive(Debug, Clone, Serialize)]
pub struct PriceHistoryResponse {
    pub product_id: ProductId,
    pub history: Vec<PricePoint>,
}

/// Response body for POST /products/:id/quantity
#[derive(Debug, Clone, Serialize)]
pub struct QuantityResponse {
    pub product_id: ProductId,
    pub quantity: u64,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub strategy: CacheStrategy,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
    /// Cached query results currently held
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    pub categories: usize,
    pub products: usize,
}

impl StatsResponse {
    pub fn new(
        strategy: CacheStrategy,
        stats: &CacheStats,
        categories: usize,
        products: usize,
    ) -> Self {
        Self {
            strategy,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            categories,
            products,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
