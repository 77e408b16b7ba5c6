//! Error types for the catalog
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Unified error type for catalog operations.
///
/// Every variant is synchronous and non-retryable: it reports caller misuse or a
/// stale identifier. A failed operation never leaves partial state behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// An entity with this id already exists
    #[error("{entity} with id {id} already exists")]
    DuplicateKey { entity: &'static str, id: u64 },

    /// No entity with this id
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// A product references a category that does not exist
    #[error("Unknown category id: {0}")]
    UnknownCategory(u64),

    /// Quantity would drop below zero (or overflow)
    #[error("Invalid quantity for product {id}: {current} adjusted by {delta}")]
    InvalidQuantity { id: u64, current: u64, delta: i64 },

    /// Category still referenced by products
    #[error("Category {id} is still referenced by {products} product(s)")]
    CategoryInUse { id: u64, products: usize },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CatalogError {
    pub(crate) fn category_not_found(id: u64) -> Self {
        CatalogError::NotFound {
            entity: "Category",
            id,
        }
    }

    pub(crate) fn product_not_found(id: u64) -> Self {
        CatalogError::NotFound {
            entity: "Product",
            id,
        }
    }
}

// == Extractor Rejections ==
impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for CatalogError {
    fn from(rejection: PathRejection) -> Self {
        CatalogError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for CatalogError {
    fn from(rejection: QueryRejection) -> Self {
        CatalogError::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::DuplicateKey { .. } | CatalogError::CategoryInUse { .. } => {
                StatusCode::CONFLICT
            }
            CatalogError::UnknownCategory(_) | CatalogError::InvalidQuantity { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
