//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::catalog::{Catalog, Category, Product};
use crate::error::{CatalogError, Result};
use crate::models::{
    AdjustQuantityRequest, CreateCategoryRequest, CreateProductRequest, HealthResponse,
    MessageResponse, NameQuery, PriceHistoryResponse, PriceRangeQuery, QuantityResponse,
    SearchResponse, StatsResponse, UpdateCategoryRequest, UpdateProductRequest,
};

/// Application state shared across all handlers.
///
/// The whole catalog sits behind one lock. Searches take the write half since
/// a cache lookup updates recency and statistics.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<Catalog>>,
}

impl AppState {
    /// Creates a new AppState around the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Creates an empty catalog using the configured cache strategy.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(Catalog::new(config.cache_strategy, config.lru_capacity))
    }
}

// Extractors whose failures surface as `CatalogError::InvalidRequest`
type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;
type IdParam = std::result::Result<Path<u64>, PathRejection>;
type QueryParams<T> = std::result::Result<Query<T>, QueryRejection>;

fn reject(message: Option<String>) -> Result<()> {
    match message {
        Some(msg) => Err(CatalogError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

// == Categories ==

/// Handler for POST /categories
pub async fn create_category_handler(
    State(state): State<AppState>,
    req: JsonBody<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = req?;
    reject(req.validate())?;

    let mut catalog = state.catalog.write().await;
    catalog.add_category(req.id, req.name, req.status)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("Category {} created", req.id))),
    ))
}

/// Handler for GET /categories/:id
pub async fn get_category_handler(
    State(state): State<AppState>,
    id: IdParam,
) -> Result<Json<Category>> {
    let Path(id) = id?;
    let catalog = state.catalog.read().await;
    Ok(Json(catalog.get_category(id)?))
}

/// Handler for PATCH /categories/:id
pub async fn update_category_handler(
    State(state): State<AppState>,
    id: IdParam,
    req: JsonBody<UpdateCategoryRequest>,
) -> Result<Json<MessageResponse>> {
    let Path(id) = id?;
    let Json(req) = req?;
    reject(req.validate())?;

    let mut catalog = state.catalog.write().await;
    catalog.update_category(id, req.name, req.status)?;

    Ok(Json(MessageResponse::new(format!("Category {} updated", id))))
}

/// Handler for DELETE /categories/:id
pub async fn delete_category_handler(
    State(state): State<AppState>,
    id: IdParam,
) -> Result<Json<MessageResponse>> {
    let Path(id) = id?;
    let mut catalog = state.catalog.write().await;
    catalog.delete_category(id)?;

    Ok(Json(MessageResponse::new(format!("Category {} deleted", id))))
}

/// Handler for GET /categories/search?name=
pub async fn search_categories_handler(
    State(state): State<AppState>,
    query: QueryParams<NameQuery>,
) -> Result<Json<SearchResponse<Category>>> {
    let Query(query) = query?;
    let mut catalog = state.catalog.write().await;
    let found = catalog.search_categories_by_name(&query.name);
    Ok(Json(SearchResponse::new(&found[..])))
}

/// Handler for GET /categories/:id/products
pub async fn category_products_handler(
    State(state): State<AppState>,
    id: IdParam,
) -> Result<Json<SearchResponse<Product>>> {
    let Path(id) = id?;
    let mut catalog = state.catalog.write().await;
    let found = catalog.search_products_by_category_id(id);
    Ok(Json(SearchResponse::new(&found[..])))
}

// == Products ==

/// Handler for POST /products
pub async fn create_product_handler(
    State(state): State<AppState>,
    req: JsonBody<CreateProductRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = req?;
    reject(req.validate())?;
    let id = req.id;

    let mut catalog = state.catalog.write().await;
    catalog.add_product(req.into())?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("Product {} created", id))),
    ))
}

/// Handler for GET /products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    id: IdParam,
) -> Result<Json<Product>> {
    let Path(id) = id?;
    let catalog = state.catalog.read().await;
    Ok(Json(catalog.get_product(id)?))
}

/// Handler for PATCH /products/:id
pub async fn update_product_handler(
    State(state): State<AppState>,
    id: IdParam,
    req: JsonBody<UpdateProductRequest>,
) -> Result<Json<MessageResponse>> {
    let Path(id) = id?;
    let Json(req) = req?;
    reject(req.validate())?;

    let mut catalog = state.catalog.write().await;
    catalog.update_product(id, req.into())?;

    Ok(Json(MessageResponse::new(format!("Product {} updated", id))))
}

/// Handler for DELETE /products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    id: IdParam,
) -> Result<Json<MessageResponse>> {
    let Path(id) = id?;
    let mut catalog = state.catalog.write().await;
    catalog.delete_product(id)?;

    Ok(Json(MessageResponse::new(format!("Product {} deleted", id))))
}

/// Handler for POST /products/:id/quantity
pub async fn adjust_quantity_handler(
    State(state): State<AppState>,
    id: IdParam,
    req: JsonBody<AdjustQuantityRequest>,
) -> Result<Json<QuantityResponse>> {
    let Path(id) = id?;
    let Json(req) = req?;
    let mut catalog = state.catalog.write().await;
    let quantity = catalog.adjust_quantity(id, req.delta)?;

    Ok(Json(QuantityResponse {
        product_id: id,
        quantity,
    }))
}

/// Handler for GET /products/:id/price-history
pub async fn price_history_handler(
    State(state): State<AppState>,
    id: IdParam,
) -> Result<Json<PriceHistoryResponse>> {
    let Path(id) = id?;
    let catalog = state.catalog.read().await;
    let history = catalog.price_history(id)?;

    Ok(Json(PriceHistoryResponse {
        product_id: id,
        history,
    }))
}

/// Handler for GET /products/search?name=
pub async fn search_products_handler(
    State(state): State<AppState>,
    query: QueryParams<NameQuery>,
) -> Result<Json<SearchResponse<Product>>> {
    let Query(query) = query?;
    let mut catalog = state.catalog.write().await;
    let found = catalog.search_products_by_name(&query.name);
    Ok(Json(SearchResponse::new(&found[..])))
}

/// Handler for GET /products/price-range?min=&max=
pub async fn price_range_handler(
    State(state): State<AppState>,
    query: QueryParams<PriceRangeQuery>,
) -> Result<Json<SearchResponse<Product>>> {
    let Query(query) = query?;
    let mut catalog = state.catalog.write().await;
    let found = catalog.search_products_by_price_range(query.min, query.max);
    Ok(Json(SearchResponse::new(&found[..])))
}

/// Handler for GET /products/by-category?name=
pub async fn products_by_category_name_handler(
    State(state): State<AppState>,
    query: QueryParams<NameQuery>,
) -> Result<Json<SearchResponse<Product>>> {
    let Query(query) = query?;
    let mut catalog = state.catalog.write().await;
    let found = catalog.search_products_by_category_name(&query.name);
    Ok(Json(SearchResponse::new(&found[..])))
}

// == Service ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let catalog = state.catalog.read().await;
    Json(StatsResponse::new(
        catalog.strategy(),
        &catalog.cache_stats(),
        catalog.category_count(),
        catalog.product_count(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
