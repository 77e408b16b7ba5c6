//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    adjust_quantity_handler, category_products_handler, create_category_handler,
    create_product_handler, delete_category_handler, delete_product_handler,
    get_category_handler, get_product_handler, health_handler, price_history_handler,
    price_range_handler, products_by_category_name_handler, search_categories_handler,
    search_products_handler, stats_handler, update_category_handler, update_product_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/categories", post(create_category_handler))
        .route("/categories/search", get(search_categories_handler))
        .route(
            "/categories/:id",
            get(get_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler),
        )
        .route("/categories/:id/products", get(category_products_handler))
        .route("/products", post(create_product_handler))
        .route("/products/search", get(search_products_handler))
        .route("/products/price-range", get(price_range_handler))
        .route("/products/by-category", get(products_by_category_name_handler))
        .route(
            "/products/:id",
            get(get_product_handler)
                .patch(update_product_handler)
                .delete(delete_product_handler),
        )
        .route("/products/:id/quantity", post(adjust_quantity_handler))
        .route("/products/:id/price-history", get(price_history_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
