//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `POST /categories`, `GET|PATCH|DELETE /categories/:id`
//! - `GET /categories/search?name=`, `GET /categories/:id/products`
//! - `POST /products`, `GET|PATCH|DELETE /products/:id`
//! - `POST /products/:id/quantity`, `GET /products/:id/price-history`
//! - `GET /products/search?name=`, `GET /products/price-range?min=&max=`
//! - `GET /products/by-category?name=`
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
