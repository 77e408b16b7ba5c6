//! Mini Catalog - An in-memory product catalog
//!
//! Categories and products with cached read queries. The query cache is one of
//! three interchangeable strategies and is fully invalidated on every mutation.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::CacheStrategy;
pub use catalog::Catalog;
pub use config::Config;
pub use error::{CatalogError, Result};
