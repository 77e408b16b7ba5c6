//! Catalog Module
//!
//! Category and product stores, the read queries over them, and the `Catalog`
//! facade that keeps a query cache coherent with the stores.

mod category;
mod facade;
mod product;
pub mod query;


pub use category::{Category, CategoryId, CategoryStore};
pub use facade::Catalog;
pub use product::{NewProduct, PricePoint, Product, ProductId, ProductStore, ProductUpdate};
