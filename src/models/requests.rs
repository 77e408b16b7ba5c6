//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::catalog::{NewProduct, ProductUpdate};

fn default_status() -> bool {
    true
}

fn check_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        Some("Name cannot be empty".to_string())
    } else {
        None
    }
}

/// Request body for POST /categories
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub id: u64,
    pub name: String,
    /// Defaults to active
    #[serde(default = "default_status")]
    pub status: bool,
}

impl CreateCategoryRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        check_name(&self.name)
    }
}

/// Request body for PATCH /categories/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Option<String> {
        self.name.as_deref().and_then(check_name)
    }
}

/// Request body for POST /products
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category_id: u64,
    #[serde(default)]
    pub quantity: u64,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Option<String> {
        check_name(&self.name)
    }
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct::new(
            req.id,
            req.name,
            req.price,
            req.description,
            req.category_id,
            req.quantity,
        )
    }
}

/// Request body for PATCH /products/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub quantity: Option<u64>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Option<String> {
        self.name.as_deref().and_then(check_name)
    }
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(req: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: req.name,
            price: req.price,
            description: req.description,
            category_id: req.category_id,
            quantity: req.quantity,
        }
    }
}

/// Request body for POST /products/:id/quantity
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustQuantityRequest {
    /// Positive restocks, negative sells
    pub delta: i64,
}

/// Query string for the name searches (`?name=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

/// Query string for GET /products/price-range
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRangeQuery {
    pub min: f64,
    pub max: f64,
}
