//! Product Store Module
//!
//! Owns product entities, validates category references and keeps an
//! append-only price history per product.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{CategoryId, CategoryStore};
use crate::error::{CatalogError, Result};

pub type ProductId = u64;

// == Price Point ==
/// One entry of a product's price history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    fn now(price: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            price,
        }
    }
}

// == Product ==
/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub quantity: u64,
    pub category_id: CategoryId,
    /// Chronological, starts with the creation price, never shrinks
    pub price_history: Vec<PricePoint>,
}

/// Fields accepted when creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category_id: CategoryId,
    pub quantity: u64,
}

impl NewProduct {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category_id: CategoryId,
        quantity: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
            category_id,
            quantity,
        }
    }
}

/// Partial product update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub quantity: Option<u64>,
}

impl ProductUpdate {
    pub fn price(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }
}

impl Product {
    fn create(new: NewProduct) -> Self {
        Self {
            id: new.id,
            name: new.name,
            price: new.price,
            description: new.description,
            quantity: new.quantity,
            category_id: new.category_id,
            price_history: vec![PricePoint::now(new.price)],
        }
    }

    /// Applies a validated update. History grows only on a real price change.
    fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            if price != self.price {
                self.price = price;
                self.price_history.push(PricePoint::now(price));
            }
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
    }
}

fn validate_price(price: f64) -> Result<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidRequest(format!(
            "price must be a non-negative number, got {}",
            price
        )))
    }
}

// == Product Store ==
/// Product storage. Iterates in ascending id order.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: BTreeMap<ProductId, Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Inserts a new product whose category must exist in `categories`.
    ///
    /// # Errors
    /// - `DuplicateKey` if the id is taken
    /// - `UnknownCategory` if `category_id` does not resolve
    /// - `InvalidRequest` for a negative or non-finite price
    pub fn add(&mut self, new: NewProduct, categories: &CategoryStore) -> Result<()> {
        if self.products.contains_key(&new.id) {
            return Err(CatalogError::DuplicateKey {
                entity: "Product",
                id: new.id,
            });
        }
        if !categories.contains(new.category_id) {
            return Err(CatalogError::UnknownCategory(new.category_id));
        }
        validate_price(new.price)?;

        self.products.insert(new.id, Product::create(new));
        Ok(())
    }

    // == Update ==
    /// Partially updates a product. A supplied category id must resolve; there
    /// is no fallback to the current category.
    pub fn update(
        &mut self,
        id: ProductId,
        update: ProductUpdate,
        categories: &CategoryStore,
    ) -> Result<()> {
        if !self.products.contains_key(&id) {
            return Err(CatalogError::product_not_found(id));
        }
        if let Some(category_id) = update.category_id {
            if !categories.contains(category_id) {
                return Err(CatalogError::UnknownCategory(category_id));
            }
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        self.get_mut(id)?.apply(update);
        Ok(())
    }

    // == Delete ==
    pub fn delete(&mut self, id: ProductId) -> Result<Product> {
        self.products
            .remove(&id)
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    // == Adjust Quantity ==
    /// Adds a signed delta to the stock level and returns the new quantity.
    ///
    /// Fails with `InvalidQuantity` if the result would be negative.
    pub fn adjust_quantity(&mut self, id: ProductId, delta: i64) -> Result<u64> {
        let product = self.get_mut(id)?;
        let quantity = product
            .quantity
            .checked_add_signed(delta)
            .ok_or(CatalogError::InvalidQuantity {
                id,
                current: product.quantity,
                delta,
            })?;
        product.quantity = quantity;
        Ok(quantity)
    }

    // == Price History ==
    pub fn price_history(&self, id: ProductId) -> Result<&[PricePoint]> {
        self.products
            .get(&id)
            .map(|product| product.price_history.as_slice())
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    fn get_mut(&mut self, id: ProductId) -> Result<&mut Product> {
        self.products
            .get_mut(&id)
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    /// Iterates all products in id order.
    pub fn all(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Counts products referencing a category.
    pub fn count_in_category(&self, category_id: CategoryId) -> usize {
        self.products
            .values()
            .filter(|product| product.category_id == category_id)
            .count()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
