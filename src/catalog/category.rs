//! Category Store Module
//!
//! Owns category entities keyed by id.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{CatalogError, Result};

pub type CategoryId = u64;

// == Category ==
/// A product category. The id never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Active (`true`) or inactive
    pub status: bool,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, status: bool) -> Self {
        Self {
            id,
            name: name.into(),
            status,
        }
    }

    /// Applies only the supplied fields.
    fn apply(&mut self, name: Option<String>, status: Option<bool>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(status) = status {
            self.status = status;
        }
    }
}

// == Category Store ==
/// Category storage enforcing id uniqueness. Iterates in ascending id order.
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: BTreeMap<CategoryId, Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Inserts a new category.
    ///
    /// Fails with `DuplicateKey` if the id is taken.
    pub fn add(&mut self, id: CategoryId, name: impl Into<String>, status: bool) -> Result<()> {
        if self.categories.contains_key(&id) {
            return Err(CatalogError::DuplicateKey {
                entity: "Category",
                id,
            });
        }
        self.categories.insert(id, Category::new(id, name, status));
        Ok(())
    }

    // == Update ==
    /// Partially updates a category; omitted fields stay unchanged.
    pub fn update(
        &mut self,
        id: CategoryId,
        name: Option<String>,
        status: Option<bool>,
    ) -> Result<()> {
        let category = self
            .categories
            .get_mut(&id)
            .ok_or_else(|| CatalogError::category_not_found(id))?;
        category.apply(name, status);
        Ok(())
    }

    // == Delete ==
    /// Removes a category and returns it.
    ///
    /// Referential checks against products are the caller's job.
    pub fn delete(&mut self, id: CategoryId) -> Result<Category> {
        self.categories
            .remove(&id)
            .ok_or_else(|| CatalogError::category_not_found(id))
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.categories.contains_key(&id)
    }

    /// Iterates all categories in id order.
    pub fn all(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
