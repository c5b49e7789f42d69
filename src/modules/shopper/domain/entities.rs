use crate::modules::product::domain::entities::{Product, ProductId};
use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned surrogate key of a shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopperId(i64);

impl ShopperId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ShopperId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ShopperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Shopper {
    id: Option<ShopperId>,
    name: String,
    // Persisted products only, no two with the same id.
    products: Vec<Product>,
}

impl Shopper {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            products: Vec::new(),
        }
    }

    pub(crate) fn persisted(id: ShopperId, name: String, products: Vec<Product>) -> Self {
        Self {
            id: Some(id),
            name,
            products,
        }
    }

    pub fn id(&self) -> Option<ShopperId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> AppResult<()> {
        if let Some(id) = self.id {
            return Err(AppError::PreconditionViolation(format!(
                "Shopper {} is already persisted and cannot be renamed",
                id
            )));
        }
        self.name = name.into();
        Ok(())
    }

    /// Link `product` to this shopper.
    ///
    /// The product must already carry an id. Returns `false` if the product
    /// was already ordered, in which case nothing changes.
    pub fn order(&mut self, product: &Product) -> AppResult<bool> {
        let product_id = product.id().ok_or_else(|| {
            AppError::PreconditionViolation(format!(
                "Cannot order product '{}': it has not been persisted",
                product.name()
            ))
        })?;

        if let Some(id) = self.id {
            return Err(AppError::PreconditionViolation(format!(
                "Shopper {} is already persisted; orders are attached before it is written",
                id
            )));
        }

        if self.has_ordered(product_id) {
            return Ok(false);
        }

        self.products.push(product.clone());
        Ok(true)
    }

    pub fn has_ordered(&self, product_id: ProductId) -> bool {
        self.products.iter().any(|p| p.id() == Some(product_id))
    }

    /// Ordered products, in the order they were attached or loaded.
    pub fn products(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn product_ids(&self) -> Vec<ProductId> {
        self.products.iter().filter_map(Product::id).collect()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

impl fmt::Display for Shopper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Shopper(id={}, name={})", id, self.name),
            None => write!(f, "Shopper(id=<transient>, name={})", self.name),
        }
    }
}
