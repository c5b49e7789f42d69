use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned surrogate key of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    id: Option<ProductId>,
    name: String,
}

impl Product {
    /// A transient product. It gets an id only by being persisted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub(crate) fn persisted(id: ProductId, name: String) -> Self {
        Self { id: Some(id), name }
    }

    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Rename a product that has not been written yet.
    pub fn set_name(&mut self, name: impl Into<String>) -> AppResult<()> {
        if let Some(id) = self.id {
            return Err(AppError::PreconditionViolation(format!(
                "Product {} is already persisted and cannot be renamed",
                id
            )));
        }
        self.name = name.into();
        Ok(())
    }

    /// Two products are the same entity iff both carry the same id.
    pub fn is_same_entity(&self, other: &Product) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Product(id={}, name={})", id, self.name),
            None => write!(f, "Product(id=<transient>, name={})", self.name),
        }
    }
}
