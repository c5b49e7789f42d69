/// Repository trait for product persistence
///
/// Every method takes the connection of the caller's session or unit of
/// work, so several calls can share one transaction.
use crate::modules::product::domain::entities::{Product, ProductId};
use crate::shared::errors::AppResult;
use diesel::sqlite::SqliteConnection;

#[cfg_attr(test, mockall::automock)]
pub trait ProductRepository: Send + Sync {
    /// Insert a product row and return the generated id
    fn insert(&self, conn: &mut SqliteConnection, name: &str) -> AppResult<ProductId>;

    /// Get product by id
    fn find_by_id(&self, conn: &mut SqliteConnection, id: ProductId)
        -> AppResult<Option<Product>>;

    fn count(&self, conn: &mut SqliteConnection) -> AppResult<i64>;
}
