/// Repository trait for shopper persistence
///
/// The association is only reachable through this trait. There is no query
/// from a product back to its shoppers.
use crate::modules::product::domain::entities::{Product, ProductId};
use crate::modules::shopper::domain::entities::{Shopper, ShopperId};
use crate::shared::errors::AppResult;
use diesel::sqlite::SqliteConnection;

#[cfg_attr(test, mockall::automock)]
pub trait ShopperRepository: Send + Sync {
    /// Insert a shopper row and return the generated id
    fn insert(&self, conn: &mut SqliteConnection, name: &str) -> AppResult<ShopperId>;

    /// Write one join row per product; rows that already exist are skipped.
    /// Returns the number of rows actually written.
    fn link_products(
        &self,
        conn: &mut SqliteConnection,
        shopper_id: ShopperId,
        product_ids: &[ProductId],
    ) -> AppResult<usize>;

    /// Get shopper by id, with its products loaded
    fn find_by_id(&self, conn: &mut SqliteConnection, id: ShopperId)
        -> AppResult<Option<Shopper>>;

    /// Whether a shopper row exists, without loading its products
    fn exists(&self, conn: &mut SqliteConnection, id: ShopperId) -> AppResult<bool>;

    /// All shoppers, with products, ordered by id
    fn find_all(&self, conn: &mut SqliteConnection) -> AppResult<Vec<Shopper>>;

    /// Products ordered by one shopper, fetched on demand
    fn find_products(
        &self,
        conn: &mut SqliteConnection,
        shopper_id: ShopperId,
    ) -> AppResult<Vec<Product>>;

    fn count(&self, conn: &mut SqliteConnection) -> AppResult<i64>;

    /// Number of rows in the join table
    fn count_links(&self, conn: &mut SqliteConnection) -> AppResult<i64>;
}
