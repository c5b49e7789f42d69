/// Diesel-based implementation of ProductRepository
use crate::modules::product::domain::entities::{Product, ProductId};
use crate::modules::product::domain::repository::ProductRepository;
use crate::modules::product::infrastructure::models::{NewProduct, ProductModel};
use crate::schema::products;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

#[derive(Debug, Default, Clone, Copy)]
pub struct ProductRepositoryImpl;

impl ProductRepositoryImpl {
    pub fn new() -> Self {
        Self
    }
}

impl ProductRepository for ProductRepositoryImpl {
    fn insert(&self, conn: &mut SqliteConnection, name: &str) -> AppResult<ProductId> {
        LogContext::db_operation("insert", "products", None);

        let id: i64 = diesel::insert_into(products::table)
            .values(&NewProduct { name })
            .returning(products::id)
            .get_result(conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert product: {}", e)))?;

        Ok(ProductId::new(id))
    }

    fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: ProductId,
    ) -> AppResult<Option<Product>> {
        let model: Option<ProductModel> = products::table
            .find(id.value())
            .select(ProductModel::as_select())
            .first(conn)
            .optional()?;

        Ok(model.map(ProductModel::into_entity))
    }

    fn count(&self, conn: &mut SqliteConnection) -> AppResult<i64> {
        let total = products::table.count().get_result(conn)?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::infrastructure::{Database, DbAccess};

    #[test]
    fn insert_assigns_increasing_ids() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ProductRepositoryImpl::new();

        let first = repo.insert(session.conn(), "NAME-1").unwrap();
        let second = repo.insert(session.conn(), "NAME-2").unwrap();

        assert!(second > first);
        assert_eq!(repo.count(session.conn()).unwrap(), 2);
    }

    #[test]
    fn find_by_id_round_trips_name() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ProductRepositoryImpl::new();

        let id = repo.insert(session.conn(), "widget").unwrap();
        let found = repo.find_by_id(session.conn(), id).unwrap().unwrap();

        assert_eq!(found.id(), Some(id));
        assert_eq!(found.name(), "widget");
    }

    #[test]
    fn missing_product_is_none() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ProductRepositoryImpl::new();

        let found = repo.find_by_id(session.conn(), ProductId::new(42)).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn duplicate_and_blank_names_are_allowed() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ProductRepositoryImpl::new();

        let a = repo.insert(session.conn(), "same").unwrap();
        let b = repo.insert(session.conn(), "same").unwrap();
        repo.insert(session.conn(), "").unwrap();

        assert_ne!(a, b);
        assert_eq!(repo.count(session.conn()).unwrap(), 3);
    }
}
