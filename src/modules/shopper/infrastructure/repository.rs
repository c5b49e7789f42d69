use crate::modules::product::domain::entities::{Product, ProductId};
use crate::modules::product::infrastructure::models::ProductModel;
use crate::modules::shopper::domain::{
    entities::{Shopper, ShopperId},
    repository::ShopperRepository,
};
use crate::modules::shopper::infrastructure::models::{
    NewShopper, NewShopperProduct, ShopperModel, ShopperProductModel,
};
use crate::schema::{products, shopper_products, shoppers};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

#[derive(Debug, Default, Clone, Copy)]
pub struct ShopperRepositoryImpl;

impl ShopperRepositoryImpl {
    pub fn new() -> Self {
        Self
    }
}

impl ShopperRepository for ShopperRepositoryImpl {
    fn insert(&self, conn: &mut SqliteConnection, name: &str) -> AppResult<ShopperId> {
        LogContext::db_operation("insert", "shoppers", None);

        let id: i64 = diesel::insert_into(shoppers::table)
            .values(&NewShopper { name })
            .returning(shoppers::id)
            .get_result(conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert shopper: {}", e)))?;

        Ok(ShopperId::new(id))
    }

    fn link_products(
        &self,
        conn: &mut SqliteConnection,
        shopper_id: ShopperId,
        product_ids: &[ProductId],
    ) -> AppResult<usize> {
        let mut written = 0;

        // relies on PRIMARY KEY (shopper_id, product_id) in DB
        for product_id in product_ids {
            let link = NewShopperProduct {
                shopper_id: shopper_id.value(),
                product_id: product_id.value(),
            };
            written += diesel::insert_or_ignore_into(shopper_products::table)
                .values(&link)
                .execute(conn)
                .map_err(|e| {
                    AppError::DatabaseError(format!(
                        "Failed to link product {} to shopper {}: {}",
                        product_id, shopper_id, e
                    ))
                })?;
        }

        LogContext::db_operation("link", "shopper_products", None);
        Ok(written)
    }

    fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: ShopperId,
    ) -> AppResult<Option<Shopper>> {
        let model: Option<ShopperModel> = shoppers::table
            .find(id.value())
            .select(ShopperModel::as_select())
            .first(conn)
            .optional()?;

        match model {
            Some(m) => {
                let out = Self::load_shoppers_with_products(conn, vec![m])?;
                Ok(out.into_iter().next())
            }
            None => Ok(None),
        }
    }

    fn exists(&self, conn: &mut SqliteConnection, id: ShopperId) -> AppResult<bool> {
        use diesel::dsl::exists;
        use diesel::select;

        let found = select(exists(shoppers::table.find(id.value())))
            .get_result::<bool>(conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to check shopper {}: {}", id, e)))?;
        Ok(found)
    }

    fn find_all(&self, conn: &mut SqliteConnection) -> AppResult<Vec<Shopper>> {
        let models: Vec<ShopperModel> = shoppers::table
            .order(shoppers::id.asc())
            .select(ShopperModel::as_select())
            .load(conn)?;

        Self::load_shoppers_with_products(conn, models)
    }

    fn find_products(
        &self,
        conn: &mut SqliteConnection,
        shopper_id: ShopperId,
    ) -> AppResult<Vec<Product>> {
        // join + select only product columns
        let rows: Vec<ProductModel> = shopper_products::table
            .inner_join(products::table)
            .filter(shopper_products::shopper_id.eq(shopper_id.value()))
            .select(ProductModel::as_select())
            .order(products::id.asc())
            .load(conn)?;

        Ok(rows.into_iter().map(ProductModel::into_entity).collect())
    }

    fn count(&self, conn: &mut SqliteConnection) -> AppResult<i64> {
        let total = shoppers::table.count().get_result(conn)?;
        Ok(total)
    }

    fn count_links(&self, conn: &mut SqliteConnection) -> AppResult<i64> {
        let total = shopper_products::table.count().get_result(conn)?;
        Ok(total)
    }
}

impl ShopperRepositoryImpl {
    /// Load shoppers with their products, grouped per shopper and ordered by product id.
    fn load_shoppers_with_products(
        conn: &mut SqliteConnection,
        shopper_models: Vec<ShopperModel>,
    ) -> AppResult<Vec<Shopper>> {
        if shopper_models.is_empty() {
            return Ok(Vec::new());
        }

        let pairs: Vec<(ShopperProductModel, ProductModel)> =
            ShopperProductModel::belonging_to(&shopper_models)
                .inner_join(products::table)
                .select((ShopperProductModel::as_select(), ProductModel::as_select()))
                .order(products::id.asc())
                .load(conn)?;

        let grouped = pairs.grouped_by(&shopper_models);

        let out = shopper_models
            .into_iter()
            .zip(grouped)
            .map(|(m, links)| {
                let products = links
                    .into_iter()
                    .map(|(_, p)| p.into_entity())
                    .collect();
                Shopper::persisted(ShopperId::new(m.id), m.name, products)
            })
            .collect();

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::product::domain::repository::ProductRepository;
    use crate::modules::product::infrastructure::repository::ProductRepositoryImpl;
    use crate::shared::errors::AppError;
    use crate::shared::infrastructure::{Database, DbAccess};

    fn seed_products(conn: &mut SqliteConnection, n: usize) -> Vec<ProductId> {
        let repo = ProductRepositoryImpl::new();
        (1..=n)
            .map(|i| repo.insert(conn, &format!("NAME-{}", i)).unwrap())
            .collect()
    }

    #[test]
    fn links_are_read_back_through_join() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ShopperRepositoryImpl::new();
        let ids = seed_products(session.conn(), 5);

        let shopper = repo.insert(session.conn(), "NAME-1").unwrap();
        let written = repo
            .link_products(session.conn(), shopper, &[ids[0], ids[1], ids[4]])
            .unwrap();
        assert_eq!(written, 3);

        let products = repo.find_products(session.conn(), shopper).unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["NAME-1", "NAME-2", "NAME-5"]);
    }

    #[test]
    fn duplicate_links_are_ignored() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ShopperRepositoryImpl::new();
        let ids = seed_products(session.conn(), 1);

        let shopper = repo.insert(session.conn(), "NAME-1").unwrap();
        let written = repo
            .link_products(session.conn(), shopper, &[ids[0], ids[0]])
            .unwrap();
        let again = repo.link_products(session.conn(), shopper, &[ids[0]]).unwrap();

        assert_eq!(written, 1);
        assert_eq!(again, 0);
        assert_eq!(repo.count_links(session.conn()).unwrap(), 1);
    }

    #[test]
    fn linking_unknown_product_violates_foreign_key() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ShopperRepositoryImpl::new();

        let shopper = repo.insert(session.conn(), "NAME-1").unwrap();
        let err = repo
            .link_products(session.conn(), shopper, &[ProductId::new(99)])
            .unwrap_err();

        assert!(matches!(err, AppError::DatabaseError(_)));
        assert_eq!(repo.count_links(session.conn()).unwrap(), 0);
    }

    #[test]
    fn find_by_id_loads_products() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ShopperRepositoryImpl::new();
        let ids = seed_products(session.conn(), 3);

        let shopper = repo.insert(session.conn(), "NAME-2").unwrap();
        repo.link_products(session.conn(), shopper, &[ids[2], ids[0]])
            .unwrap();

        let loaded = repo.find_by_id(session.conn(), shopper).unwrap().unwrap();
        assert_eq!(loaded.id(), Some(shopper));
        assert_eq!(loaded.name(), "NAME-2");
        assert_eq!(loaded.product_ids(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn find_all_groups_products_per_shopper() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ShopperRepositoryImpl::new();
        let ids = seed_products(session.conn(), 2);

        let a = repo.insert(session.conn(), "a").unwrap();
        let b = repo.insert(session.conn(), "b").unwrap();
        let c = repo.insert(session.conn(), "c").unwrap();
        repo.link_products(session.conn(), a, &[ids[0]]).unwrap();
        repo.link_products(session.conn(), c, &[ids[0], ids[1]])
            .unwrap();

        let all = repo.find_all(session.conn()).unwrap();
        let summary: Vec<_> = all
            .iter()
            .map(|s| (s.id().unwrap(), s.product_count()))
            .collect();
        assert_eq!(summary, vec![(a, 1), (b, 0), (c, 2)]);
    }

    #[test]
    fn missing_shopper_is_none() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ShopperRepositoryImpl::new();

        assert!(!repo.exists(session.conn(), ShopperId::new(1)).unwrap());
        assert!(repo
            .find_by_id(session.conn(), ShopperId::new(1))
            .unwrap()
            .is_none());
        assert!(repo
            .find_products(session.conn(), ShopperId::new(1))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn exists_sees_shoppers_without_orders() {
        let db = Database::in_memory().unwrap();
        let mut session = db.open_session().unwrap();
        let repo = ShopperRepositoryImpl::new();

        let id = repo.insert(session.conn(), "NAME-1").unwrap();
        assert!(repo.exists(session.conn(), id).unwrap());
        assert!(!repo.exists(session.conn(), ShopperId::new(id.value() + 1)).unwrap());
    }
}
