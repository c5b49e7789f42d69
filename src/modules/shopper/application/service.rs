use crate::modules::product::{Product, ProductId, ProductRepository, ProductRepositoryImpl};
use crate::modules::shopper::domain::{
    entities::{Shopper, ShopperId},
    repository::ShopperRepository,
};
use crate::modules::shopper::infrastructure::ShopperRepositoryImpl;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::{DbAccess, Session, UnitOfWork};
use crate::{log_debug, log_info};
use serde::Serialize;
use std::sync::Arc;

/// Fixture plan: shopper name and the 1-based positions of the demo
/// products it orders.
pub const DEMO_ORDERS: [(&str, &[usize]); 3] = [
    ("NAME-1", &[1, 2, 5]),
    ("NAME-2", &[1, 3, 4, 5]),
    ("NAME-3", &[4, 6, 7]),
];

pub const DEMO_PRODUCT_COUNT: usize = 7;

#[derive(Debug, Clone, Serialize)]
pub struct DemoCatalog {
    pub products: Vec<Product>,
    pub shoppers: Vec<Shopper>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub products: i64,
    pub shoppers: i64,
    pub links: i64,
}

pub struct OrderService {
    product_repo: Arc<dyn ProductRepository>,
    shopper_repo: Arc<dyn ShopperRepository>,
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new(
            Arc::new(ProductRepositoryImpl::new()),
            Arc::new(ShopperRepositoryImpl::new()),
        )
    }
}

impl OrderService {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        shopper_repo: Arc<dyn ShopperRepository>,
    ) -> Self {
        Self {
            product_repo,
            shopper_repo,
        }
    }

    // -------------------------------------------------------------------------
    // Writes (always inside a unit of work)
    // -------------------------------------------------------------------------

    /// Write a transient product and return its persisted form.
    ///
    /// `product` itself stays transient; the returned copy carries the id
    /// and is only meaningful once the unit of work commits.
    pub fn persist_product(
        &self,
        uow: &mut UnitOfWork<'_>,
        product: &Product,
    ) -> AppResult<Product> {
        if let Some(id) = product.id() {
            return Err(AppError::PreconditionViolation(format!(
                "Product {} is already persisted",
                id
            )));
        }

        let id = self.product_repo.insert(uow.conn(), product.name())?;
        log_debug!("Persisted product '{}' as {}", product.name(), id);

        Ok(Product::persisted(id, product.name().to_string()))
    }

    /// Write a transient shopper together with all of its order links.
    pub fn persist_shopper(
        &self,
        uow: &mut UnitOfWork<'_>,
        shopper: &Shopper,
    ) -> AppResult<Shopper> {
        if let Some(id) = shopper.id() {
            return Err(AppError::PreconditionViolation(format!(
                "Shopper {} is already persisted",
                id
            )));
        }

        // An ordered value may come from a unit that was rolled back, and its
        // id may since have been handed to another row.
        for product in shopper.products() {
            self.ensure_committed(uow, product)?;
        }

        let id = self.shopper_repo.insert(uow.conn(), shopper.name())?;
        let product_ids = shopper.product_ids();
        let linked = self
            .shopper_repo
            .link_products(uow.conn(), id, &product_ids)?;

        if linked != product_ids.len() {
            return Err(AppError::InternalError(format!(
                "Shopper {} expected {} order links, wrote {}",
                id,
                product_ids.len(),
                linked
            )));
        }

        log_debug!(
            "Persisted shopper '{}' as {} with {} order(s)",
            shopper.name(),
            id,
            linked
        );

        Ok(Shopper::persisted(
            id,
            shopper.name().to_string(),
            shopper.products().cloned().collect(),
        ))
    }

    fn ensure_committed(&self, uow: &mut UnitOfWork<'_>, product: &Product) -> AppResult<()> {
        let id = product.id().ok_or_else(|| {
            AppError::PreconditionViolation(format!("{} has not been persisted", product))
        })?;

        match self.product_repo.find_by_id(uow.conn(), id)? {
            Some(stored) if stored.name() == product.name() => Ok(()),
            Some(stored) => Err(AppError::PreconditionViolation(format!(
                "{} does not match the stored {}",
                product, stored
            ))),
            None => Err(AppError::PreconditionViolation(format!(
                "{} was never committed",
                product
            ))),
        }
    }

    // -------------------------------------------------------------------------
    // Reads (session or unit of work)
    // -------------------------------------------------------------------------

    pub fn find_product(
        &self,
        access: &mut impl DbAccess,
        id: ProductId,
    ) -> AppResult<Option<Product>> {
        self.product_repo.find_by_id(access.conn(), id)
    }

    /// Like `find_product`, but absence is an error.
    pub fn require_product(&self, access: &mut impl DbAccess, id: ProductId) -> AppResult<Product> {
        self.find_product(access, id)?
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))
    }

    pub fn find_shopper(
        &self,
        access: &mut impl DbAccess,
        id: ShopperId,
    ) -> AppResult<Option<Shopper>> {
        self.shopper_repo.find_by_id(access.conn(), id)
    }

    pub fn require_shopper(&self, access: &mut impl DbAccess, id: ShopperId) -> AppResult<Shopper> {
        self.find_shopper(access, id)?
            .ok_or_else(|| AppError::NotFound(format!("Shopper with ID {} not found", id)))
    }

    pub fn all_shoppers(&self, access: &mut impl DbAccess) -> AppResult<Vec<Shopper>> {
        self.shopper_repo.find_all(access.conn())
    }

    /// Fresh read of the products a shopper has ordered.
    pub fn products_of(
        &self,
        access: &mut impl DbAccess,
        shopper_id: ShopperId,
    ) -> AppResult<Vec<Product>> {
        if !self.shopper_repo.exists(access.conn(), shopper_id)? {
            return Err(AppError::NotFound(format!(
                "Shopper with ID {} not found",
                shopper_id
            )));
        }
        self.shopper_repo.find_products(access.conn(), shopper_id)
    }

    pub fn stats(&self, access: &mut impl DbAccess) -> AppResult<StoreStats> {
        Ok(StoreStats {
            products: self.product_repo.count(access.conn())?,
            shoppers: self.shopper_repo.count(access.conn())?,
            links: self.shopper_repo.count_links(access.conn())?,
        })
    }

    // -------------------------------------------------------------------------
    // One unit of work per call
    // -------------------------------------------------------------------------

    pub fn register_product(&self, session: &mut Session, name: &str) -> AppResult<Product> {
        let transient = Product::new(name);
        session.transaction(|uow| self.persist_product(uow, &transient))
    }

    /// Register each name in its own unit of work, in order. Stops at the
    /// first failure; products committed before it stay committed.
    pub fn register_products<I, S>(&self, session: &mut Session, names: I) -> AppResult<Vec<Product>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.register_product(session, name.as_ref()))
            .collect()
    }

    /// Create a shopper that orders the given, already committed products.
    pub fn register_shopper(
        &self,
        session: &mut Session,
        name: &str,
        product_ids: &[ProductId],
    ) -> AppResult<Shopper> {
        session.transaction(|uow| {
            let mut shopper = Shopper::new(name);
            for id in product_ids {
                let product = self.require_product(uow, *id)?;
                shopper.order(&product)?;
            }
            self.persist_shopper(uow, &shopper)
        })
    }

    /// Products NAME-1..NAME-7, then the three shoppers of [`DEMO_ORDERS`].
    pub fn seed_demo_catalog(&self, session: &mut Session) -> AppResult<DemoCatalog> {
        let names = (1..=DEMO_PRODUCT_COUNT).map(|seq| format!("NAME-{}", seq));
        let products = self.register_products(session, names)?;

        let mut product_ids = Vec::with_capacity(products.len());
        for product in &products {
            let id = product.id().ok_or_else(|| {
                AppError::InternalError(format!("{} was committed without an id", product))
            })?;
            // Re-read to make sure the commit is visible.
            self.require_product(session, id)?;
            product_ids.push(id);
        }

        let mut shoppers = Vec::with_capacity(DEMO_ORDERS.len());
        for (name, positions) in DEMO_ORDERS {
            let ordered = positions
                .iter()
                .map(|pos| {
                    product_ids.get(pos - 1).copied().ok_or_else(|| {
                        AppError::InternalError(format!("No demo product at position {}", pos))
                    })
                })
                .collect::<AppResult<Vec<_>>>()?;
            shoppers.push(self.register_shopper(session, name, &ordered)?);
        }

        log_info!(
            "Seeded {} products and {} shoppers",
            products.len(),
            shoppers.len()
        );

        Ok(DemoCatalog { products, shoppers })
    }
}
