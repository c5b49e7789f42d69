/// Shopper module
///
/// Shoppers own the many-to-many association with products. The link is
/// navigable from a shopper to its products only.
///
/// Architecture:
/// - Domain: entity, ordering rule and repository trait
/// - Infrastructure: Diesel models for `shoppers` and `shopper_products`
/// - Application: `OrderService`, the unit-of-work level operations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use application::service::{DemoCatalog, OrderService, StoreStats, DEMO_ORDERS};
pub use domain::{
    entities::{Shopper, ShopperId},
    repository::ShopperRepository,
};
pub use infrastructure::ShopperRepositoryImpl;
