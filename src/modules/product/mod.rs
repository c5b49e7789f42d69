/// Product catalog module
///
/// Products are the passive side of the shopper/product association: a
/// product never knows which shoppers ordered it.
///
/// Architecture:
/// - Domain: entity and repository trait
/// - Infrastructure: Diesel-based repository implementation
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use domain::{
    entities::{Product, ProductId},
    repository::ProductRepository,
};
pub use infrastructure::ProductRepositoryImpl;
