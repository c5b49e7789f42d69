pub mod models;
pub mod repository;

pub use models::{NewProduct, ProductModel};
pub use repository::ProductRepositoryImpl;
