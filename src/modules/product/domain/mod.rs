pub mod entities;
pub mod repository;

pub use entities::{Product, ProductId};
pub use repository::ProductRepository;
