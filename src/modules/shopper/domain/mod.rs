pub mod entities;
pub mod repository;

pub use entities::{Shopper, ShopperId};
pub use repository::ShopperRepository;
