pub mod models;
pub mod repository;

pub use models::{NewShopper, NewShopperProduct, ShopperModel, ShopperProductModel};
pub use repository::ShopperRepositoryImpl;
