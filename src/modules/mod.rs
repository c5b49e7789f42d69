pub mod product;
pub mod shopper;
