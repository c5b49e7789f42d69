use crate::modules::product::infrastructure::models::ProductModel;
use crate::schema::{shopper_products, shoppers};
use diesel::prelude::*;

// ============= SHOPPER MODELS =============

// For reading from database - with associations support
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = shoppers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShopperModel {
    pub id: i64,
    pub name: String,
}

// For inserting new shoppers
#[derive(Insertable, Debug)]
#[diesel(table_name = shoppers)]
pub struct NewShopper<'a> {
    pub name: &'a str,
}

// ============= SHOPPER-PRODUCT ASSOCIATION =============

// For reading with associations
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(ShopperModel, foreign_key = shopper_id))]
#[diesel(belongs_to(ProductModel, foreign_key = product_id))]
#[diesel(table_name = shopper_products)]
#[diesel(primary_key(shopper_id, product_id))]
pub struct ShopperProductModel {
    pub shopper_id: i64,
    pub product_id: i64,
}

// For inserting new shopper-product links
#[derive(Insertable, Debug, Clone, Copy)]
#[diesel(table_name = shopper_products)]
pub struct NewShopperProduct {
    pub shopper_id: i64,
    pub product_id: i64,
}
