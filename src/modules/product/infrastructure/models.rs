/// Diesel models for the products table
use crate::modules::product::domain::entities::{Product, ProductId};
use crate::schema::products;
use diesel::prelude::*;

/// Diesel model for querying existing products
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductModel {
    pub id: i64,
    pub name: String,
}

/// Diesel model for inserting new products
#[derive(Insertable, Debug)]
#[diesel(table_name = products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
}

impl ProductModel {
    /// Convert to domain Product
    pub fn into_entity(self) -> Product {
        Product::persisted(ProductId::new(self.id), self.name)
    }
}
