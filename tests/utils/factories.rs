/// Test data factories
use shopper_orders_lib::modules::shopper::OrderService;
use shopper_orders_lib::shared::Session;
use shopper_orders_lib::{Product, ProductId};

/// "NAME-1".."NAME-n"
pub fn product_names(n: usize) -> Vec<String> {
    (1..=n).map(|seq| format!("NAME-{}", seq)).collect()
}

/// Commit `n` products, one unit of work each.
pub fn seed_products(service: &OrderService, session: &mut Session, n: usize) -> Vec<Product> {
    service
        .register_products(session, product_names(n))
        .expect("Failed to seed products")
}

pub fn ids_of(products: &[Product]) -> Vec<ProductId> {
    products
        .iter()
        .map(|p| p.id().expect("seeded product has no id"))
        .collect()
}

pub fn names_of(products: &[Product]) -> Vec<String> {
    products.iter().map(|p| p.name().to_string()).collect()
}
