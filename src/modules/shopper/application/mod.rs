pub mod service;

pub use service::{DemoCatalog, OrderService, StoreStats};
