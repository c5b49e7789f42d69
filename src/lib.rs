pub mod modules;
mod schema;
pub mod shared;

use modules::shopper::{OrderService, ShopperId};
use rand::seq::SliceRandom;
use shared::utils::init_logger;
use shared::{AppError, AppResult, Database, DatabaseConfig};

pub use modules::product::{Product, ProductId};
pub use modules::shopper::Shopper;

/// Seed the demo catalog, then walk the orders of one shopper picked at random.
pub fn run() -> AppResult<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    let config = DatabaseConfig::from_env()?;
    let database = Database::connect(&config)?;
    let service = OrderService::default();

    let mut session = database.open_session()?;
    let catalog = service.seed_demo_catalog(&mut session)?;

    let shopper_ids: Vec<ShopperId> = catalog.shoppers.iter().filter_map(Shopper::id).collect();
    let shopper_id = *shopper_ids
        .choose(&mut rand::thread_rng())
        .ok_or_else(|| AppError::InternalError("No shoppers were seeded".to_string()))?;

    let shopper = service.require_shopper(&mut session, shopper_id)?;
    log_info!("\t+ shopper: {}", shopper);

    for product in service.products_of(&mut session, shopper_id)? {
        log_info!("\t\t- {}", product);
    }

    let stats = service.stats(&mut session)?;
    log_info!("Store now holds {}", serde_json::to_string(&stats)?);

    session.close();
    Ok(())
}
