// Shared kernel: configuration, errors, persistence plumbing and logging
// used by every module.

pub mod config;
pub mod errors;
pub mod infrastructure;
pub mod utils;

// Re-exports for convenience
pub use config::DatabaseConfig;
pub use errors::{AppError, AppResult};
pub use infrastructure::database::Database;
pub use infrastructure::session::{DbAccess, Session, TransactionState, UnitOfWork};
