/// Shared infrastructure concerns
///
/// Connection pooling, migrations and the session/unit-of-work boundary that
/// every repository writes through.
pub mod database;
pub mod session;

// Re-exports for convenience
pub use database::{Database, DbConnection, DbPool};
pub use session::{DbAccess, Session, TransactionState, UnitOfWork};
