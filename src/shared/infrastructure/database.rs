use crate::log_info;
use crate::shared::config::DatabaseConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::session::Session;
use crate::shared::utils::logger::LogContext;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

/// Applied to every connection the pool hands out.
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)
    }
}

#[derive(Debug)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Build the pool described by `config` and bring the schema up to date.
    pub fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(config.url.as_str());

        let mut builder = r2d2::Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connect_timeout)
            .connection_customizer(Box::new(SqlitePragmas))
            .test_on_check_out(true);

        // An in-memory database lives exactly as long as its single connection.
        if config.is_in_memory() {
            builder = builder
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = builder.build(manager).map_err(|e| {
            AppError::DatabaseError(format!("Failed to create connection pool: {}", e))
        })?;

        log_info!(
            "Database connection pool initialized for '{}' with max_size: {}",
            config.url,
            pool.max_size()
        );

        let database = Self { pool };
        database.run_migrations()?;
        Ok(database)
    }

    /// Private, migrated in-memory store.
    pub fn in_memory() -> AppResult<Self> {
        Self::connect(&DatabaseConfig::in_memory())
    }

    /// Apply any embedded migrations not yet recorded in the store.
    pub fn run_migrations(&self) -> AppResult<usize> {
        let mut conn = self.get_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

        if !applied.is_empty() {
            log_info!("Applied {} database migration(s)", applied.len());
        }
        Ok(applied.len())
    }

    pub fn get_connection(&self) -> AppResult<DbConnection> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration = start.elapsed().as_millis() as u64;
                if duration > 100 {
                    LogContext::performance_metric("db_connection_acquire", duration, Some("slow"));
                }
                Ok(conn)
            }
            Err(e) => {
                LogContext::error_with_context(
                    &e,
                    "Failed to acquire database connection from pool",
                );
                Err(AppError::from(e))
            }
        }
    }

    /// Check out a connection and hold it for the lifetime of the session.
    pub fn open_session(&self) -> AppResult<Session> {
        Ok(Session::new(self.get_connection()?))
    }

    /// Get pool statistics for monitoring
    pub fn pool_status(&self) -> PoolStatus {
        let state = self.pool.state();
        PoolStatus {
            connections: state.connections,
            idle_connections: state.idle_connections,
            max_size: self.pool.max_size(),
        }
    }
}

#[derive(Debug)]
pub struct PoolStatus {
    pub connections: u32,
    pub idle_connections: u32,
    pub max_size: u32,
}
