/// Isolated in-memory test database
///
/// Every `TestDb` is a private SQLite database living on a single pooled
/// connection. It is migrated on creation and disappears when dropped.
use shopper_orders_lib::shared::{Database, Session};
use std::thread;

pub struct TestDb {
    database: Database,
}

impl TestDb {
    pub fn new() -> Self {
        shopper_orders_lib::shared::utils::init_logger();

        let database = Database::in_memory().expect("Failed to create in-memory test database");

        Self { database }
    }

    /// The session is the only way in: it holds the database's one connection.
    pub fn open_session(&self) -> Session {
        self.database
            .open_session()
            .expect("Unable to open a session on the test database")
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if thread::panicking() {
            eprintln!("TestDb dropped during a panic: {:?}", self.database.pool_status());
            return;
        }
        log::debug!("Dropped test database: {:?}", self.database.pool_status());
    }
}
