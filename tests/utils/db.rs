/// File-backed test databases
///
/// Used where data has to outlive a single connection, e.g. reconnecting
/// with a fresh pool. Files live in the system temp dir and are removed on drop.
use shopper_orders_lib::shared::{Database, DatabaseConfig};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

static FILE_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct FileDb {
    path: PathBuf,
}

impl FileDb {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!(
            "shopper_orders_test_{}_{}.db",
            std::process::id(),
            FILE_DB_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        let _ = std::fs::remove_file(&path);
        Self { path }
    }

    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig::file(self.path.to_string_lossy().into_owned())
    }

    /// New pool over the same file; migrations already applied are skipped.
    pub fn connect(&self) -> Database {
        Database::connect(&self.config()).expect("Failed to open file-backed test database")
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-journal", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(PathBuf::from(file));
        }
    }
}
