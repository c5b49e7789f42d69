use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::time::Duration;

pub const IN_MEMORY_URL: &str = ":memory:";

const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where the embedded store lives and how connections to it are pooled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_URL.to_string(),
            pool_size: 1,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            url: path.into(),
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Read `DATABASE_URL`, `DATABASE_POOL_SIZE` and `DATABASE_CONNECT_TIMEOUT_SECS`.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`DatabaseConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("DATABASE_URL").unwrap_or_else(|| IN_MEMORY_URL.to_string());
        let url = Self::validate_url(raw_url.trim())?;

        let mut config = if url == IN_MEMORY_URL {
            Self::in_memory()
        } else {
            Self::file(url)
        };

        if let Some(size) = lookup("DATABASE_POOL_SIZE") {
            let size: u32 = size.trim().parse()?;
            if size == 0 {
                return Err(AppError::InvalidInput(
                    "DATABASE_POOL_SIZE must be at least 1".to_string(),
                ));
            }
            config.pool_size = size;
        }

        if let Some(secs) = lookup("DATABASE_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = Duration::from_secs(secs.trim().parse()?);
        }

        // Every connection to `:memory:` is its own database.
        if config.is_in_memory() {
            config.pool_size = 1;
        }

        Ok(config)
    }

    pub fn is_in_memory(&self) -> bool {
        self.url == IN_MEMORY_URL
    }

    /// Normalise the URL and reject backends that are not compiled in.
    fn validate_url(raw: &str) -> AppResult<String> {
        if raw.is_empty() {
            return Err(AppError::ConfigError(
                "DATABASE_URL must not be empty".to_string(),
            ));
        }

        if raw == IN_MEMORY_URL {
            return Ok(raw.to_string());
        }

        if let Some(path) = raw.strip_prefix("sqlite://") {
            if path.is_empty() {
                return Err(AppError::ConfigError(
                    "sqlite:// URL is missing a path".to_string(),
                ));
            }
            return Ok(path.to_string());
        }

        if raw.starts_with("file:") {
            return Ok(raw.to_string());
        }

        if let Some((scheme, _)) = raw.split_once("://") {
            return Err(AppError::ConfigError(format!(
                "Unsupported database backend '{}': only the embedded SQLite store is available",
                scheme
            )));
        }

        Ok(raw.to_string())
    }
}
