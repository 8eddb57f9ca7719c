//! SQLite-backed recipe store.
//!
//! One [`Store`] is opened per command, passed by reference to everything
//! that touches the database, and closed before the process exits.
//!
//! # Storage Layout
//!
//! ```text
//! recipes ──< recipe_ingredient >── ingredients
//!    │
//!    └─────< recipe_tag >────────── tags
//! ```
//!
//! Link rows cascade away with either endpoint. Ingredient and tag rows are
//! never deleted.

pub mod error;
mod links;
mod names;
mod query;
mod recipes;
pub mod schema;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::config::{self, paths, ResolvedConfig};

pub use error::StoreError;
pub use schema::SCHEMA_VERSION;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Handle to the recipe database
#[derive(Debug)]
pub struct Store {
    conn: Option<Connection>,

    /// Database file (None for in-memory stores)
    path: Option<PathBuf>,

    /// Held exclusively for as long as the store is open
    lock: Option<File>,
}

impl Store {
    /// Open (creating on first use) the store under the configured data home
    pub fn open(config: &ResolvedConfig) -> Result<Self> {
        let app_dir = config.app_dir();
        paths::create_private_dir(&app_dir)
            .map_err(|e| StoreError::unavailable(&app_dir, e))?;

        let lock = acquire_lock(&config.lock_path())?;

        let db_path = config.database_path();
        if !db_path.exists() {
            info!(path = %db_path.display(), "Creating database");
        }

        let mut conn =
            Connection::open(&db_path).map_err(|e| StoreError::unavailable(&db_path, e))?;
        initialize(&mut conn, &db_path)?;

        debug!(path = %db_path.display(), "Database open");

        Ok(Self {
            conn: Some(conn),
            path: Some(db_path),
            lock: Some(lock),
        })
    }

    /// Resolve the data home, then open the store under it.
    ///
    /// Fails with `Configuration` when no data home is configured.
    pub fn open_from(data_home: Option<PathBuf>) -> Result<Self> {
        let config = config::load(data_home)?;
        Self::open(&config)
    }

    /// Open a fresh in-memory store with the full schema
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()
            .map_err(|e| StoreError::unavailable(":memory:", e))?;
        initialize(&mut conn, Path::new(":memory:"))?;

        Ok(Self {
            conn: Some(conn),
            path: None,
            lock: None,
        })
    }

    /// Release the connection and the lock. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                tracing::warn!("Failed to close database cleanly: {}", e);
            }
        }

        if let Some(lock) = self.lock.take() {
            if let Err(e) = lock.unlock() {
                tracing::warn!("Failed to release database lock: {}", e);
            }
        }
    }

    /// Check whether the store is open
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Path to the database file, if the store is file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Version stamp stored in `db_version`
    pub fn schema_version(&self) -> Result<i64> {
        let conn = self.conn()?;
        schema::version(conn).map_err(|e| {
            StoreError::unavailable(self.path.clone().unwrap_or_else(|| ":memory:".into()), e)
        })
    }

    pub(crate) fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(StoreError::NotOpen)
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        self.close();
    }
}

/// Take the advisory lock, waiting for another invocation to finish if needed
fn acquire_lock(lock_path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path)
        .map_err(|e| StoreError::unavailable(lock_path, e))?;

    if file.try_lock_exclusive().is_err() {
        info!("Another menu-helper is using the database, waiting...");
        file.lock_exclusive()
            .map_err(|e| StoreError::unavailable(lock_path, e))?;
    }

    Ok(file)
}

/// Apply connection settings and create the schema on first use
fn initialize(conn: &mut Connection, path: &Path) -> Result<()> {
    schema::configure(conn).map_err(|e| StoreError::unavailable(path, e))?;

    let initialized = schema::is_initialized(conn).map_err(|e| StoreError::unavailable(path, e))?;
    if !initialized {
        schema::create(conn).map_err(|e| StoreError::unavailable(path, e))?;
        return Ok(());
    }

    let found = schema::version(conn).map_err(|e| StoreError::unavailable(path, e))?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found,
            supported: SCHEMA_VERSION,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_layout() {
        let temp = TempDir::new().unwrap();
        let config = ResolvedConfig::with_data_home(temp.path());

        let store = Store::open(&config).unwrap();

        assert!(store.is_open());
        assert_eq!(store.path(), Some(config.database_path().as_path()));
        assert!(config.database_path().exists());
        assert!(config.lock_path().exists());
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_reopen_keeps_data_and_single_version_row() {
        let temp = TempDir::new().unwrap();
        let config = ResolvedConfig::with_data_home(temp.path());

        let mut store = Store::open(&config).unwrap();
        let id = store.add_recipe("Soup", "warm").unwrap();
        store.close();

        let store = Store::open(&config).unwrap();
        assert!(store.recipe_exists(id).unwrap());

        let rows: i64 = store
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM db_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let temp = TempDir::new().unwrap();
        let config = ResolvedConfig::with_data_home(temp.path());

        let mut store = Store::open(&config).unwrap();
        store
            .conn()
            .unwrap()
            .execute("UPDATE db_version SET version = 99", [])
            .unwrap();
        store.close();

        let result = Store::open(&config);
        assert!(matches!(
            result,
            Err(StoreError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_open_from_explicit_data_home() {
        let temp = TempDir::new().unwrap();

        let store = Store::open_from(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(
            store.path(),
            Some(temp.path().join("menu-helper").join("recipes.db").as_path())
        );
    }

    #[test]
    fn test_open_without_data_home_is_configuration_error() {
        // A user config file could supply the data home
        if paths::default_config_file().is_some_and(|p| p.exists()) {
            return;
        }

        let result = Store::open_from(Some(PathBuf::new()));
        assert!(matches!(
            result,
            Err(StoreError::Configuration(config::ConfigError::MissingDataHome))
        ));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        store.close();
        store.close();
        assert!(!store.is_open());
    }

    #[test]
    fn test_closed_store_reports_not_open() {
        let mut store = Store::open_in_memory().unwrap();
        store.close();

        assert!(matches!(store.add_recipe("x", ""), Err(StoreError::NotOpen)));
        assert!(matches!(store.schema_version(), Err(StoreError::NotOpen)));
    }

    #[test]
    fn test_unwritable_data_home_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = Store::open(&ResolvedConfig::with_data_home(&blocker));
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }
}
