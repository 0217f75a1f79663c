//! Database module for SQLite operations.
//!
//! The pantry lives in a single `inventory` table keyed by item name. The
//! service talks to it through the [`InventoryStore`] trait so the updater can
//! be exercised against stores that fail part-way.

mod inventory;
mod migrations;
pub mod models;

pub use models::InventoryItem;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::{DatabaseError, ServiceError, ServiceResult};

/// Document-store operations needed by the pantry reader and updater
pub trait InventoryStore: Send + Sync {
    /// Every pantry document, in id order
    fn list_items(&self) -> ServiceResult<Vec<InventoryItem>>;

    /// A single pantry document by exact id
    fn get_item(&self, id: &str) -> ServiceResult<Option<InventoryItem>>;

    /// Overwrite the quantity of an existing document
    fn set_quantity(&self, id: &str, quantity: f64) -> ServiceResult<()>;
}

/// Database manager for SQLite operations
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: &Path) -> ServiceResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ServiceError::Database(DatabaseError::Connection(
                    rusqlite::Error::ToSqlConversionFailure(Box::new(e)),
                ))
            })?;
        }

        let conn = Connection::open(path).map_err(DatabaseError::Connection)?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(DatabaseError::Query)?;

        Self::with_connection(conn)
    }

    /// In-memory database for tests
    #[cfg(test)]
    pub fn open_in_memory() -> ServiceResult<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::Connection)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> ServiceResult<Self> {
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> ServiceResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| ServiceError::Internal {
            message: "database connection mutex poisoned".to_string(),
        })
    }
}
