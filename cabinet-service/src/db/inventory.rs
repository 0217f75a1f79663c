//! Pantry inventory storage operations.

use chrono::Utc;
use rusqlite::{OptionalExtension, params};

use super::models::InventoryItem;
use super::{Database, InventoryStore};
use crate::error::{DatabaseError, ServiceResult};

impl InventoryStore for Database {
    fn list_items(&self) -> ServiceResult<Vec<InventoryItem>> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare("SELECT id, quantity FROM inventory ORDER BY id")
            .map_err(DatabaseError::Query)?;

        let items = stmt
            .query_map([], InventoryItem::from_row)
            .map_err(DatabaseError::Query)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(DatabaseError::Query)?;

        Ok(items)
    }

    fn get_item(&self, id: &str) -> ServiceResult<Option<InventoryItem>> {
        let conn = self.conn()?;

        let item = conn
            .query_row(
                "SELECT id, quantity FROM inventory WHERE id = ?1",
                params![id],
                InventoryItem::from_row,
            )
            .optional()
            .map_err(DatabaseError::Query)?;

        Ok(item)
    }

    fn set_quantity(&self, id: &str, quantity: f64) -> ServiceResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "UPDATE inventory SET quantity = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, quantity, Utc::now().to_rfc3339()],
        )
        .map_err(DatabaseError::Query)?;

        Ok(())
    }
}

#[cfg(test)]
impl Database {
    /// Insert or replace a pantry document
    pub fn seed_item(&self, id: &str, quantity: f64) -> ServiceResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO inventory (id, quantity) VALUES (?1, ?2) \
             ON CONFLICT(id) DO UPDATE SET quantity = excluded.quantity",
            params![id, quantity],
        )
        .map_err(DatabaseError::Query)?;

        Ok(())
    }
}
