//! Database model structs.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A pantry document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Item name, unique within the pantry
    pub id: String,
    pub quantity: f64,
}

impl InventoryItem {
    pub(crate) fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            quantity: row.get(1)?,
        })
    }

    /// Whether the item can be offered to recipe generation
    pub fn is_available(&self) -> bool {
        self.quantity > 0.0
    }
}
