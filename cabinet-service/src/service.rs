//! Service coordinator.
//!
//! Owns the configuration, the inventory store, the chat-completion backend
//! and the message catalog. HTTP handlers call into the operations defined in
//! the submodules:
//! - [`suggest`]: recipe suggestion
//! - [`detection`]: object detection from a photo
//! - [`inventory`]: pantry reads and recipe consumption
//! - [`chat`]: transcript operations for the chat client

pub mod chat;
mod detection;
pub mod inventory;
mod suggest;

pub use chat::{ChatMessage, ChatTurn};
pub use inventory::InventoryUpdateReport;

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::InventoryStore;
use crate::messages::MessageCatalog;
use crate::openai::ChatBackend;

/// Main service coordinator
pub struct CabinetService {
    pub config: Arc<Config>,
    pub store: Arc<dyn InventoryStore>,
    pub backend: Arc<dyn ChatBackend>,
    pub catalog: MessageCatalog,
}

impl CabinetService {
    /// Create a new service instance from already-built collaborators
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn InventoryStore>,
        backend: Arc<dyn ChatBackend>,
    ) -> Self {
        info!("Initializing CabiNet service");

        if backend.is_configured() {
            info!(url = %config.openai.base_url, "AI backend credential configured");
        } else {
            warn!("No AI backend credential configured; recipe and detection endpoints will fail");
        }

        Self {
            config,
            store,
            backend,
            catalog: MessageCatalog::new(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::db::Database;
    use crate::openai::fake::FakeBackend;

    /// Service over an in-memory pantry and a scripted backend
    pub fn service_with(
        config: Config,
        pantry: &[(&str, f64)],
        backend: Arc<FakeBackend>,
    ) -> (CabinetService, Arc<Database>) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        for (name, quantity) in pantry {
            db.seed_item(name, *quantity).unwrap();
        }
        let service = CabinetService::new(Arc::new(config), db.clone(), backend);
        (service, db)
    }

    pub const CARROT_RICE: &str = r#"{
        "name": "Carrot Rice",
        "ingredients": ["1 cup rice", "2 carrots", "pinch of salt"],
        "steps": ["Rinse the rice.", "Simmer with carrots.", "Season."],
        "ingredientsWithQuantities": [
            { "name": "Rice", "quantity": 1 },
            { "name": "Carrots", "quantity": 2 },
            { "name": "Salt", "quantity": 1 }
        ]
    }"#;
}
