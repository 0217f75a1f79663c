//! Pantry reads and recipe consumption.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::db::InventoryStore;
use crate::error::{ServiceError, ServiceResult};
use crate::recipe::IngredientQuantity;

use super::CabinetService;

/// Always-available ingredients, matched as substrings of the lower-cased name
const STAPLES: &[&str] = &["milk", "oil", "water", "salt", "pepper"];

/// Whether an ingredient is a staple that is never decremented
pub fn is_staple(name: &str) -> bool {
    let lower = name.to_lowercase();
    STAPLES.iter().any(|staple| lower.contains(staple))
}

/// A pantry item whose quantity was changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumedItem {
    pub name: String,
    pub previous: f64,
    pub remaining: f64,
}

/// Outcome of applying a recipe to the pantry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdateReport {
    pub updated: Vec<ConsumedItem>,
    pub skipped_staples: Vec<String>,
    pub skipped_untracked: Vec<String>,
    pub skipped_invalid: Vec<String>,
}

impl CabinetService {
    /// Names of pantry items with a positive quantity, in id order
    pub fn available_items(&self) -> ServiceResult<Vec<String>> {
        let items: Vec<String> = self
            .store
            .list_items()?
            .into_iter()
            .filter(|item| item.is_available())
            .map(|item| item.id)
            .collect();

        debug!(count = items.len(), "Loaded available inventory");
        Ok(items)
    }

    /// Decrement the pantry by an accepted recipe's quantities
    pub fn consume_ingredients(
        &self,
        items: &[IngredientQuantity],
    ) -> ServiceResult<InventoryUpdateReport> {
        consume(self.store.as_ref(), items)
    }
}

/// Apply quantities one entry at a time.
///
/// Not transactional: a failed entry does not stop later ones, and updates
/// made before a failure are kept. Failures are reported together at the end.
fn consume(
    store: &dyn InventoryStore,
    items: &[IngredientQuantity],
) -> ServiceResult<InventoryUpdateReport> {
    let mut report = InventoryUpdateReport::default();
    let mut failed = Vec::new();

    for item in items {
        if is_staple(&item.name) {
            report.skipped_staples.push(item.name.clone());
            continue;
        }

        let requested = item.amount();
        if !requested.is_finite() || requested < 0.0 {
            warn!(item = %item.name, quantity = %item.quantity, "Ignoring invalid recipe quantity");
            report.skipped_invalid.push(item.name.clone());
            continue;
        }

        let result = store.get_item(&item.name).and_then(|existing| {
            let Some(existing) = existing else {
                return Ok(None);
            };
            let remaining = (existing.quantity - requested).max(0.0);
            store.set_quantity(&item.name, remaining)?;
            Ok(Some(ConsumedItem {
                name: item.name.clone(),
                previous: existing.quantity,
                remaining,
            }))
        });

        match result {
            Ok(Some(consumed)) => {
                debug!(
                    item = %consumed.name,
                    previous = consumed.previous,
                    remaining = consumed.remaining,
                    "Pantry quantity updated"
                );
                report.updated.push(consumed);
            }
            Ok(None) => report.skipped_untracked.push(item.name.clone()),
            Err(e) => {
                error!(item = %item.name, error = %e, "Failed to update pantry item");
                failed.push(item.name.clone());
            }
        }
    }

    if !failed.is_empty() {
        return Err(ServiceError::InventoryUpdate { failed });
    }

    info!(
        updated = report.updated.len(),
        staples = report.skipped_staples.len(),
        untracked = report.skipped_untracked.len(),
        "Recipe applied to pantry"
    );
    Ok(report)
}
