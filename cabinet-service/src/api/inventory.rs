//! Pantry inventory endpoints.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;
use crate::api::extract::JsonBody;
use crate::error::ServiceError;
use crate::recipe::IngredientQuantity;
use crate::service::InventoryUpdateReport;

/// Response for GET /api/inventory
#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    /// In-stock item names
    pub items: Vec<String>,
}

/// Request body for POST /api/inventory/consume
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumeRequest {
    pub ingredients_with_quantities: Vec<IngredientQuantity>,
}

/// GET /api/inventory - names of items currently in stock
pub async fn list_inventory_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InventoryResponse>, ServiceError> {
    let items = state.service.available_items()?;
    Ok(Json(InventoryResponse { items }))
}

/// POST /api/inventory/consume - decrement the pantry by a recipe's quantities
pub async fn consume_inventory_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<ConsumeRequest>,
) -> Result<Json<InventoryUpdateReport>, ServiceError> {
    let report = state
        .service
        .consume_ingredients(&request.ingredients_with_quantities)?;
    Ok(Json(report))
}
