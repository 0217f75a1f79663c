//! Object detection endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;
use crate::api::extract::DetectionJson;
use crate::error::DetectionError;

/// Request body for POST /api/object-detection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDetectionRequest {
    /// Data URI or http(s) URL of the photo
    #[serde(default)]
    pub image: Option<String>,
    /// Pantry names the label should prefer
    #[serde(default)]
    pub inventory_items: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDetectionResponse {
    pub detected_object: String,
}

/// POST /api/object-detection - name the item in a photo
pub async fn object_detection_handler(
    State(state): State<Arc<AppState>>,
    DetectionJson(request): DetectionJson<ObjectDetectionRequest>,
) -> Result<Json<ObjectDetectionResponse>, DetectionError> {
    let detected_object = state
        .service
        .detect_object(request.image.as_deref(), &request.inventory_items)
        .await?;

    Ok(Json(ObjectDetectionResponse { detected_object }))
}
