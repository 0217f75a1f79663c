//! HTTP API for the CabiNet service.
//!
//! This module provides the REST API endpoints for:
//! - Health monitoring
//! - Recipe suggestion
//! - Object detection
//! - Pantry inventory
//! - The recipe chat transcript

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::CabinetService;

pub mod chat;
pub mod detection;
pub mod extract;
pub mod inventory;
pub mod recipes;
use chat::{chat_accept_handler, chat_decline_handler, chat_send_handler};
use detection::object_detection_handler;
use inventory::{consume_inventory_handler, list_inventory_handler};
use recipes::suggest_recipe_handler;

/// Application state
pub struct AppState {
    pub service: Arc<CabinetService>,
    pub start_time: Instant,
}

/// Build the API router
pub fn router(service: Arc<CabinetService>) -> Router {
    // Photos arrive inline as data URIs
    let max_body_size = service.config.limits.max_body_bytes;

    let state = Arc::new(AppState {
        service,
        start_time: Instant::now(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Recipe endpoints
        .route("/suggestrecipe", post(suggest_recipe_handler))
        // Detection endpoint
        .route("/object-detection", post(object_detection_handler))
        // Inventory endpoints
        .route("/inventory", get(list_inventory_handler))
        .route("/inventory/consume", post(consume_inventory_handler))
        // Chat endpoints
        .route("/chat/send", post(chat_send_handler))
        .route("/chat/accept", post(chat_accept_handler))
        .route("/chat/decline", post(chat_decline_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// === Health ===

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backend_configured = state.service.backend.is_configured();

    let status = if backend_configured {
        state.service.catalog.get("health-status-healthy")
    } else {
        state.service.catalog.format(
            "health-status-degraded",
            &[("reason", "OpenAI API key is not set")],
        )
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        backend_configured,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
    backend_configured: bool,
}
