//! Chat transcript endpoints.
//!
//! The client owns the transcript and sends it with every call.

use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::AppState;
use crate::api::extract::JsonBody;
use crate::error::ServiceError;
use crate::recipe::{Recipe, RecipeOptions};
use crate::service::{ChatMessage, ChatTurn};

/// Request body for POST /api/chat/send
#[derive(Debug, Deserialize)]
pub struct ChatSendRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub input: String,
    #[serde(default)]
    pub options: Option<RecipeOptions>,
}

/// Request body for POST /api/chat/accept
#[derive(Debug, Deserialize)]
pub struct ChatAcceptRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub recipe: Recipe,
}

/// Request body for POST /api/chat/decline
#[derive(Debug, Deserialize)]
pub struct ChatDeclineRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// POST /api/chat/send
pub async fn chat_send_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<ChatSendRequest>,
) -> Result<Json<ChatTurn>, ServiceError> {
    let options = request.options.unwrap_or_default();
    let turn = state
        .service
        .chat_send(request.messages, &request.input, &options)
        .await?;
    Ok(Json(turn))
}

/// POST /api/chat/accept
pub async fn chat_accept_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<ChatAcceptRequest>,
) -> Json<ChatTurn> {
    Json(state.service.chat_accept(request.messages, &request.recipe))
}

/// POST /api/chat/decline
pub async fn chat_decline_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<ChatDeclineRequest>,
) -> Json<ChatTurn> {
    Json(state.service.chat_decline(request.messages))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    use crate::api::router;
    use crate::api::test_support::{call, post_json};
    use crate::config::Config;
    use crate::db::InventoryStore;
    use crate::openai::fake::FakeBackend;
    use crate::service::test_support::{CARROT_RICE, service_with};

    #[tokio::test]
    async fn test_full_conversation() {
        let (service, db) = service_with(
            Config::default(),
            &[("Rice", 2.0), ("Carrots", 5.0)],
            Arc::new(FakeBackend::replying(CARROT_RICE)),
        );
        let app = router(Arc::new(service));

        let (status, sent) = call(
            app.clone(),
            post_json(
                "/api/chat/send",
                json!({ "messages": [], "input": "Dinner for two", "options": { "servingSize": 2 } }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sent["messages"].as_array().unwrap().len(), 3);
        assert_eq!(sent["messages"][2]["buttons"], true);

        let (status, accepted) = call(
            app,
            post_json(
                "/api/chat/accept",
                json!({ "messages": sent["messages"], "recipe": sent["recipe"] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let last = accepted["messages"].as_array().unwrap().last().cloned();
        assert_eq!(
            last.as_ref().and_then(|m| m["content"].as_str()),
            Some("✅ Ingredients updated in your pantry!")
        );
        assert_eq!(db.get_item("Carrots").unwrap().unwrap().quantity, 3.0);
    }

    #[tokio::test]
    async fn test_decline_keeps_pantry() {
        let (service, db) = service_with(
            Config::default(),
            &[("Rice", 2.0)],
            Arc::new(FakeBackend::replying(CARROT_RICE)),
        );

        let (status, body) = call(
            router(Arc::new(service)),
            post_json(
                "/api/chat/decline",
                json!({ "messages": [{ "role": "user", "content": "hi" }] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
        assert!(body.get("recipe").is_none());
        assert_eq!(db.get_item("Rice").unwrap().unwrap().quantity, 2.0);
    }

    #[tokio::test]
    async fn test_badly_shaped_bodies() {
        let (service, _) = service_with(
            Config::default(),
            &[("Rice", 2.0)],
            Arc::new(FakeBackend::replying(CARROT_RICE)),
        );
        let app = router(Arc::new(service));

        for (uri, payload) in [
            ("/api/chat/send", json!({ "messages": [] })),
            ("/api/chat/accept", json!({ "messages": [], "recipe": { "name": "Soup" } })),
            ("/api/chat/decline", json!({ "messages": [{ "role": "chef", "content": "hi" }] })),
        ] {
            let (status, body) = call(app.clone(), post_json(uri, payload)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["code"], "invalid_input", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_send_with_empty_pantry() {
        let (service, _) = service_with(
            Config::default(),
            &[],
            Arc::new(FakeBackend::replying(CARROT_RICE)),
        );

        let (status, body) = call(
            router(Arc::new(service)),
            post_json("/api/chat/send", json!({ "input": "Anything" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");
    }
}
