//! Recipe suggestion endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;
use crate::api::extract::JsonBody;
use crate::error::ServiceError;
use crate::recipe::{Recipe, RecipeOptions};

/// Request body for POST /api/suggestrecipe
#[derive(Debug, Deserialize)]
pub struct SuggestRecipeRequest {
    /// Available pantry item names
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub options: Option<RecipeOptions>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Response for POST /api/suggestrecipe
#[derive(Debug, Serialize)]
pub struct SuggestRecipeResponse {
    pub recipe: Recipe,
}

/// POST /api/suggestrecipe - generate one recipe from the pantry
pub async fn suggest_recipe_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<SuggestRecipeRequest>,
) -> Result<Json<SuggestRecipeResponse>, ServiceError> {
    let ingredients = request.ingredients.unwrap_or_default();
    let options = request.options.unwrap_or_default();

    let recipe = state
        .service
        .suggest_recipe(&ingredients, request.prompt.as_deref(), &options)
        .await?;

    Ok(Json(SuggestRecipeResponse { recipe }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    use crate::api::router;
    use crate::api::test_support::{call, post_json};
    use crate::config::Config;
    use crate::db::Database;
    use crate::openai::OpenAiClient;
    use crate::openai::fake::FakeBackend;
    use crate::service::CabinetService;
    use crate::service::test_support::{CARROT_RICE, service_with};

    fn app(reply: &str) -> axum::Router {
        let (service, _) = service_with(
            Config::default(),
            &[],
            Arc::new(FakeBackend::replying(reply)),
        );
        router(Arc::new(service))
    }

    #[tokio::test]
    async fn test_returns_recipe() {
        let (status, body) = call(
            app(CARROT_RICE),
            post_json(
                "/api/suggestrecipe",
                json!({
                    "ingredients": ["Rice", "Carrots"],
                    "options": { "dietary": ["Vegan"], "spice": 2 },
                    "prompt": "Something warm"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recipe"]["name"], "Carrot Rice");
        assert_eq!(
            body["recipe"]["ingredientsWithQuantities"][1],
            json!({ "name": "Carrots", "quantity": 2 })
        );
    }

    #[tokio::test]
    async fn test_empty_ingredients() {
        for payload in [
            json!({ "ingredients": [], "options": {}, "prompt": "x" }),
            json!({}),
        ] {
            let (status, body) =
                call(app(CARROT_RICE), post_json("/api/suggestrecipe", payload)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "Invalid pantry ingredients");
        }
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let config = Config::default();
        let backend = Arc::new(OpenAiClient::new(config.openai.clone()).unwrap());
        let service = CabinetService::new(Arc::new(config), db, backend);

        let (status, body) = call(
            router(Arc::new(service)),
            post_json("/api/suggestrecipe", json!({ "ingredients": ["Rice", "Carrots"] })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "OpenAI API key is not set");
    }

    #[tokio::test]
    async fn test_badly_shaped_body_is_json_400() {
        for payload in [
            json!({ "ingredients": ["Rice"], "options": { "dietary": ["Keto"] } }),
            json!({ "ingredients": "Rice" }),
            json!({ "ingredients": ["Rice"], "options": { "spice": "3" } }),
        ] {
            let (status, body) =
                call(app(CARROT_RICE), post_json("/api/suggestrecipe", payload)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "invalid_input");
            assert!(body["message"].is_string());
        }
    }

    #[tokio::test]
    async fn test_unknown_dietary_tag_is_named() {
        let (_, body) = call(
            app(CARROT_RICE),
            post_json(
                "/api/suggestrecipe",
                json!({ "ingredients": ["Rice"], "options": { "dietary": ["Keto"] } }),
            ),
        )
        .await;

        assert!(body["message"].as_str().unwrap().contains("Keto"));
    }

    #[tokio::test]
    async fn test_malformed_reply() {
        let (status, body) = call(
            app("Sure! Here's a recipe."),
            post_json("/api/suggestrecipe", json!({ "ingredients": ["Rice"] })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "OpenAI response was not valid JSON.");
        assert_eq!(body["code"], "malformed_json");
    }

    #[tokio::test]
    async fn test_shape_mismatch() {
        let (status, body) = call(
            app(r#"{"name": "Soup", "ingredients": []}"#),
            post_json("/api/suggestrecipe", json!({ "ingredients": ["Rice"] })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Invalid recipe format returned from OpenAI.");
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let (service, _) = service_with(Config::default(), &[], Arc::new(FakeBackend::failing(500)));

        let (status, body) = call(
            router(Arc::new(service)),
            post_json("/api/suggestrecipe", json!({ "ingredients": ["Rice"] })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error generating recipe suggestion");
        assert!(body["error"].as_str().unwrap().contains("500"));
    }
}
