//! Transcript operations for the recipe chat.
//!
//! The transcript lives on the client; each operation receives the current
//! messages and returns them with the new turns appended.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ServiceError, ServiceResult};
use crate::recipe::{Recipe, RecipeOptions};

use super::CabinetService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Show accept/decline controls under this message
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub buttons: bool,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            buttons: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            buttons: false,
        }
    }

    fn prompt_with_buttons(content: impl Into<String>) -> Self {
        Self {
            buttons: true,
            ..Self::assistant(content)
        }
    }
}

/// Result of a chat operation
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatTurn {
    fn messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            recipe: None,
            error: None,
        }
    }
}

impl CabinetService {
    fn message(&self, key: &str) -> String {
        self.catalog.get(key)
    }

    /// Send a user request: append it, then the recipe and a confirmation
    /// prompt, or a failure notice if no recipe could be produced.
    pub async fn chat_send(
        &self,
        mut messages: Vec<ChatMessage>,
        input: &str,
        options: &RecipeOptions,
    ) -> ServiceResult<ChatTurn> {
        if input.trim().is_empty() {
            return Err(ServiceError::InvalidInput {
                message: self.message("chat-empty-input"),
            });
        }
        options.resolve()?;

        let pantry = self.available_items()?;
        if pantry.is_empty() {
            return Err(ServiceError::InvalidInput {
                message: self.message("chat-empty-pantry"),
            });
        }

        messages.push(ChatMessage::user(input));

        match self.suggest_recipe(&pantry, Some(input), options).await {
            Ok(recipe) => {
                let text = recipe
                    .to_chat_text()
                    .unwrap_or_else(|| self.message("chat-no-recipe"));
                messages.push(ChatMessage::assistant(text));
                messages.push(ChatMessage::prompt_with_buttons(
                    self.message("chat-confirm-recipe"),
                ));
                Ok(ChatTurn {
                    messages,
                    recipe: Some(recipe),
                    error: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Chat recipe request failed");
                let reason = e.public_message();
                messages.push(ChatMessage::assistant(self.message("chat-recipe-failed")));
                Ok(ChatTurn {
                    messages,
                    recipe: None,
                    error: Some(
                        self.catalog
                            .format("chat-recipe-error", &[("reason", reason.as_str())]),
                    ),
                })
            }
        }
    }

    /// Accept a recipe: apply it to the pantry and acknowledge
    pub fn chat_accept(&self, mut messages: Vec<ChatMessage>, recipe: &Recipe) -> ChatTurn {
        match self.consume_ingredients(&recipe.ingredients_with_quantities) {
            Ok(_) => {
                messages.push(ChatMessage::assistant(self.message("chat-inventory-updated")));
                ChatTurn::messages(messages)
            }
            Err(e) => {
                warn!(error = %e, recipe = %recipe.name, "Inventory update failed");
                messages.push(ChatMessage::assistant(self.message("chat-inventory-failed")));
                ChatTurn {
                    messages,
                    recipe: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Decline a recipe; nothing changes besides the transcript
    pub fn chat_decline(&self, mut messages: Vec<ChatMessage>) -> ChatTurn {
        messages.push(ChatMessage::assistant(self.message("chat-declined")));
        ChatTurn::messages(messages)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::db::InventoryStore;
    use crate::openai::fake::FakeBackend;
    use crate::service::test_support::{CARROT_RICE, service_with};

    fn greeting() -> Vec<ChatMessage> {
        vec![ChatMessage::assistant("Hi! What should we cook?")]
    }

    #[tokio::test]
    async fn test_send_appends_recipe_and_prompt() {
        let backend = Arc::new(FakeBackend::replying(CARROT_RICE));
        let (service, _) = service_with(
            Config::default(),
            &[("Rice", 2.0), ("Carrots", 5.0), ("Leeks", 0.0)],
            backend.clone(),
        );

        let turn = service
            .chat_send(greeting(), "Something quick", &RecipeOptions::default())
            .await
            .unwrap();

        assert_eq!(turn.messages.len(), 4);
        assert_eq!(turn.messages[1], ChatMessage::user("Something quick"));
        assert!(turn.messages[2].content.starts_with("🍽️ Carrot Rice"));
        assert_eq!(
            turn.messages[3],
            ChatMessage {
                role: Role::Assistant,
                content: "Would you like to use this recipe?".to_string(),
                buttons: true,
            }
        );
        assert_eq!(turn.recipe.unwrap().name, "Carrot Rice");
        assert!(turn.error.is_none());

        // Only in-stock items are offered to the backend
        let prompt = backend.requests()[0].messages[0].text();
        assert!(prompt.contains("Pantry:\nCarrots, Rice\n"));
        assert!(prompt.contains("User Request: Something quick"));
    }

    #[tokio::test]
    async fn test_send_failure_appends_notice() {
        let backend = Arc::new(FakeBackend::replying("not json"));
        let (service, _) = service_with(Config::default(), &[("Rice", 1.0)], backend);

        let turn = service
            .chat_send(Vec::new(), "dinner", &RecipeOptions::default())
            .await
            .unwrap();

        assert_eq!(turn.messages.len(), 2);
        assert_eq!(turn.messages[1].content, "⚠️ Failed to get recipe.");
        assert!(turn.recipe.is_none());
        assert_eq!(
            turn.error.as_deref(),
            Some("⚠️ Failed to get recipe: OpenAI response was not valid JSON.")
        );
    }

    #[tokio::test]
    async fn test_send_requires_input_and_stock() {
        let backend = Arc::new(FakeBackend::replying(CARROT_RICE));
        let (service, _) = service_with(Config::default(), &[("Rice", 0.0)], backend.clone());

        let err = service
            .chat_send(Vec::new(), "   ", &RecipeOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput { .. }));

        let err = service
            .chat_send(Vec::new(), "dinner", &RecipeOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput { .. }));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_accept_updates_pantry() {
        let backend = Arc::new(FakeBackend::replying(CARROT_RICE));
        let (service, db) = service_with(
            Config::default(),
            &[("Rice", 2.0), ("Carrots", 5.0), ("Salt", 1.0)],
            backend,
        );
        let recipe: Recipe = serde_json::from_str(CARROT_RICE).unwrap();

        let turn = service.chat_accept(greeting(), &recipe);

        assert_eq!(
            turn.messages.last().unwrap().content,
            "✅ Ingredients updated in your pantry!"
        );
        assert_eq!(db.get_item("Rice").unwrap().unwrap().quantity, 1.0);
        assert_eq!(db.get_item("Carrots").unwrap().unwrap().quantity, 3.0);
        assert_eq!(db.get_item("Salt").unwrap().unwrap().quantity, 1.0);
    }

    #[test]
    fn test_decline() {
        let (service, _) = service_with(
            Config::default(),
            &[],
            Arc::new(FakeBackend::replying(CARROT_RICE)),
        );

        let turn = service.chat_decline(greeting());
        assert_eq!(turn.messages.len(), 2);
        assert!(turn.messages[1].content.starts_with("No worries!"));
        assert!(!turn.messages[1].buttons);
    }

    #[test]
    fn test_message_serialization() {
        let json = serde_json::to_value(vec![
            ChatMessage::user("hi"),
            ChatMessage::prompt_with_buttons("ok?"),
        ])
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "role": "user", "content": "hi" },
                { "role": "assistant", "content": "ok?", "buttons": true }
            ])
        );
    }
}
