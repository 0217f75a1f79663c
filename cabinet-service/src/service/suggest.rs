//! Recipe suggestion.

use tracing::{debug, error, info};

use crate::error::{ServiceError, ServiceResult};
use crate::openai::{CompletionMessage, CompletionRequest};
use crate::prompts::{DEFAULT_RECIPE_PROMPT, build_recipe_prompt};
use crate::recipe::{Recipe, RecipeOptions, parse_recipe};

use super::CabinetService;

impl CabinetService {
    /// Ask the backend for one recipe built from `ingredients`.
    ///
    /// Checks run in order: pantry list, options, credential. No call is
    /// retried.
    pub async fn suggest_recipe(
        &self,
        ingredients: &[String],
        prompt: Option<&str>,
        options: &RecipeOptions,
    ) -> ServiceResult<Recipe> {
        if ingredients.is_empty() {
            return Err(ServiceError::InvalidInput {
                message: "Invalid pantry ingredients".to_string(),
            });
        }

        let resolved = options.resolve()?;

        if !self.backend.is_configured() {
            return Err(ServiceError::missing_credential());
        }

        let prompt = prompt.unwrap_or(DEFAULT_RECIPE_PROMPT);
        let strategy = self.config.recipe.parse_strategy;
        info!(
            pantry_size = ingredients.len(),
            prompt = %prompt,
            ?strategy,
            "Requesting recipe suggestion"
        );

        let payload = build_recipe_prompt(ingredients, prompt, &resolved, strategy);
        debug!(payload = %payload, "Recipe prompt");

        let openai = &self.config.openai;
        let raw = self
            .backend
            .complete(CompletionRequest {
                model: openai.recipe_model.clone(),
                messages: vec![CompletionMessage::system(payload)],
                max_tokens: openai.recipe_max_tokens,
                temperature: Some(openai.temperature),
            })
            .await?;

        let recipe = parse_recipe(&raw, strategy).map_err(|e| {
            error!(error = %e, raw = %raw, "Failed to parse recipe reply");
            e
        })?;

        info!(recipe = %recipe.name, steps = recipe.steps.len(), "Recipe generated");
        Ok(recipe)
    }
}
