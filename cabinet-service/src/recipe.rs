//! Recipe domain types.
//!
//! A [`Recipe`] is produced once per successful backend call and travels back
//! to the client, which either accepts it (decrementing the pantry) or drops it.

mod options;
mod parser;

pub use options::{RecipeOptions, ResolvedOptions};
pub use parser::parse_recipe;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A suggested recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub ingredients_with_quantities: Vec<IngredientQuantity>,
}

/// A pantry item consumed by a recipe.
///
/// The quantity keeps the number exactly as the backend wrote it so a recipe
/// echoes back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    pub name: String,
    pub quantity: Number,
}

impl IngredientQuantity {
    /// Quantity as a float; NaN if it cannot be represented
    pub fn amount(&self) -> f64 {
        self.quantity.as_f64().unwrap_or(f64::NAN)
    }
}

impl Recipe {
    /// Render the recipe as a chat transcript entry.
    ///
    /// Returns `None` for a recipe without a name. Recipes parsed from the
    /// legacy text format have no quantities, so their ingredient lines are
    /// listed instead.
    pub fn to_chat_text(&self) -> Option<String> {
        if self.name.is_empty() {
            return None;
        }

        let ingredient_list = if self.ingredients_with_quantities.is_empty() {
            self.ingredients.join("\n")
        } else {
            self.ingredients_with_quantities
                .iter()
                .map(|item| format!("{} × {}", item.quantity, item.name))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let instruction_list = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n");

        Some(format!(
            "🍽️ {}\n\n🧂 Ingredients:\n{}\n\n👨‍🍳 Instructions:\n{}",
            self.name, ingredient_list, instruction_list
        ))
    }
}
