//! Prompt building for the recipe and object-detection backends.

use crate::config::ParseStrategy;
use crate::recipe::ResolvedOptions;

const RECIPE_TEMPLATE: &str = include_str!("../prompts/recipe.txt");
const RECIPE_JSON_FORMAT: &str = include_str!("../prompts/recipe_json_format.txt");
const RECIPE_TEXT_FORMAT: &str = include_str!("../prompts/recipe_text_format.txt");
const DETECTION_TEMPLATE: &str = include_str!("../prompts/detection.txt");

/// Request used when the client sends no prompt
pub const DEFAULT_RECIPE_PROMPT: &str = "Make a recipe";

/// Build the instruction payload for a recipe suggestion.
///
/// Deterministic: identical inputs always produce the identical payload.
pub fn build_recipe_prompt(
    pantry: &[String],
    prompt: &str,
    options: &ResolvedOptions,
    strategy: ParseStrategy,
) -> String {
    let return_format = match strategy {
        ParseStrategy::StrictJson => RECIPE_JSON_FORMAT,
        ParseStrategy::LegacyText => RECIPE_TEXT_FORMAT,
    };
    let pantry_list = pantry.join(", ");
    let uniqueness = options.uniqueness.to_string();
    let spice = options.spice.to_string();

    render(
        RECIPE_TEMPLATE,
        &[
            ("pantry", pantry_list.as_str()),
            ("prompt", prompt),
            ("must_have", options.must_have.as_str()),
            ("dietary", options.dietary.as_str()),
            ("serving_size", options.serving_size.as_str()),
            ("calories", options.calories.as_str()),
            ("cuisine", options.cuisine.as_str()),
            ("uniqueness", uniqueness.as_str()),
            ("spice", spice.as_str()),
            ("return_format", return_format.trim_end()),
        ],
    )
}

/// Build the identification instruction sent alongside a photo
pub fn build_detection_prompt(inventory_items: &[String]) -> String {
    let items = inventory_items.join(", ");
    render(DETECTION_TEMPLATE, &[("items", items.as_str())])
        .trim_end()
        .to_string()
}

/// Substitute `{key}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so user text containing braces is
/// copied as-is. Braces that do not name a known key are left untouched.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let replacement = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });

        match replacement {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
