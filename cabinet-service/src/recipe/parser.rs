//! Turning backend replies into recipes.

use serde_json::Value;

use super::Recipe;
use crate::config::ParseStrategy;
use crate::error::RecipeParseError;

/// Parse a backend reply with the configured strategy
pub fn parse_recipe(raw: &str, strategy: ParseStrategy) -> Result<Recipe, RecipeParseError> {
    match strategy {
        ParseStrategy::StrictJson => parse_strict_json(raw),
        ParseStrategy::LegacyText => parse_legacy_text(raw),
    }
}

fn shape_error(reason: impl Into<String>) -> RecipeParseError {
    RecipeParseError::InvalidShape {
        reason: reason.into(),
    }
}

/// The reply must be one JSON object carrying all four recipe fields
fn parse_strict_json(raw: &str) -> Result<Recipe, RecipeParseError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|source| RecipeParseError::InvalidJson { source })?;

    let object = value
        .as_object()
        .ok_or_else(|| shape_error("reply is not a JSON object"))?;

    match object.get("name") {
        Some(Value::String(name)) if !name.is_empty() => {}
        _ => return Err(shape_error("`name` must be a non-empty string")),
    }

    for field in ["ingredients", "steps", "ingredientsWithQuantities"] {
        if !object.get(field).is_some_and(Value::is_array) {
            return Err(shape_error(format!("`{}` must be an array", field)));
        }
    }

    serde_json::from_value(value).map_err(|e| shape_error(e.to_string()))
}

/// Three blocks separated by a blank line: name, ingredients, numbered steps
fn parse_legacy_text(raw: &str) -> Result<Recipe, RecipeParseError> {
    let normalized = raw.replace("\r\n", "\n");
    let blocks: Vec<&str> = normalized.trim().split("\n\n").collect();

    let [name, ingredients, steps] = blocks.as_slice() else {
        return Err(shape_error(format!(
            "expected 3 blank-line separated blocks, found {}",
            blocks.len()
        )));
    };

    Ok(Recipe {
        name: name.to_string(),
        ingredients: non_empty_lines(ingredients).map(str::to_string).collect(),
        steps: non_empty_lines(steps)
            .map(|line| strip_step_number(line).to_string())
            .collect(),
        ingredients_with_quantities: Vec::new(),
    })
}

fn non_empty_lines(block: &str) -> impl Iterator<Item = &str> {
    block.lines().filter(|line| !line.trim().is_empty())
}

/// Remove a leading "N. " numbering prefix
fn strip_step_number(line: &str) -> &str {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    line[digits..].strip_prefix(". ").unwrap_or(line)
}
