//! Recipe request options and their defaulting.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use strum::{Display, EnumString};

use crate::error::{ServiceError, ServiceResult};

/// Dietary restrictions the client can select
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum DietaryTag {
    Kosher,
    Halal,
    Vegetarian,
    Pescetarian,
    Vegan,
    #[serde(rename = "Gluten-Free")]
    #[strum(serialize = "Gluten-Free")]
    GlutenFree,
}

/// A form field that may arrive as a string or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(Number),
    Text(String),
}

impl OptionValue {
    /// The value as written, or `None` when the field is effectively blank
    /// (empty text or zero).
    fn present(&self) -> Option<String> {
        match self {
            OptionValue::Number(n) if n.as_f64() == Some(0.0) => None,
            OptionValue::Number(n) => Some(n.to_string()),
            OptionValue::Text(s) if s.trim().is_empty() => None,
            OptionValue::Text(s) => Some(s.clone()),
        }
    }
}

/// Options as sent by the client; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeOptions {
    #[serde(default)]
    pub serving_size: Option<OptionValue>,
    #[serde(default)]
    pub dietary: Option<Vec<DietaryTag>>,
    #[serde(default)]
    pub calories: Option<OptionValue>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub uniqueness: Option<i64>,
    #[serde(default)]
    pub spice: Option<i64>,
    #[serde(default)]
    pub must_have_ingredients: Option<String>,
}

/// Fully-populated options, ready to be embedded in a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub must_have: String,
    pub dietary: String,
    pub serving_size: String,
    pub calories: String,
    pub cuisine: String,
    pub uniqueness: u8,
    pub spice: u8,
}

const NONE: &str = "none";
const ANY: &str = "any";
const NO_PREFERENCE: &str = "no preference";
const DEFAULT_LEVEL: u8 = 3;

impl RecipeOptions {
    /// Fill every missing field with its neutral value.
    ///
    /// Fails only when a slider is outside 1–5.
    pub fn resolve(&self) -> ServiceResult<ResolvedOptions> {
        let must_have = self
            .must_have_ingredients
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(NONE)
            .to_string();

        let mut tags: Vec<DietaryTag> = Vec::new();
        for tag in self.dietary.iter().flatten() {
            if !tags.contains(tag) {
                tags.push(*tag);
            }
        }
        let dietary = if tags.is_empty() {
            NONE.to_string()
        } else {
            tags.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let cuisine = self
            .cuisine
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(ANY)
            .to_string();

        Ok(ResolvedOptions {
            must_have,
            dietary,
            serving_size: self
                .serving_size
                .as_ref()
                .and_then(OptionValue::present)
                .unwrap_or_else(|| ANY.to_string()),
            calories: self
                .calories
                .as_ref()
                .and_then(OptionValue::present)
                .unwrap_or_else(|| NO_PREFERENCE.to_string()),
            cuisine,
            uniqueness: level("uniqueness", self.uniqueness)?,
            spice: level("spice", self.spice)?,
        })
    }
}

fn level(field: &str, value: Option<i64>) -> ServiceResult<u8> {
    match value {
        None => Ok(DEFAULT_LEVEL),
        Some(v @ 1..=5) => Ok(v as u8),
        Some(v) => Err(ServiceError::InvalidInput {
            message: format!("{} must be between 1 and 5, got {}", field, v),
        }),
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            must_have: NONE.to_string(),
            dietary: NONE.to_string(),
            serving_size: ANY.to_string(),
            calories: NO_PREFERENCE.to_string(),
            cuisine: ANY.to_string(),
            uniqueness: DEFAULT_LEVEL,
            spice: DEFAULT_LEVEL,
        }
    }
}
