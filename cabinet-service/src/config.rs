//! Service configuration.
//!
//! Values come from an optional `config` file followed by `CABINET__*`
//! environment overrides (see [`loader`]). Every section has serde defaults so
//! an empty configuration is valid; only the AI backend credential has no
//! usable default.

mod loader;

pub use loader::load_config;

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_server")]
    pub server: ServerConfig,

    #[serde(default = "default_storage")]
    pub storage: StorageConfig,

    #[serde(default = "default_openai")]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub recipe: RecipeConfig,

    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default = "default_limits")]
    pub limits: LimitsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            openai: default_openai(),
            recipe: RecipeConfig::default(),
            detection: DetectionConfig::default(),
            limits: default_limits(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// OpenAI-compatible chat-completion backend
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// Bearer credential. When unset, both AI endpoints answer with a
    /// configuration error instead of calling out.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_url")]
    pub base_url: String,

    #[serde(default = "default_recipe_model")]
    pub recipe_model: String,

    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_recipe_max_tokens")]
    pub recipe_max_tokens: u32,

    #[serde(default = "default_detection_max_tokens")]
    pub detection_max_tokens: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl OpenAiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured credential, ignoring blank values
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// How backend replies are turned into recipes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStrategy {
    /// Reply must be a JSON object with the four recipe fields
    #[default]
    StrictJson,
    /// Reply is three blank-line separated blocks: name, ingredients, steps
    LegacyText,
}

/// Recipe generation settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeConfig {
    #[serde(default)]
    pub parse_strategy: ParseStrategy,
}

/// Casing applied to object detection labels before they are returned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelCase {
    #[default]
    Lower,
    AsReturned,
}

/// Object detection settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectionConfig {
    #[serde(default)]
    pub label_case: LabelCase,
}

/// Size limits
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum request body, sized for inline photos
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

// ==================== Default Value Functions ====================

fn default_server() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageConfig {
    StorageConfig {
        data_dir: default_data_dir(),
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_openai() -> OpenAiConfig {
    OpenAiConfig {
        api_key: None,
        base_url: default_openai_url(),
        recipe_model: default_recipe_model(),
        vision_model: default_vision_model(),
        temperature: default_temperature(),
        recipe_max_tokens: default_recipe_max_tokens(),
        detection_max_tokens: default_detection_max_tokens(),
        request_timeout_secs: default_request_timeout_secs(),
    }
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_recipe_model() -> String {
    "gpt-4-turbo".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_recipe_max_tokens() -> u32 {
    800
}

fn default_detection_max_tokens() -> u32 {
    300
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_limits() -> LimitsConfig {
    LimitsConfig {
        max_body_bytes: default_max_body_bytes(),
    }
}

fn default_max_body_bytes() -> usize {
    20 * 1024 * 1024
}
