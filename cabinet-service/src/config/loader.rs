//! Configuration loading from files and environment variables.

use config::{Config as ConfigBuilder, Environment, File};

use crate::error::{ServiceError, ServiceResult};

use super::Config;

/// Conventional variable holding the backend credential
const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Load configuration from the optional `config` file and `CABINET__*` env vars.
///
/// If no credential was configured, `OPENAI_API_KEY` is consulted once here so
/// the rest of the service only ever sees the injected value.
pub fn load_config() -> ServiceResult<Config> {
    let mut config: Config = ConfigBuilder::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("CABINET")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| ServiceError::Config {
            message: format!("Failed to build config: {}", e),
        })?
        .try_deserialize()
        .map_err(|e| ServiceError::Config {
            message: format!("Failed to deserialize config: {}", e),
        })?;

    if config.openai.credential().is_none() {
        config.openai.api_key = std::env::var(API_KEY_ENV).ok();
    }

    Ok(config)
}
