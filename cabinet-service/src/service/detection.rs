//! Object detection from a photo of a held item.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

use crate::config::LabelCase;
use crate::error::{ServiceError, ServiceResult};
use crate::openai::{CompletionMessage, CompletionRequest};
use crate::prompts::build_detection_prompt;

use super::CabinetService;

impl CabinetService {
    /// Identify the item in `image`, preferring one of `inventory_items`.
    ///
    /// Returns the backend's label trimmed and cased per configuration, or
    /// `none` when the item is not a kitchen ingredient.
    pub async fn detect_object(
        &self,
        image: Option<&str>,
        inventory_items: &[String],
    ) -> ServiceResult<String> {
        let image = image
            .filter(|image| !image.trim().is_empty())
            .ok_or_else(|| ServiceError::InvalidInput {
                message: "No image data received".to_string(),
            })?;

        if !self.backend.is_configured() {
            return Err(ServiceError::missing_credential());
        }

        validate_image(image)?;

        info!(known_items = inventory_items.len(), "Sending image for detection");

        let openai = &self.config.openai;
        let reply = self
            .backend
            .complete(CompletionRequest {
                model: openai.vision_model.clone(),
                messages: vec![CompletionMessage::user_with_image(
                    build_detection_prompt(inventory_items),
                    image,
                )],
                max_tokens: openai.detection_max_tokens,
                temperature: None,
            })
            .await?;

        let label = reply.trim();
        let label = match self.config.detection.label_case {
            LabelCase::Lower => label.to_lowercase(),
            LabelCase::AsReturned => label.to_string(),
        };

        info!(detected = %label, "Object detection complete");
        Ok(label)
    }
}

/// Accept `data:image/*;base64,...` URIs with a decodable payload, or plain
/// http(s) URLs which the backend fetches itself.
fn validate_image(image: &str) -> ServiceResult<()> {
    let invalid = |message: &str| ServiceError::InvalidInput {
        message: message.to_string(),
    };

    if image.starts_with("https://") || image.starts_with("http://") {
        return Ok(());
    }

    let rest = image
        .strip_prefix("data:")
        .ok_or_else(|| invalid("Image must be a data URI or an http(s) URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("Image data URI has no payload"))?;

    let mut params = header.split(';');
    let media_type: mime::Mime = params
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|_| invalid("Image data URI has an invalid media type"))?;
    if media_type.type_() != mime::IMAGE {
        return Err(invalid("Image data URI is not an image"));
    }
    if !params.any(|param| param.eq_ignore_ascii_case("base64")) {
        return Err(invalid("Image data URI must be base64 encoded"));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| invalid("Image data URI payload is not valid base64"))?;
    if bytes.is_empty() {
        return Err(invalid("No image data received"));
    }

    debug!(media_type = %media_type, bytes = bytes.len(), "Image accepted");
    Ok(())
}
