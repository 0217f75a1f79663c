//! JSON body extractors whose rejections use the service error bodies.

use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::error::{DetectionError, ServiceError};

/// JSON body for the recipe, inventory and chat endpoints.
///
/// Malformed bodies are rejected with 400 `{message, code}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServiceError))]
pub struct JsonBody<T>(pub T);

/// JSON body for the object-detection endpoint; rejected with 400 `{error}`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(DetectionError))]
pub struct DetectionJson<T>(pub T);

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::InvalidInput {
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for DetectionError {
    fn from(rejection: JsonRejection) -> Self {
        DetectionError(rejection.into())
    }
}
