use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Main service error type
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid request: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Backend(#[from] BackendError),

    #[error("{0}")]
    MalformedResponse(#[from] RecipeParseError),

    #[error("Failed to update inventory for: {}", failed.join(", "))]
    InventoryUpdate { failed: Vec<String> },

    #[error("Database error")]
    Database(#[from] DatabaseError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Chat-completion backend errors
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed to AI backend at {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("AI backend responded with status {status}")]
    Status { status: u16, body: String },

    #[error("Invalid response from AI backend: {message}")]
    InvalidResponse { message: String },
}

/// Failures turning a backend reply into a recipe
#[derive(Error, Debug)]
pub enum RecipeParseError {
    #[error("OpenAI response was not valid JSON.")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid recipe format returned from OpenAI.")]
    InvalidShape { reason: String },
}

/// Database errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection failed")]
    Connection(#[source] rusqlite::Error),

    #[error("Query failed")]
    Query(#[source] rusqlite::Error),

    #[error("Migration failed: {message}")]
    Migration { message: String },
}

/// API error response for the recipe, inventory and chat endpoints
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceError {
    pub fn missing_credential() -> Self {
        ServiceError::Config {
            message: "OpenAI API key is not set".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput { .. } => "invalid_input",
            ServiceError::Config { .. } => "config_error",
            ServiceError::Backend(_) => "upstream_error",
            ServiceError::MalformedResponse(RecipeParseError::InvalidJson { .. }) => {
                "malformed_json"
            }
            ServiceError::MalformedResponse(RecipeParseError::InvalidShape { .. }) => {
                "malformed_shape"
            }
            ServiceError::InventoryUpdate { .. } => "inventory_update",
            ServiceError::Database(_) => "database_error",
            ServiceError::Internal { .. } => "internal_error",
        }
    }

    /// Message shown to API callers. Config and input errors carry their own
    /// text; upstream failures get a generic summary with the cause in `detail`.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::InvalidInput { message } | ServiceError::Config { message } => {
                message.clone()
            }
            ServiceError::Backend(_) => "Error generating recipe suggestion".to_string(),
            _ => self.to_string(),
        }
    }

    /// Underlying cause, if any, for the optional `error` field
    pub fn detail(&self) -> Option<String> {
        match self {
            ServiceError::Backend(e) => Some(e.to_string()),
            ServiceError::MalformedResponse(RecipeParseError::InvalidJson { source }) => {
                Some(source.to_string())
            }
            ServiceError::Database(e) => Some(format_error_chain(e)),
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let response = ErrorResponse {
            message: self.public_message(),
            code: Some(self.error_code().to_string()),
            error: self.detail(),
        };

        (status, Json(response)).into_response()
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error body used by the object-detection endpoint
#[derive(Serialize)]
pub struct DetectionErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Wrapper that renders a service error in the `{ error, details }` shape
pub struct DetectionError(pub ServiceError);

impl From<ServiceError> for DetectionError {
    fn from(error: ServiceError) -> Self {
        Self(error)
    }
}

impl IntoResponse for DetectionError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();

        let response = match self.0 {
            ServiceError::InvalidInput { message } | ServiceError::Config { message } => {
                DetectionErrorResponse {
                    error: message,
                    details: None,
                }
            }
            other => DetectionErrorResponse {
                error: "An error occurred during object detection".to_string(),
                details: Some(format_error_chain(&other)),
            },
        };

        (status, Json(response)).into_response()
    }
}

/// Render an error and all of its sources as "outer: inner: innermost"
pub fn format_error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
