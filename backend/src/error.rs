use crate::generator::GenerateError;
use crate::voice::VoiceError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::models::ErrorBody;

/// An HTTP failure rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::new(StatusCode::BAD_REQUEST, "Invalid request body")
    }
}

impl From<GenerateError> for ApiError {
    fn from(error: GenerateError) -> Self {
        let status = match &error {
            GenerateError::Validation(_) => StatusCode::BAD_REQUEST,
            GenerateError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GenerateError::Provider(_) => StatusCode::BAD_GATEWAY,
        };
        if status != StatusCode::BAD_REQUEST {
            tracing::error!("Dialogue generation failed: {}", error);
        }
        Self::new(status, error.to_string())
    }
}

impl From<VoiceError> for ApiError {
    fn from(error: VoiceError) -> Self {
        let status = match &error {
            VoiceError::TextRequired => StatusCode::BAD_REQUEST,
            VoiceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            VoiceError::Transport(_) | VoiceError::Status { .. } => StatusCode::BAD_GATEWAY,
        };
        if status != StatusCode::BAD_REQUEST {
            tracing::error!("Voice synthesis failed: {}", error);
        }
        Self::new(status, error.to_string())
    }
}
