use crate::AppState;
use crate::error::ApiError;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use shared::models::VoiceRequest;

/// Header-safe download name: anything but ASCII alphanumerics, `-` and `_`
/// becomes `_`.
fn attachment_name(character: &str) -> String {
    let stem: String = character
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attachment; filename=\"{}_dialogue.mp3\"", stem)
}

pub async fn synthesize_voice(
    State(state): State<AppState>,
    payload: Result<Json<VoiceRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let audio = state.voice.synthesize(&payload).await?;

    let disposition = HeaderValue::from_str(&attachment_name(&payload.character))
        .map_err(|_| ApiError::internal("Failed to build response headers"))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        audio,
    )
        .into_response())
}
