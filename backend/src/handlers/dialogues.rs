use crate::AppState;
use crate::error::ApiError;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use shared::models::{
    GenerationRequest, GenerationResult, SaveDialogueRequest, SaveDialogueResponse, SavedDialogue,
};
use uuid::Uuid;

pub async fn generate_dialogue(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    let Json(payload) = payload?;
    let result = state.generator.generate(payload).await?;
    Ok(Json(result))
}

pub async fn save_dialogue(
    State(state): State<AppState>,
    payload: Result<Json<SaveDialogueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveDialogueResponse>), ApiError> {
    let Json(payload) = payload?;
    let dialogue = SavedDialogue {
        id: Uuid::now_v7(),
        scenario: payload.scenario,
        characters: payload.characters,
        exchanges: payload.exchanges,
        created_at: Utc::now(),
    };
    let id = dialogue.id;

    state
        .db
        .save_generated_dialogue(dialogue)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save dialogue: {:?}", e);
            ApiError::internal("Failed to save dialogue")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(SaveDialogueResponse {
            id,
            message: "Dialogue saved successfully".to_string(),
        }),
    ))
}

pub async fn list_saved_dialogues(
    State(state): State<AppState>,
) -> Result<Json<Vec<SavedDialogue>>, ApiError> {
    let dialogues = state.db.get_generated_dialogues().await.map_err(|e| {
        tracing::error!("Failed to list saved dialogues: {:?}", e);
        ApiError::internal("Failed to fetch saved dialogues")
    })?;
    Ok(Json(dialogues))
}
