use crate::AppState;
use crate::error::ApiError;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::models::{CreateCharacterRequest, StoredCharacter};
use uuid::Uuid;

pub async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredCharacter>>, ApiError> {
    let characters = state.db.get_characters().await.map_err(|e| {
        tracing::error!("Failed to list characters: {:?}", e);
        ApiError::internal("Failed to fetch characters")
    })?;
    Ok(Json(characters))
}

pub async fn create_character(
    State(state): State<AppState>,
    payload: Result<Json<CreateCharacterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredCharacter>), ApiError> {
    let Json(payload) = payload?;
    let char = StoredCharacter {
        id: Uuid::now_v7(),
        name: payload.name,
        r#type: payload.r#type,
        traits: payload.traits,
    };

    state.db.create_character(char.clone()).await.map_err(|e| {
        tracing::error!("Failed to create character: {:?}", e);
        ApiError::internal("Failed to create character")
    })?;

    Ok((StatusCode::CREATED, Json(char)))
}
