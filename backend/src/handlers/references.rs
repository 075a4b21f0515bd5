use crate::AppState;
use crate::error::ApiError;
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{NewReferenceDialogue, ReferenceDialogue};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ReferenceQuery {
    #[serde(default)]
    pub tag: Option<String>,
}

pub async fn list_references(
    State(state): State<AppState>,
    Query(query): Query<ReferenceQuery>,
) -> Result<Json<Vec<ReferenceDialogue>>, ApiError> {
    // `?tag=` with no value lists everything
    let tag = query.tag.as_deref().filter(|t| !t.is_empty());

    let dialogues = state.db.get_reference_dialogues(tag).await.map_err(|e| {
        tracing::error!("Failed to list reference dialogues: {:?}", e);
        ApiError::internal("Failed to fetch reference dialogues")
    })?;
    Ok(Json(dialogues))
}

pub async fn add_reference(
    State(state): State<AppState>,
    payload: Result<Json<NewReferenceDialogue>, JsonRejection>,
) -> Result<(StatusCode, Json<ReferenceDialogue>), ApiError> {
    let Json(payload) = payload?;
    let dialogue = ReferenceDialogue {
        id: Uuid::now_v7(),
        source: payload.source,
        characters: payload.characters,
        content: payload.content,
        tags: payload.tags,
    };

    state
        .db
        .add_reference_dialogue(dialogue.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to add reference dialogue: {:?}", e);
            ApiError::internal("Failed to add reference dialogue")
        })?;

    Ok((StatusCode::CREATED, Json(dialogue)))
}
