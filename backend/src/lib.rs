pub mod config;
pub mod dbs;
mod error;
pub mod generator;
mod handlers;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod voice;

use crate::config::BackendConfig;
use crate::dbs::{Database, DbResult};
use crate::generator::DialogueGenerator;
use crate::handlers::{
    add_reference, create_character, generate_dialogue, list_characters, list_references,
    list_saved_dialogues, save_dialogue, synthesize_voice,
};
use crate::voice::VoiceService;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub generator: DialogueGenerator,
    pub voice: VoiceService,
}

impl AppState {
    pub async fn from_config(config: &BackendConfig) -> DbResult<Self> {
        Ok(Self {
            db: dbs::connect(&config.database).await?,
            generator: DialogueGenerator::from_settings(&config.provider, config.request_timeout),
            voice: VoiceService::from_settings(&config.voice, config.request_timeout),
        })
    }
}

pub async fn init(router: Router<AppState>, config: &BackendConfig) -> DbResult<Router<()>> {
    let state = AppState::from_config(config).await?;
    Ok(routes(router, state))
}

pub fn routes(router: Router<AppState>, state: AppState) -> Router<()> {
    router
        .route("/", get(|| async { "Movie Dialogue Generator API" }))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/generate", post(generate_dialogue))
        .route("/api/save-dialogue", post(save_dialogue))
        .route("/api/saved-dialogues", get(list_saved_dialogues))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route("/api/references", get(list_references).post(add_reference))
        .route("/api/synthesize", post(synthesize_voice))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
