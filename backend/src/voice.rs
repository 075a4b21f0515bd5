use crate::config::{self, ConfigError, VoiceSettings};
use crate::providers::endpoint;
use async_trait::async_trait;
use serde::Serialize;
use shared::models::VoiceRequest;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_VOICE_ID: &str = "EXAVITQu4vr4xnSDxMaL";
const MODEL_ID: &str = "eleven_monolingual_v1";

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Text is required")]
    TextRequired,
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("Failed to reach voice service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Voice synthesis API error (status {status}): {body}")]
    Status { status: u16, body: String },
}

/// Hosted text to speech. Returns encoded audio (MP3).
#[async_trait]
pub trait VoiceSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, VoiceError>;
}

/// Stock voice for a character archetype. Keys outside the table get the
/// default voice.
pub fn voice_for_character(character: &str) -> &'static str {
    match character {
        "hero" => "21m00Tcm4TlvDq8ikWAM",
        "villain" => "AZnzlk1XvdvUeBnXmlld",
        "sidekick" => "EXAVITQu4vr4xnSDxMaL",
        "detective" => "MF3mGyEYCl7XYWbV9V6O",
        "default" => DEFAULT_VOICE_ID,
        other => {
            tracing::warn!(character = other, "No voice mapped, using default");
            DEFAULT_VOICE_ID
        }
    }
}

/// An explicit, non-blank voice id wins over the character lookup.
pub fn resolve_voice_id(request: &VoiceRequest) -> String {
    match request.voice_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => voice_for_character(&request.character).to_string(),
    }
}

#[derive(Serialize)]
struct ElevenLabsSettings {
    stability: f64,
    similarity_boost: f64,
}

#[derive(Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: ElevenLabsSettings,
}

pub struct ElevenLabsClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl ElevenLabsClient {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl VoiceSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, VoiceError> {
        let payload = ElevenLabsRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: ElevenLabsSettings {
                stability: 0.75,
                similarity_boost: 0.75,
            },
        };

        let response = self
            .client
            .post(endpoint(&self.api_base, &format!("text-to-speech/{voice_id}")))
            .header("xi-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(VoiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Front door for `/api/synthesize`: checks the request, picks the voice,
/// and reports a missing key per request instead of at startup.
#[derive(Clone)]
pub struct VoiceService {
    synthesizer: Result<Arc<dyn VoiceSynthesizer>, ConfigError>,
}

impl VoiceService {
    pub fn new(synthesizer: Arc<dyn VoiceSynthesizer>) -> Self {
        Self {
            synthesizer: Ok(synthesizer),
        }
    }

    pub fn from_settings(settings: &VoiceSettings, timeout: Duration) -> Self {
        let synthesizer = config::require_key(settings.api_key.as_ref(), config::ELEVENLABS_API_KEY_VAR)
            .and_then(|key| {
                let client = config::http_client(timeout)?;
                Ok(Arc::new(ElevenLabsClient::new(client, key, settings.api_base.clone()))
                    as Arc<dyn VoiceSynthesizer>)
            });
        if let Err(e) = &synthesizer {
            tracing::warn!("Voice synthesis unavailable: {}", e);
        }
        Self { synthesizer }
    }

    pub async fn synthesize(&self, request: &VoiceRequest) -> Result<Vec<u8>, VoiceError> {
        if request.text.is_empty() {
            return Err(VoiceError::TextRequired);
        }
        let voice_id = resolve_voice_id(request);
        let synthesizer = self.synthesizer.as_ref().map_err(|e| e.clone())?;

        tracing::info!(voice = %voice_id, chars = request.text.len(), "Synthesizing line");
        synthesizer.synthesize(&request.text, &voice_id).await
    }
}
