use crate::config::{ConfigError, ProviderSettings};
use crate::parser::parse_dialogue;
use crate::prompt::{SYSTEM_PREAMBLE, build_dialogue_prompt};
use crate::providers::{self, DialogueProvider, ProviderError};
use shared::models::{DEFAULT_EXCHANGES, GenerationRequest, GenerationResult};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("scenario required")]
    ScenarioRequired,
    #[error("at least two characters required")]
    TooFewCharacters,
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Check a request and fill in defaults. The first failing rule wins.
pub fn validate(mut request: GenerationRequest) -> Result<GenerationRequest, ValidationError> {
    if request.scenario.trim().is_empty() {
        return Err(ValidationError::ScenarioRequired);
    }
    if request.characters.len() < 2 {
        return Err(ValidationError::TooFewCharacters);
    }
    if request.num_exchanges <= 0 {
        request.num_exchanges = DEFAULT_EXCHANGES;
    }
    Ok(request)
}

/// Request in, attributed lines out: validate, prompt, one provider call, parse.
///
/// Holds no per-request state, so one instance is shared by every handler.
#[derive(Clone)]
pub struct DialogueGenerator {
    provider: Result<Arc<dyn DialogueProvider>, ConfigError>,
}

impl DialogueGenerator {
    pub fn new(provider: Arc<dyn DialogueProvider>) -> Self {
        Self {
            provider: Ok(provider),
        }
    }

    /// A generator that rejects every valid request with `error`.
    pub fn unconfigured(error: ConfigError) -> Self {
        Self {
            provider: Err(error),
        }
    }

    /// Missing credentials do not stop the server; they surface per request.
    pub fn from_settings(settings: &ProviderSettings, timeout: Duration) -> Self {
        match providers::from_settings(settings, timeout) {
            Ok(provider) => Self::new(provider),
            Err(e) => {
                tracing::warn!("Dialogue provider unavailable: {}", e);
                Self::unconfigured(e)
            }
        }
    }

    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerateError> {
        let request = validate(request)?;
        let prompt = build_dialogue_prompt(&request);
        let provider = self.provider.as_ref().map_err(|e| e.clone())?;

        tracing::info!(
            provider = provider.name(),
            characters = request.characters.len(),
            exchanges = request.num_exchanges,
            "Generating dialogue"
        );
        tracing::debug!("Prompt: {}", prompt);

        let generated = provider.generate(&prompt, SYSTEM_PREAMBLE).await?;
        let exchanges = parse_dialogue(&generated, &request.characters);
        tracing::info!(
            received = generated.len(),
            exchanges = exchanges.len(),
            "Parsed dialogue"
        );

        Ok(GenerationResult {
            scenario: request.scenario,
            exchanges,
        })
    }
}
