use crate::config::{self, ConfigError, ProviderSettings};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod huggingface;
pub mod openai;

pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to reach provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse provider response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Failed to build provider request: {0}")]
    Request(#[from] async_openai::error::OpenAIError),
    #[error("Provider reported an error: {0}")]
    Api(String),
    #[error("No response generated")]
    Empty,
}

/// A hosted LLM that turns an instruction into text.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait DialogueProvider: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        instruction: &str,
        system_preamble: &str,
    ) -> Result<String, ProviderError>;
}

/// Construct the configured provider. Fails without touching the network
/// when its credential is missing.
pub fn from_settings(
    settings: &ProviderSettings,
    timeout: Duration,
) -> Result<Arc<dyn DialogueProvider>, ConfigError> {
    match settings {
        ProviderSettings::HuggingFace {
            api_key,
            model_id,
            api_base,
        } => {
            let api_key = config::require_key(api_key.as_ref(), config::HUGGINGFACE_API_KEY_VAR)?;
            let model_id = model_id
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(config::DEFAULT_HUGGINGFACE_MODEL_ID);
            Ok(Arc::new(HuggingFaceProvider::new(
                config::http_client(timeout)?,
                api_key,
                api_base.clone(),
                model_id,
            )))
        }
        ProviderSettings::OpenAi {
            api_key,
            model,
            api_base,
        } => {
            let api_key = config::require_key(api_key.as_ref(), config::OPENAI_API_KEY_VAR)?;
            Ok(Arc::new(OpenAiProvider::new(
                config::http_client(timeout)?,
                api_key,
                api_base.clone(),
                model.clone(),
            )))
        }
    }
}

/// Send a prepared request and hand back the body of a 2xx response.
/// Anything else becomes [`ProviderError::Status`] carrying the raw body.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<String, ProviderError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Provider request failed");
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

pub(crate) fn endpoint(api_base: &str, path: &str) -> String {
    format!("{}/{}", api_base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_are_configuration_errors() {
        let hf = ProviderSettings::hugging_face(None, None);
        assert_eq!(
            from_settings(&hf, config::DEFAULT_REQUEST_TIMEOUT).err(),
            Some(ConfigError::MissingCredential(config::HUGGINGFACE_API_KEY_VAR))
        );

        let openai = ProviderSettings::open_ai(Some(String::new()), None);
        assert_eq!(
            from_settings(&openai, config::DEFAULT_REQUEST_TIMEOUT).err(),
            Some(ConfigError::MissingCredential(config::OPENAI_API_KEY_VAR))
        );
    }

    #[test]
    fn builds_selected_provider() {
        let hf = ProviderSettings::hugging_face(Some("hf_key".into()), None);
        let provider = from_settings(&hf, config::DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert_eq!(provider.name(), "huggingface");

        let openai = ProviderSettings::open_ai(Some("sk-key".into()), None);
        let provider = from_settings(&openai, config::DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint("https://api.openai.com/v1/", "chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint("http://127.0.0.1:9000", "models/a/b"),
            "http://127.0.0.1:9000/models/a/b"
        );
    }
}
