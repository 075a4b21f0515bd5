use super::{DialogueProvider, ProviderError, endpoint, send};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const TEMPERATURE: f64 = 0.7;
const MAX_NEW_TOKENS: u32 = 1024;

/// Raw text generation against the Hugging Face inference API.
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model_id: String,
}

#[derive(Serialize)]
struct GenerationParameters {
    temperature: f64,
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Serialize)]
struct HuggingFaceRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Deserialize)]
struct HuggingFaceGeneration {
    #[serde(default)]
    generated_text: String,
    #[serde(default)]
    error: Option<String>,
}

/// The endpoint answers with a list for batched models and a bare object
/// for the rest.
#[derive(Deserialize)]
#[serde(untagged)]
enum HuggingFaceResponse {
    Batch(Vec<HuggingFaceGeneration>),
    Single(HuggingFaceGeneration),
}

impl HuggingFaceProvider {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.into(),
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Wrap system and user text in the role markers Llama instruct models expect.
pub fn format_llama_prompt(system: &str, user: &str) -> String {
    format!("<|system|>\n{system}\n<|user|>\n{user}\n<|assistant|>\n")
}

/// Pull the first `generated_text` out of either response shape.
pub(crate) fn extract_generated_text(body: &str) -> Result<String, ProviderError> {
    let generation = match serde_json::from_str::<HuggingFaceResponse>(body)? {
        HuggingFaceResponse::Batch(batch) => batch.into_iter().next(),
        HuggingFaceResponse::Single(single) => Some(single),
    };

    match generation {
        Some(g) if !g.generated_text.is_empty() => Ok(g.generated_text),
        Some(HuggingFaceGeneration {
            error: Some(error), ..
        }) if !error.is_empty() => Err(ProviderError::Api(error)),
        _ => Err(ProviderError::Empty),
    }
}

#[async_trait]
impl DialogueProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn generate(
        &self,
        instruction: &str,
        system_preamble: &str,
    ) -> Result<String, ProviderError> {
        let payload = HuggingFaceRequest {
            inputs: format_llama_prompt(system_preamble, instruction),
            parameters: GenerationParameters {
                temperature: TEMPERATURE,
                max_new_tokens: MAX_NEW_TOKENS,
                return_full_text: false,
            },
        };

        let url = endpoint(&self.api_base, &format!("models/{}", self.model_id));
        tracing::debug!(model = %self.model_id, "Requesting text generation");

        let body = send(
            self.client
                .post(url)
                .bearer_auth(&self.api_key)
                .json(&payload),
        )
        .await?;
        tracing::debug!("Response: {}", body);

        extract_generated_text(&body)
    }
}
