use super::{DialogueProvider, ProviderError, endpoint, send};
use async_openai::{
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use serde::Deserialize;

const TEMPERATURE: f32 = 0.7;

/// Chat completion against any OpenAI compatible endpoint.
///
/// The request body is built with `async-openai` types; transport goes
/// through our own client so the timeout, the single attempt and the raw
/// error body stay under our control.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.into(),
            model: model.into(),
        }
    }

    fn build_request(
        &self,
        instruction: &str,
        system_preamble: &str,
    ) -> Result<CreateChatCompletionRequest, OpenAIError> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_preamble.to_string())
                    .build()?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(instruction.to_string())
                    .build()?,
            ),
        ];

        CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .temperature(TEMPERATURE)
            .build()
    }
}

fn first_choice_content(body: &str) -> Result<String, ProviderError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(ProviderError::Empty)
}

#[async_trait]
impl DialogueProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(
        &self,
        instruction: &str,
        system_preamble: &str,
    ) -> Result<String, ProviderError> {
        let request = self.build_request(instruction, system_preamble)?;

        tracing::debug!(model = %self.model, "Requesting chat completion");
        let body = send(
            self.client
                .post(endpoint(&self.api_base, "chat/completions"))
                .bearer_auth(&self.api_key)
                .json(&request),
        )
        .await?;

        first_choice_content(&body)
    }
}
