use crate::dbs::DatabaseConfig;
use std::time::Duration;
use thiserror::Error;

pub const HUGGINGFACE_API_KEY_VAR: &str = "HUGGINGFACE_API_KEY";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const ELEVENLABS_API_KEY_VAR: &str = "ELEVENLABS_API_KEY";

pub const DEFAULT_HUGGINGFACE_API_BASE: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_HUGGINGFACE_MODEL_ID: &str = "meta-llama/Meta-Llama-3.2-3B-Instruct";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io/v1";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Raised before any network call when the process was started without
/// what a backend needs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Which LLM backend answers `/api/generate`, and how to reach it.
#[derive(Clone, Debug)]
pub enum ProviderSettings {
    HuggingFace {
        api_key: Option<String>,
        /// Falls back to [`DEFAULT_HUGGINGFACE_MODEL_ID`]
        model_id: Option<String>,
        api_base: String,
    },
    OpenAi {
        api_key: Option<String>,
        model: String,
        api_base: String,
    },
}

impl ProviderSettings {
    pub fn hugging_face(api_key: Option<String>, model_id: Option<String>) -> Self {
        Self::HuggingFace {
            api_key,
            model_id,
            api_base: DEFAULT_HUGGINGFACE_API_BASE.to_string(),
        }
    }

    pub fn open_ai(api_key: Option<String>, model: Option<String>) -> Self {
        Self::OpenAi {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        match &mut self {
            Self::HuggingFace { api_base, .. } | Self::OpenAi { api_base, .. } => {
                *api_base = base.into();
            }
        }
        self
    }
}

#[derive(Clone, Debug)]
pub struct VoiceSettings {
    pub api_key: Option<String>,
    pub api_base: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_ELEVENLABS_API_BASE.to_string(),
        }
    }
}

/// Everything the backend reads from the environment, resolved once at start.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub database: DatabaseConfig,
    pub provider: ProviderSettings,
    pub voice: VoiceSettings,
    pub request_timeout: Duration,
}

/// Blank values count as unset.
pub(crate) fn require_key(
    key: Option<&String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    key.map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingCredential(var))
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}
