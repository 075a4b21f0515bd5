use backend::config::{BackendConfig, ProviderSettings, VoiceSettings};
use backend::dbs::DatabaseConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum Provider {
    /// Raw text generation on the Hugging Face inference API
    Huggingface,
    /// OpenAI compatible chat completion
    Openai,
}

#[derive(Parser)]
#[command(about = "Movie dialogue generator API server")]
pub struct Cli {
    /// Interface or host name to listen on
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
    /// Use Postgres instead of the local JSON file
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
    #[arg(long, default_value = "db.json")]
    pub local_db_path: PathBuf,
    #[arg(long, env = "DIALOGUE_PROVIDER", value_enum, default_value_t = Provider::Huggingface)]
    pub provider: Provider,
    #[arg(long, env = "HUGGINGFACE_API_KEY", hide_env_values = true)]
    pub huggingface_api_key: Option<String>,
    #[arg(long, env = "HUGGINGFACE_MODEL_ID")]
    pub huggingface_model_id: Option<String>,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,
    #[arg(long, env = "OPENAI_MODEL")]
    pub openai_model: Option<String>,
    #[arg(long, env = "OPENAI_API_BASE")]
    pub openai_api_base: Option<String>,
    #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    pub elevenlabs_api_key: Option<String>,
    /// Upper bound for each call to the LLM and voice services
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl Cli {
    pub fn backend_config(&self) -> BackendConfig {
        let database = match &self.database_url {
            Some(url) => DatabaseConfig::Postgres { url: url.clone() },
            None => DatabaseConfig::Local {
                path: self.local_db_path.clone(),
            },
        };

        let provider = match self.provider {
            Provider::Huggingface => ProviderSettings::hugging_face(
                self.huggingface_api_key.clone(),
                self.huggingface_model_id.clone(),
            ),
            Provider::Openai => {
                let settings =
                    ProviderSettings::open_ai(self.openai_api_key.clone(), self.openai_model.clone());
                match &self.openai_api_base {
                    Some(base) => settings.with_api_base(base.clone()),
                    None => settings,
                }
            }
        };

        BackendConfig {
            database,
            provider,
            voice: VoiceSettings {
                api_key: self.elevenlabs_api_key.clone(),
                ..VoiceSettings::default()
            },
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
