use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    #[serde(default)]
    pub character: String,
    pub text: String,
    /// Explicit voice; when absent the character key picks one
    #[serde(default)]
    pub voice_id: Option<String>,
}
