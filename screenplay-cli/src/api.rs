use shared::models::{GenerationRequest, GenerationResult};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Error sending request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API Error: {body}")]
    Api { status: u16, body: String },
}

pub async fn generate(
    client: &reqwest::Client,
    api_base: &str,
    request: &GenerationRequest,
) -> Result<GenerationResult, ClientError> {
    let response = client
        .post(format!("{}/api/generate", api_base.trim_end_matches('/')))
        .json(request)
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            body: response.text().await?,
        });
    }
    Ok(response.json().await?)
}
