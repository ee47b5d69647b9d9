//! Client for the external code generation service (Gemini `generateContent`)

use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::prompt::build_prompt;
use crate::timer::TimerConfig;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Returned in place of code when the service answers without any text
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "// Error generating code.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API key is missing, set GEMINI_API_KEY or pass --gemini-api-key")]
    MissingApiKey,

    #[error("Failed to reach the code generation service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Code generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Plugin source produced for one config snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    pub code: String,
    pub model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone)]
pub struct CodeGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, None)
    }
}

impl CodeGenerator {
    pub fn new(endpoint: &str, model: &str, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Ask the service for plugin source matching `config`.
    pub async fn generate(&self, config: &TimerConfig) -> Result<GeneratedCode, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;
        let prompt = build_prompt(config);
        debug!("Sending {} byte prompt to {}", prompt.len(), self.url());

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let code = match payload.text() {
            Some(text) => strip_code_fence(&text),
            None => {
                warn!("Code generation service returned no text");
                EMPTY_RESPONSE_PLACEHOLDER.to_string()
            }
        };

        info!("Generated {} bytes of plugin source with {}", code.len(), self.model);
        Ok(GeneratedCode {
            code,
            model: self.model.clone(),
        })
    }
}

/// Drop a surrounding markdown fence (```cpp ... ```) if the model added one.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let body = match rest.split_once('\n') {
        Some((_lang, body)) => body,
        None => "",
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
        .to_string()
}
