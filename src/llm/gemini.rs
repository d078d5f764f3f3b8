//! Google Gemini `generateContent` provider.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::provider::{CompletionRequest, CompletionResponse, LlmProvider};
use crate::error::LlmError;

const PROVIDER: &str = "gemini";

/// Gemini provider talking to the REST API with the key as a query parameter.
pub struct GeminiProvider {
    client: Client,
    api_key: SecretString,
    model: String,
    endpoint: String,
}

impl GeminiProvider {
    /// Create a provider for `model` under `base_url`
    /// (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub fn new(api_key: SecretString, model: &str, base_url: &str) -> Result<Self, LlmError> {
        let client = Client::builder()
            .build()
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_key,
            model: model.to_string(),
            endpoint: generate_content_url(base_url, model),
        })
    }
}

/// `{base}/models/{model}:generateContent`
pub fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = request.prompt.len(),
            "Sending generateContent request"
        );

        // reqwest errors carry the URL, which carries the key.
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.expose_secret())])
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.without_url().to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| LlmError::RequestFailed {
            provider: PROVIDER.to_string(),
            reason: format!("Failed to read response: {}", e.without_url()),
        })?;

        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        parse_generate_content(&text)
    }
}

/// Pull the first candidate's first text part out of a success payload.
pub fn parse_generate_content(body: &str) -> Result<CompletionResponse, LlmError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse {
            provider: PROVIDER.to_string(),
            reason: format!("Failed to parse response: {}", e),
        })?;

    let candidate = parsed
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| LlmError::InvalidResponse {
            provider: PROVIDER.to_string(),
            reason: "No candidates in response".to_string(),
        })?;

    let content = candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| LlmError::InvalidResponse {
            provider: PROVIDER.to_string(),
            reason: "First candidate has no text part".to_string(),
        })?;

    Ok(CompletionResponse {
        content,
        finish_reason: candidate.finish_reason,
    })
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
