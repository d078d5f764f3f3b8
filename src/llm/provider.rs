//! LLM provider trait and request/response types.

use async_trait::async_trait;

use crate::error::LlmError;

/// A single-prompt completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The full instruction sent as the sole user content.
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Text returned by a completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text of the first candidate.
    pub content: String,
    /// Provider-reported finish reason, if any (e.g. "STOP").
    pub finish_reason: Option<String>,
}

/// A text-generation backend.
///
/// Implementations perform exactly one outbound call per `complete` and never
/// retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Send one prompt and return the first generated candidate.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
