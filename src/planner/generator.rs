//! Itinerary generator — turns a finished profile into one model call.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::LlmError;
use crate::llm::{CompletionRequest, LlmProvider};

use super::model::AnswerProfile;
use super::prompts::itinerary_prompt;

/// Returned when the endpoint succeeds but the payload has no text candidate.
pub const UNEXPECTED_RESPONSE_FORMAT: &str = "Error: Unexpected response format.";

/// Generates itineraries with an LLM.
pub struct ItineraryGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl ItineraryGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Render the prompt for `profile`, make exactly one call, and return the
    /// generated text. Failures come back as displayable error text.
    pub async fn generate(&self, profile: &AnswerProfile) -> String {
        let prompt = itinerary_prompt(profile);
        info!(
            model = self.llm.model_name(),
            destination = %profile.destination,
            days = profile.duration.get(),
            "Generating itinerary"
        );

        match self.llm.complete(CompletionRequest::new(prompt)).await {
            Ok(response) => {
                info!(
                    chars = response.content.len(),
                    finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
                    "Itinerary generated"
                );
                response.content
            }
            Err(e) => {
                warn!(error = %e, "Itinerary generation failed");
                failure_text(&e)
            }
        }
    }
}

/// Text shown to the user in place of an itinerary when the call fails.
pub fn failure_text(err: &LlmError) -> String {
    match err {
        LlmError::HttpStatus { status, body, .. } => format!("Error {status}: {body}"),
        LlmError::InvalidResponse { .. } => UNEXPECTED_RESPONSE_FORMAT.to_string(),
        LlmError::RequestFailed { reason, .. } => format!("Error: request failed: {reason}"),
    }
}
