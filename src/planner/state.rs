//! Session state machine — walks the user through the questions and gates
//! the single generation step.
//!
//! Transitions are pure: each consumes the session and returns the next one.

use serde::{Deserialize, Serialize};

use super::model::{AnswerProfile, ChatEntry, ProfileDraft, Question, Transcript};
use super::prompts::ITINERARY_HEADER;

/// Where the session is in its lifecycle.
///
/// Progresses linearly: Collecting → ReadyToGenerate → Done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Questions remain unanswered.
    Collecting,
    /// Every question is answered; generation has not run.
    ReadyToGenerate,
    /// Generation has run (successfully or not).
    Done,
}

impl SessionPhase {
    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Collecting => "collecting",
            Self::ReadyToGenerate => "ready_to_generate",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}

/// One conversation's worth of state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    transcript: Transcript,
    /// Index of the next unanswered question (`0..=Question::COUNT`).
    question_index: usize,
    draft: ProfileDraft,
    itinerary_generated: bool,
    /// Assistant message appended after the last answer. Survives reset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    final_prompt: Option<String>,
}

impl Session {
    /// A fresh session at the first question.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message appended once the last question is answered.
    pub fn with_final_prompt(mut self, final_prompt: Option<String>) -> Self {
        self.final_prompt = final_prompt;
        self
    }

    pub fn phase(&self) -> SessionPhase {
        if self.itinerary_generated {
            SessionPhase::Done
        } else if self.question_index < Question::COUNT {
            SessionPhase::Collecting
        } else {
            SessionPhase::ReadyToGenerate
        }
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// The question awaiting an answer, if still collecting.
    pub fn current_question(&self) -> Option<Question> {
        Question::at(self.question_index)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn itinerary_generated(&self) -> bool {
        self.itinerary_generated
    }

    pub fn final_prompt(&self) -> Option<&str> {
        self.final_prompt.as_deref()
    }

    /// The complete profile, once every question is answered.
    pub fn profile(&self) -> Option<AnswerProfile> {
        self.draft.complete()
    }

    /// Accept one raw answer for the current question.
    ///
    /// Records the user entry, stores the coerced answer, appends the next
    /// question (or the final prompt, if configured) and advances the index.
    /// Outside `Collecting` the input is ignored.
    pub fn handle_answer(mut self, raw_input: &str) -> Self {
        let Some(question) = self.current_question() else {
            tracing::debug!(phase = %self.phase(), "Ignoring input outside question collection");
            return self;
        };

        self.transcript.push(ChatEntry::user(raw_input));
        self.draft.record(question, raw_input);

        match question.next() {
            Some(next) => self.transcript.push(ChatEntry::assistant(next.prompt())),
            None => {
                if let Some(ref final_prompt) = self.final_prompt {
                    self.transcript.push(ChatEntry::assistant(final_prompt.clone()));
                }
            }
        }

        self.question_index += 1;
        tracing::debug!(
            field = %question,
            question_index = self.question_index,
            "Recorded answer"
        );
        self
    }

    /// Record the outcome of the generation call.
    ///
    /// Only applies in `ReadyToGenerate`; appends the header and the
    /// itinerary (or error text) and sets the one-shot flag. Any other phase
    /// returns the session unchanged.
    pub fn complete_generation(mut self, itinerary: impl Into<String>) -> Self {
        if self.phase() != SessionPhase::ReadyToGenerate {
            tracing::debug!(phase = %self.phase(), "Ignoring generation result");
            return self;
        }
        self.transcript.push(ChatEntry::assistant(ITINERARY_HEADER));
        self.transcript.push(ChatEntry::assistant(itinerary));
        self.itinerary_generated = true;
        self
    }

    /// Start over: a fresh session that keeps only the configured final prompt.
    pub fn reset(self) -> Self {
        Self::new().with_final_prompt(self.final_prompt)
    }
}
