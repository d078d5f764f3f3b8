//! Trip planning questionnaire.
//!
//! The planner asks a fixed sequence of questions, one at a time, building an
//! `AnswerProfile`. Once every question is answered it asks the model for a
//! day-by-day itinerary exactly once and appends the result to the
//! transcript.

pub mod generator;
pub mod manager;
pub mod model;
pub mod prompts;
pub mod state;

pub use generator::{ItineraryGenerator, UNEXPECTED_RESPONSE_FORMAT};
pub use manager::{PlannerManager, QuestionView, SessionView};
pub use model::{AnswerProfile, ChatEntry, ProfileDraft, Question, Role, Transcript};
pub use state::{Session, SessionPhase};
