//! PlannerManager — owns the single session and runs generation once.

use serde::Serialize;
use tokio::sync::Mutex;

use super::generator::ItineraryGenerator;
use super::model::{ChatEntry, ProfileDraft, Question};
use super::state::{Session, SessionPhase};

/// Coordinates the session state machine and the itinerary generator.
///
/// Every operation holds the session lock for its whole duration, including
/// the awaited generation call, so transitions are strictly ordered.
pub struct PlannerManager {
    session: Mutex<Session>,
    generator: ItineraryGenerator,
}

impl PlannerManager {
    pub fn new(generator: ItineraryGenerator, final_prompt: Option<String>) -> Self {
        Self {
            session: Mutex::new(Session::new().with_final_prompt(final_prompt)),
            generator,
        }
    }

    /// Current state as seen by the surfaces.
    pub async fn snapshot(&self) -> SessionView {
        SessionView::from(&*self.session.lock().await)
    }

    pub async fn phase(&self) -> SessionPhase {
        self.session.lock().await.phase()
    }

    /// Apply one raw answer to the current question.
    pub async fn submit_answer(&self, raw_input: &str) -> SessionView {
        let mut session = self.session.lock().await;
        let current = std::mem::take(&mut *session);
        *session = current.handle_answer(raw_input);
        SessionView::from(&*session)
    }

    /// Run the generation step if the session is ready for it.
    ///
    /// Returns `true` if generation ran during this call. Once the session is
    /// done, later calls are no-ops.
    pub async fn generate_if_ready(&self) -> bool {
        let mut session = self.session.lock().await;
        if session.phase() != SessionPhase::ReadyToGenerate {
            return false;
        }
        let Some(profile) = session.profile() else {
            tracing::warn!("All questions answered but profile is incomplete");
            return false;
        };

        let itinerary = self.generator.generate(&profile).await;
        let current = std::mem::take(&mut *session);
        *session = current.complete_generation(itinerary);
        true
    }

    /// Start over with a fresh session.
    pub async fn reset(&self) -> SessionView {
        let mut session = self.session.lock().await;
        let current = std::mem::take(&mut *session);
        *session = current.reset();
        tracing::info!("Session reset");
        SessionView::from(&*session)
    }
}

/// A question as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub field: Question,
    pub prompt: &'static str,
}

/// Read model of the session shared by the terminal and HTTP surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub question_index: usize,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionView>,
    pub transcript: Vec<ChatEntry>,
    pub profile: ProfileDraft,
    pub itinerary_generated: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            phase: session.phase(),
            question_index: session.question_index(),
            total_questions: Question::COUNT,
            current_question: session.current_question().map(|q| QuestionView {
                field: q,
                prompt: q.prompt(),
            }),
            transcript: session.transcript().entries().to_vec(),
            profile: session.draft().clone(),
            itinerary_generated: session.itinerary_generated(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::LlmError;
    use crate::llm::{CompletionRequest, CompletionResponse, LlmProvider};
    use crate::planner::prompts::ITINERARY_HEADER;

    /// Counts calls; always answers with the same itinerary.
    #[derive(Default)]
    struct CountingLlm {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for CountingLlm {
        fn model_name(&self) -> &str {
            "counting"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CompletionResponse {
                content: "Day 1: ...".to_string(),
                finish_reason: None,
            })
        }
    }

    fn manager(final_prompt: Option<String>) -> (Arc<PlannerManager>, Arc<CountingLlm>) {
        let llm = Arc::new(CountingLlm::default());
        let manager = PlannerManager::new(ItineraryGenerator::new(llm.clone()), final_prompt);
        (Arc::new(manager), llm)
    }

    async fn answer_all(manager: &PlannerManager) -> SessionView {
        let mut view = manager.snapshot().await;
        for i in 0..Question::COUNT {
            view = manager.submit_answer(&format!("answer {i}")).await;
        }
        view
    }

    #[tokio::test]
    async fn generation_waits_for_all_answers() {
        let (manager, llm) = manager(None);
        manager.submit_answer("Rome").await;
        assert!(!manager.generate_if_ready().await);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);

        let view = answer_all(&manager).await;
        assert_eq!(view.phase, SessionPhase::ReadyToGenerate);
    }

    #[tokio::test]
    async fn generation_fires_at_most_once() {
        let (manager, llm) = manager(None);
        answer_all(&manager).await;

        assert!(manager.generate_if_ready().await);
        for _ in 0..3 {
            assert!(!manager.generate_if_ready().await);
        }
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);

        let view = manager.snapshot().await;
        assert_eq!(view.phase, SessionPhase::Done);
        assert!(view.itinerary_generated);
        let n = view.transcript.len();
        assert_eq!(view.transcript[n - 2], ChatEntry::assistant(ITINERARY_HEADER));
        assert_eq!(view.transcript[n - 1], ChatEntry::assistant("Day 1: ..."));
    }

    #[tokio::test]
    async fn concurrent_generation_requests_call_once() {
        let (manager, llm) = manager(None);
        answer_all(&manager).await;

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.generate_if_ready().await })
            })
            .collect();

        let mut ran = 0;
        for handle in handles {
            if handle.await.unwrap() {
                ran += 1;
            }
        }
        assert_eq!(ran, 1);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reset_allows_a_second_trip() {
        let (manager, llm) = manager(Some("On it!".to_string()));
        answer_all(&manager).await;
        manager.generate_if_ready().await;

        let view = manager.reset().await;
        assert_eq!(view.phase, SessionPhase::Collecting);
        assert_eq!(view.question_index, 0);
        assert!(view.transcript.is_empty());
        assert_eq!(view.profile, ProfileDraft::default());
        assert!(!view.itinerary_generated);

        let view = answer_all(&manager).await;
        assert_eq!(
            view.transcript.last(),
            Some(&ChatEntry::assistant("On it!")),
            "final prompt survives reset"
        );
        assert!(manager.generate_if_ready().await);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn view_exposes_current_question() {
        let (manager, _llm) = manager(None);
        let view = manager.snapshot().await;
        assert_eq!(view.total_questions, 9);
        assert_eq!(
            view.current_question,
            Some(QuestionView {
                field: Question::Destination,
                prompt: Question::Destination.prompt(),
            })
        );

        let view = answer_all(&manager).await;
        assert!(view.current_question.is_none());
        assert_eq!(view.question_index, 9);
    }
}
