use std::sync::Arc;

use quiz_core::catalog::QuestionCatalog;
use quiz_core::model::Question;
use tracing::{debug, info};

use super::flow::{FlowStep, QuizFlow};
use crate::error::FlowError;
use crate::selection_store::SelectionStore;

/// Orchestrates the question flow and persists every answer as it is given.
#[derive(Clone)]
pub struct QuizFlowService {
    questions: Arc<QuestionCatalog>,
    store: SelectionStore,
}

impl QuizFlowService {
    #[must_use]
    pub fn new(questions: Arc<QuestionCatalog>, store: SelectionStore) -> Self {
        Self { questions, store }
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Start (or resume) the flow from the stored answers.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::EmptyCatalog` when there are no questions, or a
    /// store error if the answers cannot be read.
    pub async fn start(&self) -> Result<QuizFlow, FlowError> {
        if self.questions.is_empty() {
            return Err(FlowError::EmptyCatalog);
        }

        let stored = self.store.read().await?;
        let flow = QuizFlow::resume(stored, self.questions.len())?;
        if flow.was_restarted() {
            info!(total = flow.total(), "previous run was complete, starting over");
        } else {
            debug!(
                current = flow.current_index(),
                total = flow.total(),
                "quiz flow started"
            );
        }
        Ok(flow)
    }

    /// The question currently on screen, `None` once the flow finished.
    #[must_use]
    pub fn current_question(&self, flow: &QuizFlow) -> Option<&Question> {
        if flow.is_finished() {
            return None;
        }
        self.questions.get(flow.current_index())
    }

    /// Record `choice` for the current question, persist all answers, then
    /// advance. The flow is left untouched if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidChoice` if the question has no such
    /// choice, `FlowError::Completed` after the last question, or a store
    /// error if the answers cannot be saved.
    pub async fn answer(&self, flow: &mut QuizFlow, choice: usize) -> Result<FlowStep, FlowError> {
        if flow.is_finished() {
            return Err(FlowError::Completed);
        }
        let question = self
            .questions
            .get(flow.current_index())
            .ok_or(FlowError::Completed)?;
        let invalid = || FlowError::InvalidChoice {
            question: question.id(),
            choice,
        };
        if !question.has_choice(choice) {
            return Err(invalid());
        }
        let encoded = u32::try_from(choice).map_err(|_| invalid())?;

        let next = flow.preview(encoded)?;
        self.store.write(&next).await?;
        let step = flow.advance(next);
        debug!(question = %question.id(), choice, ?step, "answer recorded");
        Ok(step)
    }
}
