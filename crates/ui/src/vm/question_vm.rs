use quiz_core::model::QuestionId;
use services::{FlowError, FlowStep, QuizFlow, QuizFlowService};

use crate::views::ViewError;

/// Everything the question card needs for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub id: QuestionId,
    pub prompt: String,
    pub choices: Vec<String>,
    /// 1-based position of the question on screen.
    pub number: usize,
    pub total: usize,
    pub progress_percent: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionOutcome {
    Continue,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    flow: QuizFlow,
}

impl QuizVm {
    #[must_use]
    pub fn new(flow: QuizFlow) -> Self {
        Self { flow }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.flow.is_finished()
    }

    #[must_use]
    pub fn card(&self, quiz_flow: &QuizFlowService) -> Option<QuestionCardVm> {
        let question = quiz_flow.current_question(&self.flow)?;
        let progress = self.flow.progress();
        Some(QuestionCardVm {
            id: question.id(),
            prompt: question.prompt().to_string(),
            choices: question
                .choices()
                .iter()
                .map(|choice| choice.label().to_string())
                .collect(),
            number: progress.current + 1,
            total: progress.total,
            progress_percent: progress.percent(),
        })
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` for service failures.
    pub async fn answer(
        &mut self,
        quiz_flow: &QuizFlowService,
        choice: usize,
    ) -> Result<QuestionOutcome, ViewError> {
        let step = quiz_flow
            .answer(&mut self.flow, choice)
            .await
            .map_err(|_| ViewError::Unknown)?;

        Ok(match step {
            FlowStep::Next(_) => QuestionOutcome::Continue,
            FlowStep::Finished => QuestionOutcome::Finished,
        })
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyQuiz` when there are no questions.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_quiz(quiz_flow: &QuizFlowService) -> Result<QuizVm, ViewError> {
    let flow = match quiz_flow.start().await {
        Ok(flow) => flow,
        Err(FlowError::EmptyCatalog) => return Err(ViewError::EmptyQuiz),
        Err(_) => return Err(ViewError::Unknown),
    };

    Ok(QuizVm::new(flow))
}
