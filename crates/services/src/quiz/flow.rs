use quiz_core::model::Selections;

use super::progress::QuizProgress;
use crate::error::FlowError;

/// What happens after an answer is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    /// Show the question at this index next.
    Next(usize),
    /// The last question was answered; show the result.
    Finished,
}

/// In-memory state of one pass through the questions.
///
/// The flow only moves forward: each answer is written at the current
/// index and the index advances until the last question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFlow {
    selections: Selections,
    current: usize,
    total: usize,
    finished: bool,
    restarted: bool,
}

impl QuizFlow {
    /// Continue from previously stored answers.
    ///
    /// Stored answers are cut to `total`. A stored run that already covers
    /// every question is treated as stale and the flow starts over from the
    /// first question.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::EmptyCatalog` if there are no questions.
    pub fn resume(stored: Selections, total: usize) -> Result<Self, FlowError> {
        if total == 0 {
            return Err(FlowError::EmptyCatalog);
        }

        let stored = stored.truncated(total);
        let restarted = stored.len() == total;
        let selections = if restarted { Selections::new() } else { stored };

        Ok(Self {
            current: selections.len(),
            selections,
            total,
            finished: false,
            restarted,
        })
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True when a complete earlier run was discarded on resume.
    #[must_use]
    pub fn was_restarted(&self) -> bool {
        self.restarted
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            current: self.current,
            total: self.total,
            answered: self.selections.len(),
            is_complete: self.finished,
        }
    }

    /// Answers after recording `choice` for the current question, without
    /// changing the flow. Lets callers persist before committing.
    pub(crate) fn preview(&self, choice: u32) -> Result<Selections, FlowError> {
        if self.finished {
            return Err(FlowError::Completed);
        }
        let mut next = self.selections.clone();
        next.record(self.current, choice)?;
        Ok(next)
    }

    /// Commit answers produced by `preview` and move on.
    pub(crate) fn advance(&mut self, selections: Selections) -> FlowStep {
        self.selections = selections;
        if self.current + 1 >= self.total {
            self.finished = true;
            FlowStep::Finished
        } else {
            self.current += 1;
            FlowStep::Next(self.current)
        }
    }
}
