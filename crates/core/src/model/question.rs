use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {0} has an empty prompt")]
    EmptyPrompt(QuestionId),

    #[error("question {0} has no answer choices")]
    NoChoices(QuestionId),

    #[error("question {id} has an empty label at choice {index}")]
    EmptyChoiceLabel { id: QuestionId, index: usize },
}

/// A single answer the user can pick for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    label: String,
}

impl Choice {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A prompt with its ordered answer choices.
///
/// The position of a choice in `choices()` is the value recorded in the
/// user's selections (0-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    choices: Vec<Choice>,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are no choices,
    /// or a choice label is blank.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt(id));
        }
        if choices.is_empty() {
            return Err(QuestionError::NoChoices(id));
        }
        if let Some(index) = choices
            .iter()
            .position(|choice| choice.label().trim().is_empty())
        {
            return Err(QuestionError::EmptyChoiceLabel { id, index });
        }

        Ok(Self {
            id,
            prompt,
            choices,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn has_choice(&self, index: usize) -> bool {
        index < self.choices.len()
    }
}
