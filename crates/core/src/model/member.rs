use thiserror::Error;

use crate::model::ids::StudentId;
use crate::names::normalize_name;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MemberError {
    #[error("member {student_id:?} has an empty name")]
    EmptyIdentity { student_id: StudentId },
}

/// A reference profile the quiz can match a user to.
///
/// `expected_answers[i]` is the 1-based choice this member picked for
/// question `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    identity: String,
    student_id: StudentId,
    expected_answers: Vec<u32>,
}

impl Member {
    /// Build a member record.
    ///
    /// # Errors
    ///
    /// Returns `MemberError::EmptyIdentity` if the name is blank once
    /// whitespace is stripped.
    pub fn new(
        identity: impl Into<String>,
        student_id: StudentId,
        expected_answers: Vec<u32>,
    ) -> Result<Self, MemberError> {
        let identity = identity.into();
        if normalize_name(&identity).is_empty() {
            return Err(MemberError::EmptyIdentity { student_id });
        }

        Ok(Self {
            identity,
            student_id,
            expected_answers,
        })
    }

    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[must_use]
    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    #[must_use]
    pub fn expected_answers(&self) -> &[u32] {
        &self.expected_answers
    }
}
