//! Static quiz data: questions, member answer vectors, member descriptions
//! and member photos.
//!
//! The JSON shapes are the ones the content team edits by hand; they are
//! decoded into private `Raw*` structs and validated into domain types.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{
    Choice, Description, ImageAsset, ImageNameError, Member, MemberError, Question,
    QuestionError, QuestionId, StudentId,
};

const BUNDLED_QUESTIONS: &str = include_str!("../data/questions.json");
const BUNDLED_MEMBERS: &str = include_str!("../data/members.json");
const BUNDLED_DESCRIPTIONS: &str = include_str!("../data/descriptions.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("duplicate question id {0}")]
    DuplicateQuestion(QuestionId),

    #[error(transparent)]
    Member(#[from] MemberError),
}

//
// ─── RAW SHAPES ────────────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct RawQuestionFile {
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Deserialize)]
struct RawQuestion {
    id: u32,
    question: String,
    #[serde(default)]
    answers: Vec<RawChoice>,
}

#[derive(Deserialize)]
struct RawChoice {
    answer: String,
}

#[derive(Deserialize)]
struct RawMemberFile {
    #[serde(default)]
    answer: Vec<RawMember>,
}

#[derive(Deserialize)]
struct RawMember {
    #[serde(rename = "student number")]
    student_number: String,
    name: String,
    #[serde(default)]
    answer: Vec<u32>,
}

#[derive(Deserialize)]
struct RawDescriptionFile {
    #[serde(default)]
    description: Vec<RawDescription>,
}

#[derive(Deserialize)]
struct RawDescription {
    name: String,
    #[serde(default)]
    desc: String,
}

//
// ─── QUESTIONS ─────────────────────────────────────────────────────────────────
//

/// Ordered list of quiz questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Validate and wrap questions, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateQuestion` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(CatalogError::DuplicateQuestion(question.id()));
            }
        }
        Ok(Self { questions })
    }

    /// Parse `{ "questions": [ { "id", "question", "answers": [ { "answer" } ] } ] }`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on malformed JSON or invalid questions.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let file: RawQuestionFile = serde_json::from_str(raw)?;
        let questions = file
            .questions
            .into_iter()
            .map(|item| {
                let choices = item
                    .answers
                    .into_iter()
                    .map(|choice| Choice::new(choice.answer))
                    .collect();
                Question::new(QuestionId::new(item.id), item.question, choices)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    /// Questions shipped with the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled file is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_QUESTIONS)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── MEMBERS ───────────────────────────────────────────────────────────────────
//

/// Members with their expected answers, in catalog order (order breaks ties).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencePanel {
    members: Vec<Member>,
}

impl ReferencePanel {
    #[must_use]
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    /// Parse `{ "answer": [ { "student number", "name", "answer": [int] } ] }`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on malformed JSON or a member without a name.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let file: RawMemberFile = serde_json::from_str(raw)?;
        let members = file
            .answer
            .into_iter()
            .map(|item| Member::new(item.name, StudentId::new(item.student_number), item.answer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(members))
    }

    /// Members shipped with the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled file is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_MEMBERS)
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members whose answer vector length differs from `question_count`.
    pub fn misaligned(&self, question_count: usize) -> impl Iterator<Item = &Member> {
        self.members
            .iter()
            .filter(move |member| member.expected_answers().len() != question_count)
    }
}

//
// ─── DESCRIPTIONS ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionRegistry {
    descriptions: Vec<Description>,
}

impl DescriptionRegistry {
    #[must_use]
    pub fn new(descriptions: Vec<Description>) -> Self {
        Self { descriptions }
    }

    /// Parse `{ "description": [ { "name", "desc" } ] }`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` on malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let file: RawDescriptionFile = serde_json::from_str(raw)?;
        Ok(Self::new(
            file.description
                .into_iter()
                .map(|item| Description::new(item.name, item.desc))
                .collect(),
        ))
    }

    /// Descriptions shipped with the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled file is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_DESCRIPTIONS)
    }

    #[must_use]
    pub fn descriptions(&self) -> &[Description] {
        &self.descriptions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

//
// ─── IMAGES ────────────────────────────────────────────────────────────────────
//

/// Member photos, built once from a list of file paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRegistry {
    images: Vec<ImageAsset>,
}

impl ImageRegistry {
    #[must_use]
    pub fn new(images: Vec<ImageAsset>) -> Self {
        Self { images }
    }

    /// Parse every path; returns the registry (sorted by file name so the
    /// first-match rule does not depend on directory iteration order) and
    /// the rejected paths with their reasons.
    #[must_use]
    pub fn from_paths(
        paths: impl IntoIterator<Item = PathBuf>,
    ) -> (Self, Vec<(PathBuf, ImageNameError)>) {
        let mut images = Vec::new();
        let mut rejected = Vec::new();
        for path in paths {
            match ImageAsset::from_path(path.clone()) {
                Ok(asset) => images.push(asset),
                Err(err) => rejected.push((path, err)),
            }
        }
        images.sort_by(|left, right| left.handle().path().cmp(right.handle().path()));
        (Self { images }, rejected)
    }

    #[must_use]
    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
