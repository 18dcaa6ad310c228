use std::sync::Arc;

use quiz_core::catalog::ImageRegistry;
use quiz_core::matching::best_match;
use quiz_core::model::{Description, ImageHandle, Member};
use quiz_core::names::{resolve_description, resolve_image};
use tracing::{debug, info};

use crate::catalogs::QuizCatalogs;
use crate::error::ResultError;
use crate::selection_store::SelectionStore;

/// The member the user matched best, with whatever profile data resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub member: Member,
    pub score: usize,
    pub answered: usize,
    pub total_questions: usize,
    pub description: Option<Description>,
    pub image: Option<ImageHandle>,
}

impl QuizOutcome {
    /// Description display name when one resolved, otherwise the member name.
    #[must_use]
    pub fn title(&self) -> &str {
        self.description
            .as_ref()
            .map_or_else(|| self.member.identity(), Description::display_name)
    }
}

/// Computes the result page from the stored answers and the static catalogs.
#[derive(Clone)]
pub struct ResultService {
    catalogs: Arc<QuizCatalogs>,
    images: Arc<ImageRegistry>,
    store: SelectionStore,
}

impl ResultService {
    #[must_use]
    pub fn new(
        catalogs: Arc<QuizCatalogs>,
        images: Arc<ImageRegistry>,
        store: SelectionStore,
    ) -> Self {
        Self {
            catalogs,
            images,
            store,
        }
    }

    /// Read the answers once and find the best-matching member.
    ///
    /// Returns `Ok(None)` when there are no answers or no members.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` if the stored answers cannot be read.
    pub async fn outcome(&self) -> Result<Option<QuizOutcome>, ResultError> {
        let total_questions = self.catalogs.questions.len();
        let selections = self.store.read().await?.truncated(total_questions);

        let Some(best) = best_match(&selections, self.catalogs.members.members()) else {
            debug!(
                answered = selections.len(),
                members = self.catalogs.members.len(),
                "no result to show"
            );
            return Ok(None);
        };

        let description =
            resolve_description(best.member.identity(), self.catalogs.descriptions.descriptions())
                .cloned();
        let image = resolve_image(best.member, self.images.images())
            .map(|asset| asset.handle().clone());

        info!(
            member = best.member.identity(),
            score = best.score,
            answered = selections.len(),
            has_description = description.is_some(),
            has_image = image.is_some(),
            "best match resolved"
        );

        Ok(Some(QuizOutcome {
            member: best.member.clone(),
            score: best.score,
            answered: selections.len(),
            total_questions,
            description,
            image,
        }))
    }
}
