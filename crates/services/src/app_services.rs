use std::sync::Arc;

use quiz_core::catalog::ImageRegistry;
use storage::repository::Storage;

use crate::catalogs::QuizCatalogs;
use crate::error::AppServicesError;
use crate::images::{FsImageLoader, ImageLoader};
use crate::quiz::{QuizFlowService, ResultService};
use crate::selection_store::SelectionStore;

/// Assembles app-facing services around one storage backend and the
/// static catalogs.
#[derive(Clone)]
pub struct AppServices {
    catalogs: Arc<QuizCatalogs>,
    images: Arc<ImageRegistry>,
    quiz_flow: Arc<QuizFlowService>,
    results: Arc<ResultService>,
    image_loader: Arc<dyn ImageLoader>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        catalogs: QuizCatalogs,
        images: ImageRegistry,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, catalogs, images))
    }

    /// Build services over an existing storage backend.
    #[must_use]
    pub fn from_storage(storage: &Storage, catalogs: QuizCatalogs, images: ImageRegistry) -> Self {
        let catalogs = Arc::new(catalogs);
        let images = Arc::new(images);
        let store = SelectionStore::new(Arc::clone(&storage.slots));

        let quiz_flow = Arc::new(QuizFlowService::new(
            Arc::new(catalogs.questions.clone()),
            store.clone(),
        ));
        let results = Arc::new(ResultService::new(
            Arc::clone(&catalogs),
            Arc::clone(&images),
            store,
        ));

        Self {
            catalogs,
            images,
            quiz_flow,
            results,
            image_loader: Arc::new(FsImageLoader),
        }
    }

    #[must_use]
    pub fn with_image_loader(mut self, loader: Arc<dyn ImageLoader>) -> Self {
        self.image_loader = loader;
        self
    }

    #[must_use]
    pub fn catalogs(&self) -> Arc<QuizCatalogs> {
        Arc::clone(&self.catalogs)
    }

    #[must_use]
    pub fn images(&self) -> Arc<ImageRegistry> {
        Arc::clone(&self.images)
    }

    #[must_use]
    pub fn quiz_flow(&self) -> Arc<QuizFlowService> {
        Arc::clone(&self.quiz_flow)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultService> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn image_loader(&self) -> Arc<dyn ImageLoader> {
        Arc::clone(&self.image_loader)
    }
}
