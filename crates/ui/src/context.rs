use std::sync::Arc;

use quiz_core::links::ExternalLinks;
use services::{ImageLoader, QuizFlowService, ResultService};

use crate::platform::{DesktopLinkOpener, LinkOpenerRef};

pub trait UiApp: Send + Sync {
    fn quiz_flow(&self) -> Arc<QuizFlowService>;
    fn results(&self) -> Arc<ResultService>;
    fn image_loader(&self) -> Arc<dyn ImageLoader>;
    fn links(&self) -> ExternalLinks;

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::new(DesktopLinkOpener)
    }
}

#[derive(Clone)]
pub struct AppContext {
    links: ExternalLinks,
    link_opener: LinkOpenerRef,

    quiz_flow: Arc<QuizFlowService>,
    results: Arc<ResultService>,
    image_loader: Arc<dyn ImageLoader>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            links: app.links(),
            link_opener: app.link_opener(),
            quiz_flow: app.quiz_flow(),
            results: app.results(),
            image_loader: app.image_loader(),
        }
    }

    #[must_use]
    pub fn links(&self) -> &ExternalLinks {
        &self.links
    }

    /// Hand a URL to the platform browser.
    pub fn open_link(&self, url: &str) {
        self.link_opener.open_url(url);
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
