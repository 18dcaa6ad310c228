#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalogs;
pub mod error;
pub mod images;
pub mod quiz;
pub mod selection_store;

pub use app_services::AppServices;
pub use catalogs::QuizCatalogs;
pub use error::{
    AppServicesError, CatalogLoadError, FlowError, ImageLoadError, ResultError,
    SelectionStoreError,
};
pub use images::{FsImageLoader, ImageLoader, scan_image_dir};
pub use quiz::{FlowStep, QuizFlow, QuizFlowService, QuizOutcome, QuizProgress, ResultService};
pub use selection_store::{SELECTIONS_KEY, SelectionStore};
