//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::catalog::CatalogError;
use quiz_core::model::{QuestionId, SelectionsError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SelectionStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SelectionStoreError {
    #[error("failed to encode selections: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the question flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlowError {
    #[error("no questions available")]
    EmptyCatalog,
    #[error("quiz already completed")]
    Completed,
    #[error("choice {choice} does not exist for question {question}")]
    InvalidChoice { question: QuestionId, choice: usize },
    #[error(transparent)]
    Selections(#[from] SelectionsError),
    #[error(transparent)]
    Store(#[from] SelectionStoreError),
}

/// Errors emitted by `ResultService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultError {
    #[error(transparent)]
    Store(#[from] SelectionStoreError),
}

/// Errors emitted while reading catalog files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {name}: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: CatalogError,
    },
}

/// Errors emitted by image loaders.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImageLoadError {
    #[error("failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image {} is empty", .0.display())]
    Empty(PathBuf),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
