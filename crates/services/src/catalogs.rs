use std::path::{Path, PathBuf};

use quiz_core::catalog::{CatalogError, DescriptionRegistry, QuestionCatalog, ReferencePanel};
use tracing::{error, info, warn};

use crate::error::CatalogLoadError;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const MEMBERS_FILE: &str = "members.json";
pub const DESCRIPTIONS_FILE: &str = "descriptions.json";

/// All static quiz content, loaded once per process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizCatalogs {
    pub questions: QuestionCatalog,
    pub members: ReferencePanel,
    pub descriptions: DescriptionRegistry,
}

impl QuizCatalogs {
    /// Load every catalog, from `data_dir` when given, else from the copies
    /// bundled into the binary.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogLoadError` encountered.
    pub fn load(data_dir: Option<&Path>) -> Result<Self, CatalogLoadError> {
        let catalogs = Self {
            questions: load_part(
                data_dir,
                QUESTIONS_FILE,
                QuestionCatalog::from_json,
                QuestionCatalog::bundled,
            )?,
            members: load_part(
                data_dir,
                MEMBERS_FILE,
                ReferencePanel::from_json,
                ReferencePanel::bundled,
            )?,
            descriptions: load_part(
                data_dir,
                DESCRIPTIONS_FILE,
                DescriptionRegistry::from_json,
                DescriptionRegistry::bundled,
            )?,
        };
        catalogs.log_summary();
        Ok(catalogs)
    }

    /// Like `load`, but a catalog that cannot be read is replaced by an empty
    /// one so the UI can show its fallback states instead of refusing to start.
    #[must_use]
    pub fn load_or_empty(data_dir: Option<&Path>) -> Self {
        let catalogs = Self {
            questions: load_part(
                data_dir,
                QUESTIONS_FILE,
                QuestionCatalog::from_json,
                QuestionCatalog::bundled,
            )
            .unwrap_or_else(empty_on_error),
            members: load_part(
                data_dir,
                MEMBERS_FILE,
                ReferencePanel::from_json,
                ReferencePanel::bundled,
            )
            .unwrap_or_else(empty_on_error),
            descriptions: load_part(
                data_dir,
                DESCRIPTIONS_FILE,
                DescriptionRegistry::from_json,
                DescriptionRegistry::bundled,
            )
            .unwrap_or_else(empty_on_error),
        };
        catalogs.log_summary();
        catalogs
    }

    fn log_summary(&self) {
        info!(
            questions = self.questions.len(),
            members = self.members.len(),
            descriptions = self.descriptions.len(),
            "catalogs loaded"
        );
        for member in self.members.misaligned(self.questions.len()) {
            warn!(
                member = member.identity(),
                answers = member.expected_answers().len(),
                questions = self.questions.len(),
                "member answer vector does not cover every question"
            );
        }
    }
}

fn load_part<T>(
    data_dir: Option<&Path>,
    name: &'static str,
    parse: fn(&str) -> Result<T, CatalogError>,
    bundled: fn() -> Result<T, CatalogError>,
) -> Result<T, CatalogLoadError> {
    let parsed = match data_dir {
        Some(dir) => {
            let path: PathBuf = dir.join(name);
            let raw = std::fs::read_to_string(&path)
                .map_err(|source| CatalogLoadError::Io { path, source })?;
            parse(&raw)
        }
        None => bundled(),
    };
    parsed.map_err(|source| CatalogLoadError::Invalid { name, source })
}

fn empty_on_error<T: Default>(err: CatalogLoadError) -> T {
    error!(%err, "catalog unavailable, continuing with an empty one");
    T::default()
}
