use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use quiz_core::model::{ImageFormat, ImageHandle};
use services::{ImageLoader, QuizOutcome};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub title: String,
    pub member_name: String,
    /// First description line, shown as the member's quote.
    pub quote: Option<String>,
    pub lines: Vec<String>,
    pub score: usize,
    pub total_questions: usize,
    pub image: Option<ImageHandle>,
}

impl ResultVm {
    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{} / {}", self.score, self.total_questions)
    }

    #[must_use]
    pub fn image_alt(&self) -> String {
        format!("{} profile", self.member_name)
    }
}

impl From<&QuizOutcome> for ResultVm {
    fn from(outcome: &QuizOutcome) -> Self {
        let mut lines = outcome
            .description
            .as_ref()
            .map(|description| {
                description
                    .lines()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
            .into_iter();

        Self {
            title: outcome.title().to_string(),
            member_name: outcome.member.identity().to_string(),
            quote: lines.next(),
            lines: lines.collect(),
            score: outcome.score,
            total_questions: outcome.total_questions,
            image: outcome.image.clone(),
        }
    }
}

/// Inline image bytes so the webview can show them without a file URL.
#[must_use]
pub fn image_data_url(format: ImageFormat, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

/// Load a profile photo as a data URL. Failures fall back to the placeholder.
pub async fn load_image_data_url(loader: &dyn ImageLoader, handle: &ImageHandle) -> Option<String> {
    match loader.load(handle).await {
        Ok(bytes) => Some(image_data_url(handle.format(), &bytes)),
        Err(err) => {
            warn!(path = %handle.path().display(), error = %err, "profile image unavailable");
            None
        }
    }
}
