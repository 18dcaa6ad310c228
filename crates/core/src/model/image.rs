use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::ids::StudentId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImageNameError {
    #[error("unsupported image extension: {0}")]
    UnsupportedExtension(String),

    #[error("image file name must look like `studentId_name.ext`: {0}")]
    MalformedName(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }
}

/// Where an image lives. Bytes are only read when the handle is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    path: PathBuf,
    format: ImageFormat,
}

impl ImageHandle {
    #[must_use]
    pub fn new(path: PathBuf, format: ImageFormat) -> Self {
        Self { path, format }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

/// A member photo parsed from a `studentId_identity.ext` file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    student_id: StudentId,
    identity: String,
    handle: ImageHandle,
}

impl ImageAsset {
    /// Parse an asset from its path.
    ///
    /// Only the first two `_`-separated segments of the base name are used.
    ///
    /// # Errors
    ///
    /// Returns `ImageNameError` if the extension is not an image type we
    /// render, or either the student id or the name segment is empty.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, ImageNameError> {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (base, ext) = file_name
            .rsplit_once('.')
            .ok_or_else(|| ImageNameError::UnsupportedExtension(file_name.clone()))?;
        let format = ImageFormat::from_extension(ext)
            .ok_or_else(|| ImageNameError::UnsupportedExtension(ext.to_string()))?;

        let mut parts = base.split('_');
        let student_id = parts.next().unwrap_or_default().trim();
        let identity = parts.next().unwrap_or_default().trim();
        if student_id.is_empty() || identity.is_empty() {
            return Err(ImageNameError::MalformedName(file_name));
        }

        Ok(Self {
            student_id: StudentId::new(student_id),
            identity: identity.to_string(),
            handle: ImageHandle::new(path, format),
        })
    }

    #[must_use]
    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[must_use]
    pub fn handle(&self) -> &ImageHandle {
        &self.handle
    }
}
