use std::path::Path;

use async_trait::async_trait;
use quiz_core::catalog::ImageRegistry;
use quiz_core::model::ImageHandle;
use tracing::{debug, info, warn};

use crate::error::ImageLoadError;

/// Reads image bytes on demand.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Load the bytes behind a handle.
    ///
    /// # Errors
    ///
    /// Returns `ImageLoadError` if the image cannot be read.
    async fn load(&self, handle: &ImageHandle) -> Result<Vec<u8>, ImageLoadError>;
}

/// Loads images from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

#[async_trait]
impl ImageLoader for FsImageLoader {
    async fn load(&self, handle: &ImageHandle) -> Result<Vec<u8>, ImageLoadError> {
        let path = handle.path();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ImageLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        if bytes.is_empty() {
            return Err(ImageLoadError::Empty(path.to_path_buf()));
        }
        debug!(path = %path.display(), size = bytes.len(), "image loaded");
        Ok(bytes)
    }
}

/// Build the photo table from the file names in `dir`.
///
/// Only names are read here; a missing directory yields an empty registry.
#[must_use]
pub fn scan_image_dir(dir: &Path) -> ImageRegistry {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), %err, "image directory unavailable");
            return ImageRegistry::default();
        }
    };

    let paths = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file());
    let (registry, rejected) = ImageRegistry::from_paths(paths);
    for (path, err) in rejected {
        debug!(path = %path.display(), %err, "skipping file in image directory");
    }
    info!(dir = %dir.display(), images = registry.len(), "image registry built");
    registry
}
