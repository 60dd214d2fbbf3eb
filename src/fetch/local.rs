//! Read news documents from a directory on disk

use std::path::{Path, PathBuf};

use super::{ContentFetcher, FetchError};
use crate::content::{ContentResource, RawDocument};

/// Reads `<dir>/<resource>` for every request
#[derive(Debug, Clone)]
pub struct LocalFetcher {
    dir: PathBuf,
}

impl LocalFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ContentFetcher for LocalFetcher {
    async fn fetch(&self, resource: &ContentResource) -> Result<RawDocument, FetchError> {
        let path = self.dir.join(resource.name());
        tracing::debug!("Reading {:?}", path);

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| FetchError::Io { path, source })?;

        // Decoded the same way as an HTTP body: invalid sequences become U+FFFD
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(RawDocument::new(resource.clone(), text))
    }
}
