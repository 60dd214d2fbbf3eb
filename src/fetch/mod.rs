//! Fetching news documents from disk or over HTTP

mod http;
mod local;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::config::NewsConfig;
use crate::content::{ContentResource, RawDocument};

pub use http::HttpFetcher;
pub use local::LocalFetcher;

/// Failure to obtain the text of one resource
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to load {resource}: HTTP {status}")]
    Status { resource: String, status: u16 },

    #[error("failed to load {resource}: {source}")]
    Transport {
        resource: String,
        source: reqwest::Error,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid news url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

/// Source of news documents
///
/// Callers await each fetch before starting the next one, so
/// implementations never see concurrent requests from the pipeline.
pub trait ContentFetcher {
    fn fetch(
        &self,
        resource: &ContentResource,
    ) -> impl Future<Output = Result<RawDocument, FetchError>> + Send;
}

/// Fetcher selected from the `news.source` setting
#[derive(Debug, Clone)]
pub enum Fetcher {
    Local(LocalFetcher),
    Http(HttpFetcher),
}

impl Fetcher {
    /// Build the fetcher for a site rooted at `base_dir`
    pub fn from_config(base_dir: &Path, news: &NewsConfig) -> Result<Self, FetchError> {
        if news.is_remote() {
            let timeout = Duration::from_secs(news.timeout_secs);
            Ok(Fetcher::Http(HttpFetcher::new(&news.source, timeout)?))
        } else {
            Ok(Fetcher::Local(LocalFetcher::new(base_dir.join(&news.source))))
        }
    }

    /// Human-readable location of the documents
    pub fn location(&self) -> String {
        match self {
            Fetcher::Local(local) => local.dir().display().to_string(),
            Fetcher::Http(http) => http.base_url().to_string(),
        }
    }
}

impl ContentFetcher for Fetcher {
    async fn fetch(&self, resource: &ContentResource) -> Result<RawDocument, FetchError> {
        match self {
            Fetcher::Local(local) => local.fetch(resource).await,
            Fetcher::Http(http) => http.fetch(resource).await,
        }
    }
}
