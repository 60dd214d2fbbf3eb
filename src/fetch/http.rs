//! Fetch news documents from a web server

use reqwest::{Client, Url};
use std::time::Duration;

use super::{ContentFetcher, FetchError};
use crate::content::{ContentResource, RawDocument};

/// User-Agent string for news requests
const USER_AGENT: &str = concat!("newsbox/", env!("CARGO_PKG_VERSION"));

/// GETs `<base_url>/<resource>` for every request
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher with its own client and request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Self::with_client(base_url, client)
    }

    /// Create a fetcher around an existing client
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, FetchError> {
        // Without a trailing slash, joining would replace the last segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resource_url(&self, resource: &ContentResource) -> Result<Url, FetchError> {
        self.base_url
            .join(resource.name())
            .map_err(|e| FetchError::InvalidUrl {
                url: format!("{}{}", self.base_url, resource),
                message: e.to_string(),
            })
    }
}

impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, resource: &ContentResource) -> Result<RawDocument, FetchError> {
        let url = self.resource_url(resource)?;
        tracing::debug!("GET {}", url);

        let transport = |source| FetchError::Transport {
            resource: resource.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(transport)?;
        Ok(RawDocument::new(resource.clone(), text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn spawn_server() -> String {
        let app = Router::new()
            .route(
                "/news/news1.md",
                get(|| async { "# Remote\n发布时间：2024-05-01\nFrom the server" }),
            )
            .route(
                "/news/broken.md",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/news", addr)
    }

    fn fetcher(base: &str) -> HttpFetcher {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpFetcher::with_client(base, client).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let fetcher = fetcher("https://example.com/site/news");
        let url = fetcher
            .resource_url(&ContentResource::new("news1.md"))
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/site/news/news1.md");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = Client::builder().no_proxy().build().unwrap();
        let err = HttpFetcher::with_client("not a url", client).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let base = spawn_server().await;
        let doc = fetcher(&base)
            .fetch(&ContentResource::new("news1.md"))
            .await
            .unwrap();
        assert!(doc.text.starts_with("# Remote"));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let base = spawn_server().await;
        let fetcher = fetcher(&base);

        let err = fetcher
            .fetch(&ContentResource::new("broken.md"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));

        let err = fetcher
            .fetch(&ContentResource::new("absent.md"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_refused_connection() {
        // Bind then drop so the port is closed
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetcher(&format!("http://{}/news", addr))
            .fetch(&ContentResource::new("news1.md"))
            .await
            .unwrap_err();
        match err {
            FetchError::Transport { resource, .. } => assert_eq!(resource, "news1.md"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
