//! HTTP access to the directory source.
//!
//! Every document is addressed by a path relative to the configured base URL.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use dinodir_shared::{DinoDirError, Result, SourceConfig};

/// User-Agent string for source requests.
const USER_AGENT: &str = concat!("dinodir/", env!("CARGO_PKG_VERSION"));

/// Maximum redirects followed per request.
const MAX_REDIRECTS: usize = 5;

/// Fetches raw documents from the directory source.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct SourceClient {
    config: SourceConfig,
    client: Client,
}

impl SourceClient {
    /// Create a client for the given source.
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DinoDirError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// The source configuration this client was built with.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Absolute URL for a relative document path.
    pub fn url_for(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') {
            format!("{}{path}", self.config.base_url)
        } else {
            format!("{}/{path}", self.config.base_url)
        }
    }

    /// Fetch the raw text of the document at `path`.
    ///
    /// A 404 is reported as [`DinoDirError::NotFound`]; any other failure as
    /// [`DinoDirError::Fetch`].
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.url_for(path);
        debug!(%url, "fetching document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DinoDirError::Fetch(format!("{url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DinoDirError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DinoDirError::Fetch(format!("{url}: HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| DinoDirError::Fetch(format!("{url}: body read failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base: &str) -> SourceClient {
        SourceClient::new(SourceConfig::new(base)).unwrap()
    }

    #[test]
    fn url_joining() {
        let client = client_for("https://example.com/dino-directory/");
        assert_eq!(client.url_for(""), "https://example.com/dino-directory");
        assert_eq!(
            client.url_for("/triceratops.html"),
            "https://example.com/dino-directory/triceratops.html"
        );
        assert_eq!(
            client.url_for("name/name-az-all.html"),
            "https://example.com/dino-directory/name/name-az-all.html"
        );
    }

    #[tokio::test]
    async fn fetch_classifies_statuses() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ok.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken.html"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());

        assert_eq!(client.fetch("/ok.html").await.unwrap(), "<p>hi</p>");

        let err = client.fetch("/missing.html").await.unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");

        let err = client.fetch("/broken.html").await.unwrap_err();
        assert!(matches!(err, DinoDirError::Fetch(_)), "unexpected error: {err}");
    }
}
