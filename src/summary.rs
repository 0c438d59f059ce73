//! Page summary client for the REST summary endpoint.

use reqwest::StatusCode;
use url::Url;

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::http::build_client;
use crate::source::SummaryFetcher;
use crate::types::Summary;

/// REST path segments below the configured host.
const SUMMARY_PATH: [&str; 4] = ["api", "rest_v1", "page", "summary"];

/// Fetches `/api/rest_v1/page/summary/{title}`.
#[derive(Debug, Clone)]
pub struct WikipediaSummaryClient {
    client: reqwest::Client,
    base: Url,
}

impl WikipediaSummaryClient {
    /// Create a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Config`] for an invalid base URL or
    /// [`DiscoveryError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        Self::with_client(build_client(config)?, config)
    }

    /// Create a client sharing an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Config`] for an invalid base URL.
    pub fn with_client(
        client: reqwest::Client,
        config: &DiscoveryConfig,
    ) -> Result<Self, DiscoveryError> {
        Ok(Self {
            client,
            base: config.base_url()?,
        })
    }

    /// Build the summary URL for a title.
    ///
    /// Spaces become underscores, the form page titles take in URLs; the
    /// rest is percent-encoded as a single path segment, so titles with `/`
    /// stay intact.
    pub fn request_url(&self, title: &str) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .clear()
                .extend(SUMMARY_PATH)
                .push(&title.replace(' ', "_"));
        }
        url
    }
}

impl SummaryFetcher for WikipediaSummaryClient {
    async fn fetch_summary(&self, title: &str) -> Result<Summary, DiscoveryError> {
        let url = self.request_url(title);
        tracing::trace!(title, "summary request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DiscoveryError::SummaryUnavailable(format!("{title}: {e}")))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(DiscoveryError::SummaryUnavailable(format!(
                    "{title}: page not found"
                )));
            }
            status => {
                return Err(DiscoveryError::SummaryUnavailable(format!(
                    "{title}: HTTP {status}"
                )));
            }
        }

        response
            .json::<Summary>()
            .await
            .map_err(|e| DiscoveryError::Parse(format!("summary for {title}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WikipediaSummaryClient {
        WikipediaSummaryClient::new(&DiscoveryConfig::default()).expect("client")
    }

    #[test]
    fn request_url_uses_rest_path() {
        let url = client().request_url("Bryant Park");
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Bryant_Park"
        );
    }

    #[test]
    fn request_url_encodes_slash_in_title() {
        let url = client().request_url("AC/DC");
        assert_eq!(url.path(), "/api/rest_v1/page/summary/AC%2FDC");
    }

    #[test]
    fn request_url_encodes_non_ascii() {
        let url = client().request_url("Café Lalo");
        assert_eq!(url.path(), "/api/rest_v1/page/summary/Caf%C3%A9_Lalo");
    }

    #[test]
    fn request_url_ignores_base_path() {
        let config = DiscoveryConfig {
            api_base_url: "https://en.wikipedia.org/wiki/".into(),
            ..Default::default()
        };
        let client = WikipediaSummaryClient::new(&config).expect("client");
        assert_eq!(
            client.request_url("X").path(),
            "/api/rest_v1/page/summary/X"
        );
    }
}
