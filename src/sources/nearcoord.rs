//! Keyword near-coordinate search: best-effort title matches.
//!
//! Uses the full-text search `nearcoord:` keyword, which is not available on
//! every wiki. Hits carry identity only. Any HTTP status or payload problem
//! counts as zero results; only a transport failure is reported, and the
//! pipeline degrades that to zero results too.

use serde::Deserialize;
use url::Url;

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::http::build_client;
use crate::source::SourceClient;
use crate::types::{Candidate, Coordinate, SourceKind};

use super::action_api_url;

/// Main (article) namespace.
const ARTICLE_NAMESPACE: &str = "0";

/// MediaWiki `list=search` client using the `nearcoord:` keyword.
#[derive(Debug, Clone)]
pub struct NearCoordClient {
    client: reqwest::Client,
    endpoint: Url,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct NearCoordResponse {
    #[serde(default)]
    query: Option<NearCoordQuery>,
}

#[derive(Debug, Deserialize)]
struct NearCoordQuery {
    search: Vec<NearCoordHit>,
}

#[derive(Debug, Deserialize)]
struct NearCoordHit {
    pageid: u64,
    title: String,
}

impl NearCoordClient {
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
            endpoint: action_api_url(&config.base_url()?),
            limit: config.source_result_limit,
        })
    }

    /// Build the request URL for a query.
    pub fn request_url(&self, coordinate: Coordinate, radius_meters: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("action", "query")
            .append_pair("list", "search")
            .append_pair("srnamespace", ARTICLE_NAMESPACE)
            .append_pair("srlimit", &self.limit.to_string())
            .append_pair("srsearch", &search_term(coordinate, radius_meters));
        url
    }
}

/// The `nearcoord:` search keyword for a point and radius.
fn search_term(coordinate: Coordinate, radius_meters: u32) -> String {
    format!(
        "nearcoord:{radius_meters}m,{},{}",
        coordinate.latitude, coordinate.longitude
    )
}

/// Decode a search payload, treating anything unexpected as no hits.
fn parse_hits(body: &[u8]) -> Vec<Candidate> {
    match serde_json::from_slice::<NearCoordResponse>(body) {
        Ok(NearCoordResponse { query: Some(query) }) => query
            .search
            .into_iter()
            .map(|hit| Candidate::near_coord(hit.pageid.to_string(), hit.title))
            .collect(),
        Ok(NearCoordResponse { query: None }) => {
            tracing::debug!("near-coordinate search returned no query block");
            Vec::new()
        }
        Err(err) => {
            tracing::debug!(error = %err, "near-coordinate search payload unreadable");
            Vec::new()
        }
    }
}

impl SourceClient for NearCoordClient {
    async fn fetch(
        &self,
        coordinate: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<Candidate>, DiscoveryError> {
        let url = self.request_url(coordinate, radius_meters);
        tracing::trace!(%url, "near-coordinate search request");

        let response =
            self.client.get(url).send().await.map_err(|e| {
                DiscoveryError::SourceUnavailable(format!("near-coordinate search: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "near-coordinate search rejected");
            return Ok(Vec::new());
        }

        let body = response.bytes().await.map_err(|e| {
            DiscoveryError::SourceUnavailable(format!("near-coordinate search: {e}"))
        })?;
        Ok(parse_hits(&body))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::NearCoordSearch
    }
}
