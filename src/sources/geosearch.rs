//! Geo-radius search: geotagged pages around a coordinate.
//!
//! The authoritative source. Every hit carries the page coordinate and the
//! distance the API computed from the query point, so its records win every
//! merge tie and its failure fails the whole run.

use serde::Deserialize;
use url::Url;

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::http::build_client;
use crate::source::SourceClient;
use crate::types::{Candidate, Coordinate, SourceKind};

use super::action_api_url;

/// Largest radius the geosearch module accepts, in meters.
pub const MAX_GEOSEARCH_RADIUS_METERS: u32 = 10_000;

/// MediaWiki `list=geosearch` client.
#[derive(Debug, Clone)]
pub struct GeoSearchClient {
    client: reqwest::Client,
    endpoint: Url,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    query: GeoSearchQuery,
}

#[derive(Debug, Deserialize)]
struct GeoSearchQuery {
    geosearch: Vec<GeoSearchHit>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchHit {
    pageid: u64,
    title: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    dist: Option<f64>,
}

impl GeoSearchHit {
    fn into_candidate(self) -> Candidate {
        Candidate::geo_search(
            self.pageid.to_string(),
            self.title,
            Coordinate::new(self.lat, self.lon),
            self.dist,
        )
    }
}

impl GeoSearchClient {
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
    ///
    /// Radii beyond [`MAX_GEOSEARCH_RADIUS_METERS`] are clamped; the API
    /// rejects them outright.
    pub fn request_url(&self, coordinate: Coordinate, radius_meters: u32) -> Url {
        let radius = radius_meters.min(MAX_GEOSEARCH_RADIUS_METERS);
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("action", "query")
            .append_pair("list", "geosearch")
            .append_pair(
                "gscoord",
                &format!("{}|{}", coordinate.latitude, coordinate.longitude),
            )
            .append_pair("gsradius", &radius.to_string())
            .append_pair("gslimit", &self.limit.to_string());
        url
    }
}

impl SourceClient for GeoSearchClient {
    async fn fetch(
        &self,
        coordinate: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<Candidate>, DiscoveryError> {
        let url = self.request_url(coordinate, radius_meters);
        tracing::trace!(%url, "geo search request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| DiscoveryError::SourceUnavailable(format!("geo search: {e}")))?;

        let body: GeoSearchResponse = response
            .json()
            .await
            .map_err(|e| DiscoveryError::SourceUnavailable(format!("geo search: {e}")))?;

        Ok(body
            .query
            .geosearch
            .into_iter()
            .map(GeoSearchHit::into_candidate)
            .collect())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::GeoSearch
    }
}
