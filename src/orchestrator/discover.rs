//! Core discovery pipeline: concurrent source fan-out, merge, enrich, locate,
//! filter, curate.
//!
//! Steps run strictly in order; each finishes for every candidate before the
//! next starts.

use crate::config::DiscoveryConfig;
use crate::enricher::SummaryEnricher;
use crate::error::DiscoveryError;
use crate::http::build_client;
use crate::source::{SourceClient, SummaryFetcher};
use crate::sources::{GeoSearchClient, NearCoordClient};
use crate::summary::WikipediaSummaryClient;
use crate::types::{Candidate, Coordinate, SourceKind};

use super::distance::{backfill_distance, within_radius};
use super::merge::merge_by_id;
use super::scoring::curate;

/// Discovery pipeline backed by the Wikipedia clients.
pub type WikipediaDiscovery = Discovery<GeoSearchClient, NearCoordClient, WikipediaSummaryClient>;

/// A discovery pipeline over a geo search source `G`, a near-coordinate
/// source `N`, and a summary fetcher `S`.
///
/// The pipeline owns the summary cache through its enricher, so keep one
/// instance alive to reuse summaries across runs.
#[derive(Debug)]
pub struct Discovery<G, N, S> {
    geo: G,
    near: N,
    enricher: SummaryEnricher<S>,
    config: DiscoveryConfig,
}

impl WikipediaDiscovery {
    /// Build a pipeline whose three clients share one HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Config`] if `config` is invalid, or
    /// [`DiscoveryError::Http`] if the HTTP client cannot be built.
    pub fn wikipedia(config: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        config.validate()?;
        let client = build_client(&config)?;
        let geo = GeoSearchClient::with_client(client.clone(), &config)?;
        let near = NearCoordClient::with_client(client.clone(), &config)?;
        let summaries = WikipediaSummaryClient::with_client(client, &config)?;
        Self::new(geo, near, summaries, config)
    }
}

impl<G, N, S> Discovery<G, N, S>
where
    G: SourceClient,
    N: SourceClient,
    S: SummaryFetcher,
{
    /// Assemble a pipeline from its sources and summary fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Config`] if `config` is invalid.
    pub fn new(
        geo: G,
        near: N,
        summaries: S,
        config: DiscoveryConfig,
    ) -> Result<Self, DiscoveryError> {
        config.validate()?;
        Ok(Self {
            geo,
            near,
            enricher: SummaryEnricher::new(summaries),
            config,
        })
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// The enricher, and through it the summary cache.
    pub fn enricher(&self) -> &SummaryEnricher<S> {
        &self.enricher
    }

    /// Run discovery for the current location, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::NoLocation`] when `coordinate` is `None`,
    /// otherwise the errors of [`Discovery::discover`].
    pub async fn refresh(
        &self,
        coordinate: Option<Coordinate>,
        radius_meters: u32,
    ) -> Result<Vec<Candidate>, DiscoveryError> {
        let Some(origin) = coordinate else {
            return Err(DiscoveryError::NoLocation);
        };
        self.discover(origin, radius_meters).await
    }

    /// Discover curated articles within `radius_meters` of `origin`.
    ///
    /// # Pipeline
    ///
    /// 1. Query both sources concurrently and wait for both
    /// 2. Merge by id in [`SourceKind::precedence`] order, so geo search
    ///    results win ties
    /// 3. Enrich with summaries, at most `max_concurrent_enrichments` in flight
    /// 4. Backfill missing distances from coordinates
    /// 5. Drop candidates without a distance or beyond the radius
    /// 6. Keep candidates meeting the curation criteria
    /// 7. Sort ascending by curation score
    /// 8. Truncate to `curation.max_results`
    ///
    /// An empty list is a successful run with nothing worth showing.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::DiscoveryFailed`] if the geo search source
    /// fails, or [`DiscoveryError::Config`] if `radius_meters` is zero.
    /// Near-coordinate outages and per-candidate summary misses only shrink
    /// the result.
    pub async fn discover(
        &self,
        origin: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<Candidate>, DiscoveryError> {
        if radius_meters == 0 {
            return Err(DiscoveryError::Config(
                "radius_meters must be at least 1".into(),
            ));
        }
        tracing::trace!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            radius_meters,
            "discovery started"
        );

        // 1. Fan out to both sources concurrently.
        let (geo_outcome, near_outcome) = futures::join!(
            self.geo.fetch(origin, radius_meters),
            self.near.fetch(origin, radius_meters)
        );
        let mut batches = [
            (self.geo.kind(), settle(self.geo.kind(), geo_outcome)?),
            (self.near.kind(), settle(self.near.kind(), near_outcome)?),
        ];

        // 2. Merge by identity in source precedence order; the first batch
        // wins ties.
        batches.sort_by_key(|(kind, _)| kind.precedence());
        let merged = merge_by_id(batches.map(|(_, batch)| batch));
        tracing::debug!(candidates = merged.len(), "merged source results");

        // 3. Enrich with summaries.
        let enriched = self
            .enricher
            .enrich_all(merged, self.config.max_concurrent_enrichments)
            .await;

        // 4-5. Backfill distances, then apply the radius.
        let nearby: Vec<Candidate> = enriched
            .into_iter()
            .map(|candidate| backfill_distance(candidate, origin))
            .filter(|candidate| within_radius(candidate, radius_meters))
            .collect();
        tracing::debug!(candidates = nearby.len(), "within radius");

        // 6-8. Filter, score, sort, truncate.
        let curated = curate(nearby, &self.config.curation);
        tracing::debug!(results = curated.len(), "discovery finished");
        Ok(curated)
    }
}

/// Resolve one source's outcome.
///
/// An authoritative source's failure fails the run; any other source's
/// failure degrades to no results.
fn settle(
    kind: SourceKind,
    outcome: Result<Vec<Candidate>, DiscoveryError>,
) -> Result<Vec<Candidate>, DiscoveryError> {
    match outcome {
        Ok(candidates) => {
            tracing::debug!(
                source = %kind,
                count = candidates.len(),
                "source returned candidates"
            );
            Ok(candidates)
        }
        Err(err) if kind.is_authoritative() => {
            tracing::warn!(source = %kind, error = %err, "authoritative source failed");
            Err(DiscoveryError::DiscoveryFailed(err.to_string()))
        }
        Err(err) => {
            tracing::warn!(
                source = %kind,
                error = %err,
                "optional source failed, continuing without it"
            );
            Ok(Vec::new())
        }
    }
}
