//! # nearby-search
//!
//! Discovers encyclopedia articles around a coordinate and returns a short,
//! quality-curated list.
//!
//! ## Design
//!
//! - Queries a geo-radius search and a keyword near-coordinate search
//!   concurrently and merges them by page id, geo search first
//! - Enriches every candidate with its page summary, with a bounded number of
//!   lookups in flight and an in-process summary cache
//! - Backfills missing distances, filters by radius and quality, ranks by a
//!   curation score, and keeps the top results
//! - Graceful degradation: a near-coordinate outage or a missing summary only
//!   shrinks the result; only a geo search failure fails the call
//!
//! ## Boundaries
//!
//! - No location, geocoding, bookmarking, or rendering: callers hand in a
//!   coordinate and own whatever they do with the results
//! - No network listeners; this is a library
//! - Coordinates are logged only at trace level

pub mod cache;
pub mod config;
pub mod enricher;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod source;
pub mod sources;
pub mod summary;
pub mod types;

pub use config::{CurationPolicy, DiscoveryConfig};
pub use enricher::SummaryEnricher;
pub use error::{DiscoveryError, Result};
pub use orchestrator::discover::{Discovery, WikipediaDiscovery};
pub use orchestrator::distance::{distance_meters, radius_meters_from_miles};
pub use orchestrator::scoring::{curation_score, popularity_score, sort_by_popularity};
pub use source::{SourceClient, SummaryFetcher};
pub use types::{Candidate, Coordinate, SourceKind, Summary};

/// Discover curated articles near `coordinate` using Wikipedia.
///
/// Builds a fresh [`WikipediaDiscovery`] for the call, so nothing is cached
/// between calls; hold a [`WikipediaDiscovery`] instead to reuse summaries.
///
/// # Errors
///
/// Returns [`DiscoveryError::NoLocation`] if `coordinate` is `None`,
/// [`DiscoveryError::DiscoveryFailed`] if the geo search source fails, and
/// [`DiscoveryError::Config`] for an invalid `config` or a zero radius.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> nearby_search::Result<()> {
/// use nearby_search::{Coordinate, DiscoveryConfig};
///
/// let config = DiscoveryConfig::default();
/// let here = Some(Coordinate::new(40.7580, -73.9855));
/// let articles = nearby_search::discover(here, 805, &config).await?;
/// for article in &articles {
///     println!("{} ({:.0} m)", article.title, article.distance_meters.unwrap_or_default());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn discover(
    coordinate: Option<Coordinate>,
    radius_meters: u32,
    config: &DiscoveryConfig,
) -> Result<Vec<Candidate>> {
    let discovery = WikipediaDiscovery::wikipedia(config.clone())?;
    discovery.refresh(coordinate, radius_meters).await
}

/// Discover curated articles with the default configuration.
///
/// Convenience wrapper around [`discover`] using [`DiscoveryConfig::default()`].
///
/// # Errors
///
/// Same as [`discover`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> nearby_search::Result<()> {
/// use nearby_search::{Coordinate, radius_meters_from_miles};
///
/// let radius = radius_meters_from_miles(0.5);
/// let articles = nearby_search::discover_default(Some(Coordinate::FALLBACK), radius).await?;
/// println!("{} articles", articles.len());
/// # Ok(())
/// # }
/// ```
pub async fn discover_default(
    coordinate: Option<Coordinate>,
    radius_meters: u32,
) -> Result<Vec<Candidate>> {
    discover(coordinate, radius_meters, &DiscoveryConfig::default()).await
}
