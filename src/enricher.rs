//! Summary enrichment with a per-enricher cache and bounded fan-out.
//!
//! [`SummaryEnricher::enrich_all`] keeps at most `max_concurrent` summary
//! lookups in flight, starts the next one as soon as any finishes, and
//! collects results in completion order. A candidate whose summary cannot be
//! fetched is dropped; the others carry on.

use futures::StreamExt;

use crate::cache::SummaryCache;
use crate::error::DiscoveryError;
use crate::source::SummaryFetcher;
use crate::types::{Candidate, Summary};

/// Enriches bare candidates with page summaries.
///
/// The enricher owns its [`SummaryCache`]; keep one enricher alive across
/// runs to reuse cached summaries.
#[derive(Debug)]
pub struct SummaryEnricher<F> {
    fetcher: F,
    cache: SummaryCache,
}

impl<F: SummaryFetcher> SummaryEnricher<F> {
    /// Create an enricher with an empty cache.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: SummaryCache::new(),
        }
    }

    /// The summary cache owned by this enricher.
    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    /// Summary for `title`, from the cache when present.
    ///
    /// On a miss the summary is fetched and stored under `title` before it is
    /// returned. Failed lookups are not cached.
    ///
    /// # Errors
    ///
    /// Propagates the fetcher's error on a cache miss.
    pub async fn summary(&self, title: &str) -> Result<Summary, DiscoveryError> {
        if let Some(cached) = self.cache.get(title).await {
            tracing::trace!(title, "summary cache hit");
            return Ok(cached);
        }

        tracing::trace!(title, "summary cache miss");
        let summary = self.fetcher.fetch_summary(title).await?;
        if summary.is_disambiguation() {
            tracing::debug!(title, "summary is a disambiguation page");
        }
        self.cache.insert(title, summary.clone()).await;
        Ok(summary)
    }

    /// Enrich one candidate, looking up its summary by the original title.
    ///
    /// # Errors
    ///
    /// Propagates the summary lookup error.
    pub async fn enrich(&self, candidate: &Candidate) -> Result<Candidate, DiscoveryError> {
        let summary = self.summary(&candidate.title).await?;
        Ok(candidate.with_summary(&summary))
    }

    /// Enrich every candidate with at most `max_concurrent` lookups in flight.
    ///
    /// Output order is completion order. Candidates whose lookup fails are
    /// left out; the length of the output relative to the input is the only
    /// success signal. A `max_concurrent` of zero is treated as one.
    pub async fn enrich_all(
        &self,
        candidates: Vec<Candidate>,
        max_concurrent: usize,
    ) -> Vec<Candidate> {
        let requested = candidates.len();

        let enriched: Vec<Candidate> = futures::stream::iter(candidates)
            .map(|candidate| async move {
                let outcome = self.enrich(&candidate).await;
                outcome.map_err(|err| (candidate.id, err))
            })
            .buffer_unordered(max_concurrent.max(1))
            .filter_map(|outcome| async move {
                match outcome {
                    Ok(candidate) => Some(candidate),
                    Err((id, err)) => {
                        tracing::debug!(%id, error = %err, "enrichment dropped candidate");
                        None
                    }
                }
            })
            .collect()
            .await;

        tracing::debug!(
            requested,
            enriched = enriched.len(),
            "enrichment finished"
        );
        enriched
    }
}
