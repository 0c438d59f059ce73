//! In-memory summary cache keyed by the title a candidate was discovered under.
//!
//! Entries live as long as the owning enricher: no TTL, no capacity bound.
//! Uses [`moka`] for async-friendly access. Inserts are atomic per key, so a
//! cancelled run never leaves a partial entry.

use moka::future::Cache;

use crate::types::Summary;

/// Cache of fetched summaries, owned by one [`crate::enricher::SummaryEnricher`].
///
/// Cloning is cheap and yields a handle to the same entries.
#[derive(Clone)]
pub struct SummaryCache {
    entries: Cache<String, Summary>,
}

impl SummaryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().name("summaries").build(),
        }
    }

    /// Look up the summary cached for `title`.
    ///
    /// The key is the title as discovered, not the summary's canonical title.
    pub async fn get(&self, title: &str) -> Option<Summary> {
        self.entries.get(title).await
    }

    /// Store a summary under the title it was requested for.
    pub async fn insert(&self, title: &str, summary: Summary) {
        self.entries.insert(title.to_owned(), summary).await;
    }

    /// Whether a summary is cached for `title`.
    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// Number of cached summaries.
    ///
    /// Runs pending maintenance first so the count reflects recent inserts.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    /// Whether the cache holds no summaries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SummaryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
