//! Error types for the nearby-search crate.
//!
//! A discovery run that starts fails only with [`DiscoveryError::NoLocation`]
//! or [`DiscoveryError::DiscoveryFailed`]. [`DiscoveryError::Config`] is a
//! precondition error: an invalid configuration or a zero radius is rejected
//! before any source is queried. The remaining variants come from individual
//! clients and are absorbed by the pipeline (optional source outages,
//! per-title summary misses) or surface from construction.

/// Errors that can occur while discovering nearby articles.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Discovery was requested without a coordinate.
    #[error("no location available")]
    NoLocation,

    /// The authoritative geo search source failed, so no result set exists.
    #[error("failed to fetch articles: {0}")]
    DiscoveryFailed(String),

    /// A source client could not be reached or returned an unreadable payload.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// No summary could be fetched for a title.
    #[error("summary unavailable: {0}")]
    SummaryUnavailable(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid configuration or input outside the accepted domain.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for nearby-search results.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
