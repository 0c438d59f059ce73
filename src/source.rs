//! Trait definitions for pluggable candidate sources and summary fetchers.
//!
//! The Wikipedia clients in [`crate::sources`] and [`crate::summary`]
//! implement these; tests and hosts can substitute their own.

use std::future::Future;

use crate::error::DiscoveryError;
use crate::types::{Candidate, Coordinate, SourceKind, Summary};

/// A geo-aware candidate source.
///
/// Each implementation handles its own:
///
/// - URL construction with coordinate and radius encoding
/// - HTTP request and response decoding
/// - Mapping hits into [`Candidate`] records tagged with [`SourceClient::kind`]
///
/// All implementations must be `Send + Sync` so both sources can be queried
/// concurrently.
pub trait SourceClient: Send + Sync {
    /// Fetch candidates within `radius_meters` of `coordinate`.
    ///
    /// `radius_meters` is a positive whole number of meters; unit conversion
    /// is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::SourceUnavailable`] if the source cannot be
    /// reached or its payload cannot be read. Whether that fails the run is
    /// decided by [`SourceKind::is_authoritative`].
    fn fetch(
        &self,
        coordinate: Coordinate,
        radius_meters: u32,
    ) -> impl Future<Output = Result<Vec<Candidate>, DiscoveryError>> + Send;

    /// Which [`SourceKind`] this implementation represents.
    fn kind(&self) -> SourceKind;
}

/// Fetches descriptive metadata for a single page title.
pub trait SummaryFetcher: Send + Sync {
    /// Fetch the summary for `title`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::SummaryUnavailable`] when the page has no
    /// summary (deleted, missing, or unresolvable) and
    /// [`DiscoveryError::Parse`] when the payload cannot be decoded.
    fn fetch_summary(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Summary, DiscoveryError>> + Send;
}
