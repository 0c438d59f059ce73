//! Core types for discovered articles, their provenance, and page summaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A geographic position in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinate {
    /// Deterministic coordinate handed in by a location provider that has no
    /// fix (Times Square, New York).
    pub const FALLBACK: Self = Self::new(40.7580, -73.9855);

    /// Create a coordinate from latitude and longitude in degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Which source produced a candidate.
///
/// Provenance only decides merge precedence; it never feeds into ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Geo-radius search: geotagged pages with coordinate and distance.
    GeoSearch,
    /// Keyword near-coordinate search: title matches only, best effort.
    NearCoordSearch,
}

impl SourceKind {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GeoSearch => "geo search",
            Self::NearCoordSearch => "near-coordinate search",
        }
    }

    /// Whether a failure of this source fails the whole discovery run.
    ///
    /// Non-authoritative sources degrade to an empty result set instead.
    pub fn is_authoritative(&self) -> bool {
        matches!(self, Self::GeoSearch)
    }

    /// Returns all source variants in merge precedence order.
    pub fn all() -> &'static [SourceKind] {
        &[Self::GeoSearch, Self::NearCoordSearch]
    }

    /// Merge rank: position in [`SourceKind::all`], lower wins ties.
    pub fn precedence(&self) -> usize {
        Self::all()
            .iter()
            .position(|kind| kind == self)
            .unwrap_or(usize::MAX)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A discovered article, before or after enrichment.
///
/// Candidates are never mutated once built: enrichment and distance
/// backfill go through [`Candidate::with_summary`] and
/// [`Candidate::with_distance`], which return new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable page identity; the merge key.
    pub id: String,
    /// Display title; also the summary lookup key.
    pub title: String,
    /// Distance from the query coordinate, when known.
    pub distance_meters: Option<f64>,
    /// Descriptive text from the page summary.
    pub extract: Option<String>,
    /// Absolute URL of the page thumbnail.
    pub thumbnail_url: Option<String>,
    /// Absolute URL of the canonical page.
    pub page_url: Option<String>,
    /// Page location, when the source supplies one.
    pub coordinate: Option<Coordinate>,
    /// Which source produced this candidate.
    pub source: SourceKind,
    /// Page view count, when popularity data is available.
    pub pageviews: Option<u64>,
}

impl Candidate {
    /// A geo search hit: always located, usually with a distance.
    pub fn geo_search(
        id: impl Into<String>,
        title: impl Into<String>,
        coordinate: Coordinate,
        distance_meters: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            distance_meters,
            extract: None,
            thumbnail_url: None,
            page_url: None,
            coordinate: Some(coordinate),
            source: SourceKind::GeoSearch,
            pageviews: None,
        }
    }

    /// A near-coordinate search hit: identity only.
    pub fn near_coord(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            distance_meters: None,
            extract: None,
            thumbnail_url: None,
            page_url: None,
            coordinate: None,
            source: SourceKind::NearCoordSearch,
            pageviews: None,
        }
    }

    /// Combine this candidate with a fetched summary.
    ///
    /// Identity, location, provenance, and popularity are kept; the summary's
    /// title replaces the candidate's. Links that are not absolute URLs are
    /// dropped.
    pub fn with_summary(&self, summary: &Summary) -> Self {
        Self {
            id: self.id.clone(),
            title: summary.title.clone(),
            distance_meters: self.distance_meters,
            extract: summary.extract.clone(),
            thumbnail_url: summary.thumbnail_url().and_then(absolute_url),
            page_url: summary.page_url().and_then(absolute_url),
            coordinate: self.coordinate,
            source: self.source,
            pageviews: self.pageviews,
        }
    }

    /// Return a copy carrying `distance_meters`.
    ///
    /// A distance that is already present is never replaced.
    pub fn with_distance(&self, distance_meters: f64) -> Self {
        Self {
            distance_meters: self.distance_meters.or(Some(distance_meters)),
            ..self.clone()
        }
    }

    /// Length of the extract in characters, zero when absent.
    pub fn extract_len(&self) -> usize {
        self.extract.as_deref().map_or(0, |e| e.chars().count())
    }

    /// Whether a thumbnail link is present.
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail_url.is_some()
    }
}

fn absolute_url(raw: &str) -> Option<String> {
    Url::parse(raw).ok().map(String::from)
}

/// Descriptive metadata for a page, as returned by the summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Canonical display title.
    pub title: String,
    /// Plain-text lead extract.
    #[serde(default)]
    pub extract: Option<String>,
    /// Thumbnail image reference.
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    /// Canonical page links.
    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
    /// Page type, e.g. `"standard"` or `"disambiguation"`.
    #[serde(default, rename = "type")]
    pub page_type: Option<String>,
    /// Short description line.
    #[serde(default)]
    pub description: Option<String>,
}

/// Thumbnail reference inside a [`Summary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    /// Image URL.
    pub source: String,
}

/// Canonical links inside a [`Summary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentUrls {
    /// Desktop site links.
    pub desktop: PageLinks,
}

/// Links for one site flavour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Article URL.
    pub page: String,
}

impl Summary {
    /// Build a summary with only a title and extract.
    pub fn new(title: impl Into<String>, extract: Option<String>) -> Self {
        Self {
            title: title.into(),
            extract,
            thumbnail: None,
            content_urls: None,
            page_type: None,
            description: None,
        }
    }

    /// Thumbnail URL, if the summary has one.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail.as_ref().map(|t| t.source.as_str())
    }

    /// Canonical desktop page URL, if the summary has one.
    pub fn page_url(&self) -> Option<&str> {
        self.content_urls.as_ref().map(|c| c.desktop.page.as_str())
    }

    /// Whether this summary describes a disambiguation page.
    pub fn is_disambiguation(&self) -> bool {
        self.page_type.as_deref() == Some("disambiguation")
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains("disambiguation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_summary() -> Summary {
        Summary {
            title: "Flatiron Building".into(),
            extract: Some("A triangular landmark.".into()),
            thumbnail: Some(Thumbnail {
                source: "https://upload.example.org/flatiron.jpg".into(),
            }),
            content_urls: Some(ContentUrls {
                desktop: PageLinks {
                    page: "https://en.wikipedia.org/wiki/Flatiron_Building".into(),
                },
            }),
            page_type: Some("standard".into()),
            description: Some("Building in Manhattan".into()),
        }
    }

    #[test]
    fn fallback_coordinate_is_times_square() {
        assert!((Coordinate::FALLBACK.latitude - 40.7580).abs() < f64::EPSILON);
        assert!((Coordinate::FALLBACK.longitude + 73.9855).abs() < f64::EPSILON);
    }

    #[test]
    fn only_geo_search_is_authoritative() {
        assert!(SourceKind::GeoSearch.is_authoritative());
        assert!(!SourceKind::NearCoordSearch.is_authoritative());
    }

    #[test]
    fn source_kinds_listed_in_precedence_order() {
        assert_eq!(
            SourceKind::all(),
            &[SourceKind::GeoSearch, SourceKind::NearCoordSearch]
        );
    }

    #[test]
    fn precedence_follows_listing_order() {
        assert!(SourceKind::GeoSearch.precedence() < SourceKind::NearCoordSearch.precedence());
        for (rank, kind) in SourceKind::all().iter().enumerate() {
            assert_eq!(kind.precedence(), rank);
        }
    }

    #[test]
    fn source_kind_serializes_snake_case() {
        let json = serde_json::to_string(&SourceKind::NearCoordSearch).expect("serialize");
        assert_eq!(json, "\"near_coord_search\"");
    }

    #[test]
    fn geo_search_candidate_is_located() {
        let c = Candidate::geo_search("1", "Pier 17", Coordinate::new(40.7, -74.0), Some(12.5));
        assert_eq!(c.source, SourceKind::GeoSearch);
        assert!(c.coordinate.is_some());
        assert_eq!(c.distance_meters, Some(12.5));
    }

    #[test]
    fn near_coord_candidate_has_no_location() {
        let c = Candidate::near_coord("2", "Bryant Park");
        assert_eq!(c.source, SourceKind::NearCoordSearch);
        assert!(c.coordinate.is_none());
        assert!(c.distance_meters.is_none());
    }

    #[test]
    fn with_summary_takes_title_and_keeps_identity() {
        let original = Candidate::geo_search(
            "42",
            "Flatiron_Building",
            Coordinate::new(40.7411, -73.9897),
            Some(80.0),
        );
        let enriched = original.with_summary(&full_summary());

        assert_eq!(enriched.id, "42");
        assert_eq!(enriched.title, "Flatiron Building");
        assert_eq!(enriched.distance_meters, Some(80.0));
        assert_eq!(enriched.coordinate, original.coordinate);
        assert_eq!(enriched.source, SourceKind::GeoSearch);
        assert_eq!(enriched.extract.as_deref(), Some("A triangular landmark."));
        assert!(enriched.has_thumbnail());
        assert_eq!(
            enriched.page_url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Flatiron_Building")
        );
        // The source record is untouched.
        assert!(original.extract.is_none());
    }

    #[test]
    fn with_summary_drops_relative_links() {
        let mut summary = full_summary();
        summary.thumbnail = Some(Thumbnail {
            source: "//upload.example.org/x.jpg".into(),
        });
        let enriched = Candidate::near_coord("1", "x").with_summary(&summary);
        assert!(enriched.thumbnail_url.is_none());
        assert!(enriched.page_url.is_some());
    }

    #[test]
    fn with_distance_fills_absence_only() {
        let bare = Candidate::near_coord("1", "x");
        assert_eq!(bare.with_distance(250.0).distance_meters, Some(250.0));

        let located = Candidate::geo_search("2", "y", Coordinate::new(0.0, 0.0), Some(10.0));
        assert_eq!(located.with_distance(999.0).distance_meters, Some(10.0));
    }

    #[test]
    fn extract_len_counts_characters() {
        let mut c = Candidate::near_coord("1", "Café");
        assert_eq!(c.extract_len(), 0);
        c.extract = Some("né".into());
        assert_eq!(c.extract_len(), 2);
    }

    #[test]
    fn disambiguation_detected_by_type() {
        let mut s = Summary::new("Mercury", None);
        s.page_type = Some("disambiguation".into());
        assert!(s.is_disambiguation());
    }

    #[test]
    fn disambiguation_detected_by_description() {
        let mut s = Summary::new("Mercury", None);
        s.description = Some("Topics referred to by the same term (Disambiguation)".into());
        assert!(s.is_disambiguation());
        assert!(!full_summary().is_disambiguation());
    }

    #[test]
    fn summary_decodes_rest_payload() {
        let json = r#"{
            "type": "standard",
            "title": "Bryant Park",
            "description": "Public park in Manhattan",
            "extract": "Bryant Park is a 9.6-acre public park.",
            "thumbnail": {"source": "https://upload.example.org/bp.jpg", "width": 320, "height": 213},
            "content_urls": {
                "desktop": {"page": "https://en.wikipedia.org/wiki/Bryant_Park"},
                "mobile": {"page": "https://en.m.wikipedia.org/wiki/Bryant_Park"}
            }
        }"#;
        let summary: Summary = serde_json::from_str(json).expect("decode");
        assert_eq!(summary.title, "Bryant Park");
        assert_eq!(
            summary.thumbnail_url(),
            Some("https://upload.example.org/bp.jpg")
        );
        assert_eq!(
            summary.page_url(),
            Some("https://en.wikipedia.org/wiki/Bryant_Park")
        );
        assert!(!summary.is_disambiguation());
    }

    #[test]
    fn summary_decodes_with_only_title() {
        let summary: Summary = serde_json::from_str(r#"{"title": "Stub"}"#).expect("decode");
        assert!(summary.extract.is_none());
        assert!(summary.thumbnail_url().is_none());
        assert!(summary.page_url().is_none());
    }
}
