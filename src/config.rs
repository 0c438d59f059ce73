//! Discovery configuration with sensible defaults.
//!
//! [`DiscoveryConfig`] controls where sources are queried, how much is fetched,
//! and how wide the enrichment fan-out runs. [`CurationPolicy`] holds the
//! ranking and filtering constants, all of which are tuned empirically and
//! can be overridden from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DiscoveryError, Result};

/// Default content API host.
pub const DEFAULT_API_BASE_URL: &str = "https://en.wikipedia.org";
/// Per-source result cap.
pub const DEFAULT_SOURCE_RESULT_LIMIT: u32 = 50;
/// Enrichment operations allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENT_ENRICHMENTS: usize = 8;
/// Per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
/// Identifying agent sent when no override is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("nearby-search/", env!("CARGO_PKG_VERSION"));

/// Shortest extract, in characters, that survives curation.
pub const DEFAULT_MIN_EXTRACT_CHARS: usize = 280;
/// Extract length beyond which no further score credit is given.
pub const DEFAULT_EXTRACT_CHAR_CAP: usize = 1200;
/// Score credit per extract character.
pub const DEFAULT_EXTRACT_WEIGHT: f64 = 0.1;
/// Score credit for having a thumbnail.
pub const DEFAULT_THUMBNAIL_BOOST: f64 = 200.0;
/// Distance assumed when a candidate has none.
pub const DEFAULT_MISSING_DISTANCE_SENTINEL: f64 = 999_999.0;
/// Maximum number of curated results returned.
pub const DEFAULT_MAX_RESULTS: usize = 30;
/// Titles containing this marker are excluded.
pub const DEFAULT_EXCLUDED_TITLE_MARKER: &str = "(disambiguation)";

/// Highest result cap the search API accepts per request.
const MAX_SOURCE_RESULT_LIMIT: u32 = 500;

/// Configuration for a discovery pipeline.
///
/// Use [`Default::default()`] for sensible defaults, or load a partial TOML
/// document with [`DiscoveryConfig::from_toml_str`]; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Scheme and host of the content API, e.g. `https://en.wikipedia.org`.
    pub api_base_url: String,
    /// Result cap sent to each source.
    pub source_result_limit: u32,
    /// Enrichment operations allowed in flight at once.
    pub max_concurrent_enrichments: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent. If `None`, [`DEFAULT_USER_AGENT`] is sent.
    pub user_agent: Option<String>,
    /// Filtering and ranking constants.
    pub curation: CurationPolicy,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            source_result_limit: DEFAULT_SOURCE_RESULT_LIMIT,
            max_concurrent_enrichments: DEFAULT_MAX_CONCURRENT_ENRICHMENTS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: None,
            curation: CurationPolicy::default(),
        }
    }
}

/// Curation filter and score constants.
///
/// `score = distance - thumbnail_boost - min(extract_len, extract_char_cap) * extract_weight`,
/// lower is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationPolicy {
    /// Shortest extract, in characters, that survives curation.
    pub min_extract_chars: usize,
    /// Extract length beyond which no further score credit is given.
    pub extract_char_cap: usize,
    /// Score credit per extract character.
    pub extract_weight: f64,
    /// Score credit for having a thumbnail.
    pub thumbnail_boost: f64,
    /// Distance assumed when a candidate has none.
    pub missing_distance_sentinel: f64,
    /// Maximum number of curated results returned.
    pub max_results: usize,
    /// Titles containing this marker are excluded.
    pub excluded_title_marker: String,
}

impl Default for CurationPolicy {
    fn default() -> Self {
        Self {
            min_extract_chars: DEFAULT_MIN_EXTRACT_CHARS,
            extract_char_cap: DEFAULT_EXTRACT_CHAR_CAP,
            extract_weight: DEFAULT_EXTRACT_WEIGHT,
            thumbnail_boost: DEFAULT_THUMBNAIL_BOOST,
            missing_distance_sentinel: DEFAULT_MISSING_DISTANCE_SENTINEL,
            max_results: DEFAULT_MAX_RESULTS,
            excluded_title_marker: DEFAULT_EXCLUDED_TITLE_MARKER.to_owned(),
        }
    }
}

impl DiscoveryConfig {
    /// Parse a TOML document, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Config`] if the document is not valid TOML
    /// or does not validate.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| DiscoveryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Config`] if the file cannot be read, parsed,
    /// or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DiscoveryError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parsed API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Config`] if `api_base_url` is not an absolute
    /// http(s) URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| DiscoveryError::Config(format!("api_base_url is invalid: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DiscoveryError::Config(
                "api_base_url must use http or https".into(),
            ));
        }
        Ok(url)
    }

    /// The User-Agent header value to send.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `api_base_url` is an absolute http(s) URL
    /// - `source_result_limit` is between 1 and 500
    /// - `max_concurrent_enrichments` and `timeout_seconds` are greater than 0
    /// - the curation policy is valid
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.source_result_limit == 0 || self.source_result_limit > MAX_SOURCE_RESULT_LIMIT {
            return Err(DiscoveryError::Config(format!(
                "source_result_limit must be between 1 and {MAX_SOURCE_RESULT_LIMIT}"
            )));
        }
        if self.max_concurrent_enrichments == 0 {
            return Err(DiscoveryError::Config(
                "max_concurrent_enrichments must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(DiscoveryError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        self.curation.validate()
    }
}

impl CurationPolicy {
    /// Validates the policy constants.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(DiscoveryError::Config(
                "curation.max_results must be greater than 0".into(),
            ));
        }
        for (name, value) in [
            ("extract_weight", self.extract_weight),
            ("thumbnail_boost", self.thumbnail_boost),
            ("missing_distance_sentinel", self.missing_distance_sentinel),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DiscoveryError::Config(format!(
                    "curation.{name} must be a finite, non-negative number"
                )));
            }
        }
        Ok(())
    }
}
