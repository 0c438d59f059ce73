//! Candidate source implementations.
//!
//! Each module provides a struct implementing [`crate::source::SourceClient`]
//! against the MediaWiki action API.

pub mod geosearch;
pub mod nearcoord;

pub use geosearch::GeoSearchClient;
pub use nearcoord::NearCoordClient;

use url::Url;

/// Path of the MediaWiki action API below the configured host.
const ACTION_API_PATH: &str = "/w/api.php";

/// Action API endpoint for a base URL such as `https://en.wikipedia.org`.
pub(crate) fn action_api_url(base: &Url) -> Url {
    let mut endpoint = base.clone();
    endpoint.set_path(ACTION_API_PATH);
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    endpoint
}
