//! Shared HTTP client for source and summary requests.
//!
//! One [`reqwest::Client`] is built per discovery pipeline and cloned into
//! each client so connections are pooled across the fan-out.

use std::time::Duration;

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;

/// Maximum redirects followed (summary titles often redirect once).
const MAX_REDIRECTS: usize = 5;

/// Build a [`reqwest::Client`] configured for the content API.
///
/// The client has:
/// - Timeout from config
/// - Identifying User-Agent (custom if configured)
/// - Gzip decompression
/// - A small redirect limit
///
/// # Errors
///
/// Returns [`DiscoveryError::Http`] if the client cannot be constructed.
pub fn build_client(config: &DiscoveryConfig) -> Result<reqwest::Client, DiscoveryError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| DiscoveryError::Http(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        let config = DiscoveryConfig::default();
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = DiscoveryConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }
}
