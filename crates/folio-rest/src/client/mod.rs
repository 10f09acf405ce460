//! REST client for the hosted catalog backend.

mod catalog;
mod storage;
mod timeline;

use std::sync::Arc;

use folio_core::Repos;
use url::Url;

use crate::config::RestClientConfig;
use crate::error::{RestError, RestResult};
use crate::http::{HttpBackend, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default REST client using the reqwest HTTP backend.
pub type DefaultRestClient = RestClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the hosted tables and object storage.
///
/// Generic over an HTTP backend for testing; production code uses
/// [`DefaultRestClient`] through the core port traits.
pub struct RestClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
    pub(crate) bucket: String,
}

impl DefaultRestClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &RestClientConfig) -> RestResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self {
            backend,
            base_url,
            bucket: config.bucket.clone(),
        })
    }
}

impl<B: HttpBackend> RestClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, bucket: &str, backend: B) -> Self {
        Self {
            backend,
            base_url: parse_base_url(base_url).unwrap(),
            bucket: bucket.to_string(),
        }
    }
}

/// Parse and check the configured base URL.
fn parse_base_url(raw: &str) -> RestResult<Url> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(RestError::InvalidResponse {
            message: format!("backend URL must be http(s): {raw}"),
        });
    }
    Ok(url)
}

/// Build port implementations backed by one shared client.
pub fn build_repos(config: &RestClientConfig) -> RestResult<Repos> {
    let client = Arc::new(DefaultRestClient::new(config)?);
    Ok(Repos::new(client.clone(), client.clone(), client))
}
