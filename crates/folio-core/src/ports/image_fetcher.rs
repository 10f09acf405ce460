//! Image fetcher port used by the image load helper.

use async_trait::async_trait;
use thiserror::Error;

/// Why an image could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageFetchError {
    /// The host answered with a non-success status.
    #[error("Image request failed with status {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The response was not an image.
    #[error("Not an image ({content_type}): {url}")]
    NotAnImage {
        /// Reported content type
        content_type: String,
        /// The URL that was requested
        url: String,
    },

    /// Network or transport error.
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not finish in time.
    #[error("Timed out loading {0}")]
    Timeout(String),
}

/// Loads a remote image so that it can be shown.
///
/// Implementations only need to confirm the asset is retrievable; the
/// helper never inspects pixel data.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<(), ImageFetchError>;
}
