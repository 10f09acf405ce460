//! HTTP image fetcher used by the image load helper.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{ImageFetchError, ImageFetcher};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::RestResult;

/// Loads images over HTTP and checks that the response is an image.
#[derive(Clone)]
pub struct ReqwestImageFetcher {
    client: reqwest::Client,
}

impl ReqwestImageFetcher {
    pub fn new(timeout: Duration) -> RestResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio-rest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

fn map_transport_error(e: &reqwest::Error, url: &str) -> ImageFetchError {
    if e.is_timeout() {
        ImageFetchError::Timeout(url.to_string())
    } else {
        ImageFetchError::Network(e.to_string())
    }
}

/// Accept `image/*` and responses that do not declare a type.
fn is_image_type(content_type: Option<&str>) -> bool {
    content_type.is_none_or(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
}

#[async_trait]
impl ImageFetcher for ReqwestImageFetcher {
    async fn fetch(&self, url: &str) -> Result<(), ImageFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_error(&e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        if !is_image_type(content_type.as_deref()) {
            return Err(ImageFetchError::NotAnImage {
                content_type: content_type.unwrap_or_default(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_transport_error(&e, url))?;
        debug!(url, size = bytes.len(), "Image loaded");
        Ok(())
    }
}
