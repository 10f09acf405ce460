//! HTTP backend abstraction for the REST client.
//!
//! The client talks to a small trait so tests can swap in canned responses.
//! The production implementation uses reqwest. Reads can opt in to retries
//! with exponential backoff; none are made by default.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::RestClientConfig;
use crate::error::{RestError, RestResult};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Bytes { bytes: Vec<u8>, content_type: String },
}

/// One request against the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: Method,
    pub url: Url,
    pub body: Body,
}

impl RestRequest {
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            body: Body::Empty,
        }
    }

    pub const fn post_json(url: Url, body: Value) -> Self {
        Self {
            method: Method::Post,
            url,
            body: Body::Json(body),
        }
    }

    pub const fn patch_json(url: Url, body: Value) -> Self {
        Self {
            method: Method::Patch,
            url,
            body: Body::Json(body),
        }
    }

    pub const fn delete(url: Url) -> Self {
        Self {
            method: Method::Delete,
            url,
            body: Body::Empty,
        }
    }

    pub fn upload(url: Url, bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url,
            body: Body::Bytes {
                bytes,
                content_type: content_type.into(),
            },
        }
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that execute requests and return JSON.
///
/// An empty response body is returned as `Value::Null`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn execute(&self, request: RestRequest) -> RestResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Largest backoff doubling applied to the base delay.
const MAX_BACKOFF_SHIFT: u32 = 6;

/// Delay before retry number `attempt` (1-based).
fn backoff_delay(base: Duration, attempt: u8) -> Duration {
    let shift = u32::from(attempt.saturating_sub(1)).min(MAX_BACKOFF_SHIFT);
    base.saturating_mul(1 << shift)
}

/// Production HTTP backend using reqwest with retry logic.
///
/// Only GET requests are retried, on 5xx responses and network errors, and
/// only when `max_retries` is raised above its default of 0.
pub struct ReqwestBackend {
    client: reqwest::Client,
    api_key: Option<String>,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &RestClientConfig) -> RestResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    /// Build a request with authentication headers and body.
    fn build_request(&self, request: &RestRequest) -> reqwest::RequestBuilder {
        let url = request.url.as_str();
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        };

        if let Some(ref key) = self.api_key {
            builder = builder.header("apikey", key).bearer_auth(key);
        }
        if request.method != Method::Get {
            // Writes answer with the affected rows
            builder = builder.header("Prefer", "return=representation");
        }

        match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Bytes {
                bytes,
                content_type,
            } => builder
                .header(CONTENT_TYPE, content_type.as_str())
                .body(bytes.clone()),
        }
    }

    fn map_send_error(e: reqwest::Error, url: &Url) -> RestError {
        if e.is_timeout() {
            RestError::Timeout {
                url: url.to_string(),
            }
        } else {
            e.into()
        }
    }

    /// Send a request, retrying transient failures for reads.
    async fn send_with_retry(&self, request: &RestRequest) -> RestResult<reqwest::Response> {
        let retries = if request.method == Method::Get {
            self.max_retries
        } else {
            0
        };

        let mut attempt: u8 = 0;
        loop {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base_delay, attempt);
                debug!(url = %request.url, attempt, ?delay, "Retrying request");
                tokio::time::sleep(delay).await;
            }

            match self.build_request(request).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < retries {
                        attempt += 1;
                        continue;
                    }

                    let message = response.text().await.unwrap_or_default();
                    return Err(RestError::ApiRequestFailed {
                        status: status.as_u16(),
                        url: request.url.to_string(),
                        message,
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < retries && !e.is_builder() {
                        attempt += 1;
                        continue;
                    }
                    return Err(Self::map_send_error(e, &request.url));
                }
            }
        }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: RestRequest) -> RestResult<Value> {
        let response = self.send_with_retry(&request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| Self::map_send_error(e, &request.url))?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Canned outcome: a JSON body or an error status.
    #[derive(Clone)]
    pub enum CannedResponse {
        Json(Value),
        Status(u16),
    }

    /// A fake HTTP backend that returns canned responses and records
    /// every request it sees.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Mutex<Vec<(Method, String, CannedResponse)>>,
        requests: Mutex<Vec<RestRequest>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer requests with `method` whose URL contains `url_contains`.
        pub fn with_response(
            self,
            method: Method,
            url_contains: &str,
            response: CannedResponse,
        ) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push((method, url_contains.to_string(), response));
            self
        }

        pub fn requests(&self) -> Vec<RestRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn find_response(&self, request: &RestRequest) -> Option<CannedResponse> {
            let url = request.url.as_str();
            self.responses
                .lock()
                .unwrap()
                .iter()
                .find(|(method, pattern, _)| *method == request.method && url.contains(pattern))
                .map(|(_, _, response)| response.clone())
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn execute(&self, request: RestRequest) -> RestResult<Value> {
            let response = self.find_response(&request);
            let url = request.url.to_string();
            self.requests.lock().unwrap().push(request);

            match response {
                Some(CannedResponse::Json(json)) => Ok(json),
                Some(CannedResponse::Status(status)) => Err(RestError::ApiRequestFailed {
                    status,
                    url,
                    message: String::new(),
                }),
                None => Err(RestError::ApiRequestFailed {
                    status: 404,
                    url,
                    message: "no canned response".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::client::DefaultRestClient;
    use folio_core::Category;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = RestClientConfig::new("https://abc.supabase.co").with_api_key("k");
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.max_retries, 0);
        assert_eq!(backend.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_write_requests_ask_for_representation() {
        let backend = ReqwestBackend::new(&RestClientConfig::default()).unwrap();
        let url = Url::parse("https://abc.supabase.co/rest/v1/portfolio").unwrap();

        let post = backend
            .build_request(&RestRequest::post_json(url.clone(), json!({})))
            .build()
            .unwrap();
        assert_eq!(post.headers()["Prefer"], "return=representation");

        let get = backend.build_request(&RestRequest::get(url)).build().unwrap();
        assert!(get.headers().get("Prefer").is_none());
    }

    #[test]
    fn test_upload_sets_content_type() {
        let backend = ReqwestBackend::new(&RestClientConfig::default()).unwrap();
        let url = Url::parse("https://abc.supabase.co/storage/v1/object/b/x.png").unwrap();
        let request = backend
            .build_request(&RestRequest::upload(url, vec![1, 2], "image/png"))
            .build()
            .unwrap();
        assert_eq!(request.headers()[CONTENT_TYPE], "image/png");
        assert_eq!(*request.method(), reqwest::Method::POST);
    }

    #[test]
    fn test_fake_backend_matches_method_and_url() {
        let backend = FakeBackend::new()
            .with_response(Method::Get, "portfolio", CannedResponse::Json(json!([1])))
            .with_response(Method::Delete, "portfolio", CannedResponse::Status(500));
        let url = Url::parse("https://example.com/rest/v1/portfolio").unwrap();

        let value = tokio_test::block_on(backend.execute(RestRequest::get(url.clone()))).unwrap();
        assert_eq!(value, json!([1]));

        let err = tokio_test::block_on(backend.execute(RestRequest::delete(url))).unwrap_err();
        assert!(matches!(err, RestError::ApiRequestFailed { status: 500, .. }));
        assert_eq!(backend.requests().len(), 2);
    }

    #[test]
    fn test_backoff_delay_is_bounded() {
        let base = Duration::from_millis(250);
        assert_eq!(backoff_delay(base, 1), base);
        assert_eq!(backoff_delay(base, 2), Duration::from_millis(500));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, u8::MAX), base * 64);
    }

    /// Serve `503` to every connection and count how many arrive.
    async fn unavailable_server() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 4\r\nConnection: close\r\n\r\ndown",
                    )
                    .await;
                let _ = socket.shutdown().await;
            }
        });
        (format!("http://{addr}"), hits)
    }

    #[tokio::test]
    async fn test_catalog_read_is_not_retried_by_default() {
        let (base_url, hits) = unavailable_server().await;
        let client = DefaultRestClient::new(&RestClientConfig::new(base_url)).unwrap();

        let err = client.list_items(Category::Inventory).await.unwrap_err();
        assert!(matches!(err, RestError::ApiRequestFailed { status: 503, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_opt_in_retries_reads() {
        let (base_url, hits) = unavailable_server().await;
        let url = Url::parse(&format!("{base_url}/rest/v1/portfolio")).unwrap();
        let config = RestClientConfig::new(base_url)
            .with_max_retries(2)
            .with_retry_delay(Duration::from_millis(1));
        let backend = ReqwestBackend::new(&config).unwrap();

        let err = backend.execute(RestRequest::get(url)).await.unwrap_err();
        assert!(matches!(err, RestError::ApiRequestFailed { status: 503, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
