//! Public configuration for the REST client.

use std::time::Duration;

use folio_core::{DEFAULT_ASSET_BUCKET, Settings};

/// Configuration for the REST client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use folio_rest::RestClientConfig;
/// use std::time::Duration;
///
/// let config = RestClientConfig::new("https://abc.supabase.co")
///     .with_api_key("anon-key")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct RestClientConfig {
    /// Project base URL; REST and storage paths hang off it
    pub(crate) base_url: String,
    /// API key sent as `apikey` and bearer token
    pub(crate) api_key: Option<String>,
    /// Storage bucket for uploaded images
    pub(crate) bucket: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Retry attempts for transient read errors; catalog reads are not
    /// retried unless a caller opts in
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: None,
            bucket: DEFAULT_ASSET_BUCKET.to_string(),
            user_agent: concat!("folio-rest/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(15),
            max_retries: 0,
            retry_base_delay: Duration::from_millis(250),
        }
    }
}

impl RestClientConfig {
    /// Create a configuration for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Build a configuration from settings; `None` when no backend URL is set.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        settings.backend_url.as_ref().map(|url| {
            Self::new(url.clone())
                .with_optional_api_key(settings.api_key.clone())
                .with_bucket(settings.effective_asset_bucket())
                .with_timeout(settings.effective_fetch_timeout())
        })
    }

    /// Set the project base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional API key.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the storage bucket.
    ///
    /// Defaults to `mark_images`.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 15 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient read errors.
    ///
    /// Defaults to 0. Writes are never retried.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 250ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RestClientConfig::default();
        assert!(config.user_agent.starts_with("folio-rest/"));
        assert_eq!(config.bucket, "mark_images");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.api_key.is_none());
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RestClientConfig::new("https://abc.supabase.co")
            .with_api_key("secret")
            .with_bucket("uploads")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(60))
            .with_max_retries(3)
            .with_retry_delay(Duration::from_millis(10));

        assert_eq!(config.base_url, "https://abc.supabase.co");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.bucket, "uploads");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_from_settings() {
        assert!(RestClientConfig::from_settings(&Settings::with_defaults()).is_none());

        let settings = Settings {
            backend_url: Some("https://abc.supabase.co".into()),
            api_key: Some("anon".into()),
            fetch_timeout_secs: Some(5),
            ..Settings::with_defaults()
        };
        let config = RestClientConfig::from_settings(&settings).unwrap();
        assert_eq!(config.base_url, "https://abc.supabase.co");
        assert_eq!(config.api_key.as_deref(), Some("anon"));
        assert_eq!(config.bucket, "mark_images");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
