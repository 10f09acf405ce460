//! Settings domain types and validation.
//!
//! These are pure domain types; reading them from the environment is the
//! only I/O this module does.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::image::{DEFAULT_IMAGE_QUALITY, ImageHosts};

/// Storage bucket holding uploaded images.
pub const DEFAULT_ASSET_BUCKET: &str = "mark_images";

/// Upper bound on one catalog fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Default `SQLite` database file.
pub const DEFAULT_DATABASE_PATH: &str = "folio.db";

/// Default resize-capable image host.
pub const DEFAULT_IMAGE_HOST: &str = "supabase.co";

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the hosted REST backend.
    pub backend_url: Option<String>,

    /// API key sent to the hosted backend.
    pub api_key: Option<String>,

    /// Bucket uploaded images go to.
    pub asset_bucket: Option<String>,

    /// Path of the local `SQLite` database.
    pub database_path: Option<String>,

    /// URL prefix under which locally stored assets are served.
    pub public_asset_base: Option<String>,

    /// Host suffixes that accept resize query parameters.
    pub image_hosts: Option<Vec<String>>,

    /// Default image quality hint (1-100).
    pub default_image_quality: Option<u8>,

    /// Catalog fetch timeout in seconds (1-300).
    pub fetch_timeout_secs: Option<u64>,

    /// Admin console password. Unset locks the console.
    #[serde(skip_serializing)]
    pub admin_password: Option<String>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            backend_url: None,
            api_key: None,
            asset_bucket: Some(DEFAULT_ASSET_BUCKET.to_string()),
            database_path: Some(DEFAULT_DATABASE_PATH.to_string()),
            public_asset_base: None,
            image_hosts: Some(vec![DEFAULT_IMAGE_HOST.to_string()]),
            default_image_quality: Some(DEFAULT_IMAGE_QUALITY),
            fetch_timeout_secs: Some(DEFAULT_FETCH_TIMEOUT_SECS),
            admin_password: None,
        }
    }

    /// Read `FOLIO_*` environment variables on top of the defaults.
    ///
    /// Unparseable numeric values are ignored so that `validate_settings`
    /// reports on what was actually applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::with_defaults();

        if let Some(url) = get("FOLIO_BACKEND_URL") {
            settings.backend_url = Some(url.trim_end_matches('/').to_string());
        }
        if let Some(key) = get("FOLIO_API_KEY") {
            settings.api_key = Some(key);
        }
        if let Some(bucket) = get("FOLIO_ASSET_BUCKET") {
            settings.asset_bucket = Some(bucket);
        }
        if let Some(path) = get("FOLIO_DATABASE_PATH") {
            settings.database_path = Some(path);
        }
        if let Some(base) = get("FOLIO_PUBLIC_ASSET_BASE") {
            settings.public_asset_base = Some(base);
        }
        if let Some(hosts) = get("FOLIO_IMAGE_HOSTS") {
            settings.image_hosts = Some(
                hosts
                    .split(',')
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .map(ToString::to_string)
                    .collect(),
            );
        }
        if let Some(quality) = get("FOLIO_IMAGE_QUALITY").and_then(|q| q.trim().parse().ok()) {
            settings.default_image_quality = Some(quality);
        }
        if let Some(secs) = get("FOLIO_FETCH_TIMEOUT_SECS").and_then(|s| s.trim().parse().ok()) {
            settings.fetch_timeout_secs = Some(secs);
        }
        if let Some(password) = get("FOLIO_ADMIN_PASSWORD") {
            settings.admin_password = Some(password);
        }
        settings
    }

    /// Get the effective catalog fetch timeout (with default fallback).
    #[must_use]
    pub fn effective_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    /// Get the effective image quality hint (with default fallback).
    #[must_use]
    pub fn effective_image_quality(&self) -> u8 {
        self.default_image_quality.unwrap_or(DEFAULT_IMAGE_QUALITY)
    }

    /// Get the effective asset bucket (with default fallback).
    #[must_use]
    pub fn effective_asset_bucket(&self) -> &str {
        self.asset_bucket.as_deref().unwrap_or(DEFAULT_ASSET_BUCKET)
    }

    /// Get the effective database path (with default fallback).
    #[must_use]
    pub fn effective_database_path(&self) -> &str {
        self.database_path.as_deref().unwrap_or(DEFAULT_DATABASE_PATH)
    }

    /// Resize-capable image hosts.
    #[must_use]
    pub fn image_hosts(&self) -> ImageHosts {
        self.image_hosts
            .as_ref()
            .map_or_else(ImageHosts::default, |hosts| ImageHosts::new(hosts))
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref url) = other.backend_url {
            self.backend_url.clone_from(url);
        }
        if let Some(ref key) = other.api_key {
            self.api_key.clone_from(key);
        }
        if let Some(ref bucket) = other.asset_bucket {
            self.asset_bucket.clone_from(bucket);
        }
        if let Some(ref path) = other.database_path {
            self.database_path.clone_from(path);
        }
        if let Some(ref base) = other.public_asset_base {
            self.public_asset_base.clone_from(base);
        }
        if let Some(ref hosts) = other.image_hosts {
            self.image_hosts.clone_from(hosts);
        }
        if let Some(quality) = other.default_image_quality {
            self.default_image_quality = quality;
        }
        if let Some(secs) = other.fetch_timeout_secs {
            self.fetch_timeout_secs = secs;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub backend_url: Option<Option<String>>,
    pub api_key: Option<Option<String>>,
    pub asset_bucket: Option<Option<String>>,
    pub database_path: Option<Option<String>>,
    pub public_asset_base: Option<Option<String>>,
    pub image_hosts: Option<Option<Vec<String>>>,
    pub default_image_quality: Option<Option<u8>>,
    pub fetch_timeout_secs: Option<Option<u64>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Image quality must be between 1 and 100, got {0}")]
    InvalidImageQuality(u8),

    #[error("Fetch timeout must be between 1 and 300 seconds, got {0}")]
    InvalidFetchTimeout(u64),

    #[error("Backend URL must start with http:// or https://, got '{0}'")]
    InvalidBackendUrl(String),

    #[error("Asset bucket cannot be empty")]
    EmptyAssetBucket,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(quality) = settings.default_image_quality {
        if !(1..=100).contains(&quality) {
            return Err(SettingsError::InvalidImageQuality(quality));
        }
    }

    if let Some(secs) = settings.fetch_timeout_secs {
        if !(1..=300).contains(&secs) {
            return Err(SettingsError::InvalidFetchTimeout(secs));
        }
    }

    if let Some(ref url) = settings.backend_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingsError::InvalidBackendUrl(url.clone()));
        }
    }

    if let Some(ref bucket) = settings.asset_bucket {
        if bucket.trim().is_empty() {
            return Err(SettingsError::EmptyAssetBucket);
        }
    }

    Ok(())
}
