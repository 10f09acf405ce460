//! Client for a hosted PostgREST-style backend with object storage.
//!
//! Implements the catalog, timeline and asset ports from `folio-core`
//! against the `portfolio` and `portfolio_timeline` tables and an image
//! bucket, and provides an HTTP [`ImageFetcher`](folio_core::ImageFetcher).

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultRestClient is meant to be used through the core port traits, not
// its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod endpoints;
mod error;
mod http;
mod image;
mod port;
mod wire;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultRestClient, build_repos};

// Configuration
pub use config::RestClientConfig;

// Errors
pub use error::{RestError, RestResult};

// Image loading
pub use image::ReqwestImageFetcher;
