//! Internal error types for REST backend operations.
//!
//! These errors are mapped to core port errors at the boundary.

use thiserror::Error;

/// Result type alias for REST backend operations.
pub type RestResult<T> = Result<T, RestError>;

/// Errors related to REST backend operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// Request failed with an HTTP error status.
    #[error("Backend request failed with status {status} for {url}: {message}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Error body returned by the backend, if any
        message: String,
    },

    /// The addressed row does not exist.
    #[error("{what} not found")]
    NotFound {
        /// Description of the missing row
        what: String,
    },

    /// Backend returned an invalid or unexpected response.
    #[error("Invalid response from backend: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The request did not complete in time.
    #[error("Request timed out: {url}")]
    Timeout {
        /// The URL that was requested
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_failed_error_message() {
        let error = RestError::ApiRequestFailed {
            status: 409,
            url: "https://abc.supabase.co/rest/v1/portfolio".to_string(),
            message: "duplicate key".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("409"));
        assert!(msg.contains("/rest/v1/portfolio"));
        assert!(msg.contains("duplicate key"));
    }

    #[test]
    fn test_not_found_error_message() {
        let error = RestError::NotFound {
            what: "Catalog item 42".to_string(),
        };
        assert_eq!(error.to_string(), "Catalog item 42 not found");
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let error: RestError = err.into();
        assert!(matches!(error, RestError::JsonParse(_)));
    }
}
