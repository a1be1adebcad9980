//! Sundrift Commerce API client.
//!
//! # Architecture
//!
//! - Plain-HTTP JSON client built on `reqwest`
//! - The API is the source of truth for products and orders - no local
//!   sync, direct calls with in-memory caching via `moka` (5 minute TTL)
//! - Bearer-token auth for every server-side request
//!
//! # Example
//!
//! ```rust,ignore
//! use sundrift_storefront::api::CommerceClient;
//!
//! let client = CommerceClient::new(&config.commerce);
//!
//! // Get a product
//! let product = client.get_product("ridgeline-daypack").await?;
//!
//! // Submit an order assembled by the checkout wizard
//! let order = client.submit_order(&order_request).await?;
//! ```

mod client;
pub mod types;

pub use client::CommerceClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the Commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("API returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// JSON decoding of a response body failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("ridgeline-daypack".to_string());
        assert_eq!(err.to_string(), "Not found: ridgeline-daypack");

        let err = ApiError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            message: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "API returned 502 Bad Gateway: upstream down");
    }
}
