//! Catalog request errors.

use thiserror::Error;

/// Failure of a single catalog call. Endpoints are recorded without the API key.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered with something other than HTTP 200.
    #[error("catalog returned HTTP {status} for {endpoint}")]
    Status { status: u32, endpoint: String },

    /// Curl could not complete the request (DNS, connect, TLS, timeout).
    #[error("catalog request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: curl::Error,
    },

    /// HTTP 200 but the body was not the expected JSON.
    #[error("could not decode catalog response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog URL")]
    InvalidUrl(#[from] url::ParseError),
}

impl CatalogError {
    /// HTTP status carried by [`CatalogError::Status`].
    pub fn status(&self) -> Option<u32> {
        match self {
            CatalogError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
