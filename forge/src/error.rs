//! Errors returned by forge lookups and downloads.

use reqwest::StatusCode;

/// Everything that can go wrong while talking to the forge.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// The request never produced a response (DNS, TLS, connection reset, body decode).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The forge answered 404 for the named resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("GET {url} returned {status}")]
    Status { url: String, status: u16 },

    /// The base URL or token could not be used to build a request.
    #[error("invalid client setup: {0}")]
    InvalidSetup(String),
}

impl ForgeError {
    /// Map a non-success HTTP status for `url` to an error.
    pub fn from_status(url: &str, status: StatusCode) -> Self {
        if status == StatusCode::NOT_FOUND {
            ForgeError::NotFound(url.to_string())
        } else {
            ForgeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ForgeError::NotFound(_))
    }
}
