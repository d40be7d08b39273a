//! Transport error type for the photo store client.
//!
//! Every failure talking to the photo service (network, HTTP status,
//! response decoding, bad base URL) is a [`TransportError`]. Callers treat
//! it as a single kind; the variants exist for logging and tests.

use reqwest::StatusCode;

use crate::constants::ERROR_BODY_EXCERPT;

/// Result type for photo store operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Failure communicating with the remote photo service.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Base URL or endpoint could not be formed.
    #[error("invalid service URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Request failed before a response arrived (DNS, connect, reset, timeout).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a status error, keeping only an excerpt of the body.
    pub fn status(url: impl Into<String>, status: StatusCode, body: &str) -> Self {
        Self::Status {
            url: url.into(),
            status,
            body: excerpt(body),
        }
    }

    /// HTTP status of the failed response, if the service answered at all.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the service reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }
}

fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= ERROR_BODY_EXCERPT {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(ERROR_BODY_EXCERPT).collect();
    cut.push_str("...");
    cut
}
