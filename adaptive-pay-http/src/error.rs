//! The unified error type for client calls.

use adaptive_pay::{ConfigError, ResponseError};
use reqwest::header::InvalidHeaderValue;
use serde_json::Value;

/// Everything that can go wrong constructing the client or making a call.
///
/// Transport failures (no HTTP exchange completed) and application failures
/// (the provider answered, unfavorably) stay distinct variants so neither
/// layer can mask the other. Variants that carry a provider body expose it
/// through [`response_body`](Self::response_body).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Configuration rejected at construction time.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A configured credential or header value contains bytes that are not
    /// legal in an HTTP header. Construction-time, never per-call.
    #[error("config value is not a legal header value")]
    Header(#[from] InvalidHeaderValue),

    /// An operation-specific required field is missing. Returned before any
    /// network I/O.
    #[error("required {0}")]
    Validation(&'static str),

    /// Connection-level failure (DNS, TLS, reset, timeout). No HTTP status
    /// is available.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered; the response classified as a failure.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl ApiError {
    /// The HTTP status of the provider's answer, when one was received.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Response(err) => Some(err.http_status()),
            _ => None,
        }
    }

    /// The parsed provider body attached to the failure, when available.
    ///
    /// Provider error bodies often carry actionable detail; `httpStatusCode`
    /// is already injected into them.
    #[must_use]
    pub const fn response_body(&self) -> Option<&Value> {
        match self {
            Self::Response(err) => err.body(),
            _ => None,
        }
    }
}
