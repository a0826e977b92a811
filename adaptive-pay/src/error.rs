//! Error types for configuration and response classification.

use serde_json::Value;

/// Construction-time configuration failure.
///
/// Raised by [`ConfigBuilder::build`](crate::config::ConfigBuilder::build)
/// before any network call is possible.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required credential field is missing or empty.
    #[error("config must have {0}")]
    Missing(&'static str),

    /// No application id was supplied outside the sandbox.
    #[error("config must have appId outside the sandbox")]
    MissingAppId,

    /// An endpoint base URL override does not parse.
    #[error("invalid {field} endpoint")]
    InvalidUrl {
        /// Which endpoint field was rejected.
        field: &'static str,
        /// The underlying parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Failure classifying a provider response.
///
/// The provider layers a business-level acknowledgement on top of HTTP, and
/// its error bodies usually carry actionable detail, so every variant that
/// has a parsed body keeps it: callers get the best available diagnostic
/// payload even on the failure path.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// The body could not be parsed as the expected format, or does not
    /// carry the mandatory `responseEnvelope.ack` field.
    #[error("invalid JSON response received (status {status})")]
    Malformed {
        /// HTTP status of the response.
        status: u16,
        /// The unparsed response body.
        raw: String,
        /// Parse failure, when the body was not valid JSON at all.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// HTTP status outside `[200, 300)`. The acknowledgement code is never
    /// inspected on this path.
    #[error("response status: {status}")]
    HttpStatus {
        /// HTTP status of the response.
        status: u16,
        /// Parsed body with `httpStatusCode` injected.
        body: Value,
    },

    /// 2xx response whose acknowledgement code is neither `Success` nor
    /// `SuccessWithWarning`.
    #[error("response ack is {ack}. Check the response for more info")]
    Application {
        /// The literal acknowledgement value returned by the provider.
        ack: String,
        /// HTTP status of the response.
        status: u16,
        /// Parsed body with `httpStatusCode` injected.
        body: Value,
    },
}

impl ResponseError {
    /// The HTTP status the provider answered with.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Malformed { status, .. }
            | Self::HttpStatus { status, .. }
            | Self::Application { status, .. } => *status,
        }
    }

    /// The parsed response body, when one is available.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::HttpStatus { body, .. } | Self::Application { body, .. } => Some(body),
            Self::Malformed { .. } => None,
        }
    }

    /// The unparsed body, for responses that failed to parse.
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Malformed { raw, .. } => Some(raw),
            Self::HttpStatus { .. } | Self::Application { .. } => None,
        }
    }
}
