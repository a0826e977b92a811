//! Request and response envelopes shared by every Adaptive API operation.
//!
//! Every request body carries a `requestEnvelope` object and every response
//! body carries a `responseEnvelope` object. The response envelope's `ack`
//! field is the provider's business-level outcome, independent of the HTTP
//! status code.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// The `requestEnvelope` object sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// RFC 3066 language for error messages.
    pub error_language: String,
    /// How much detail the response should carry.
    pub detail_level: String,
}

impl Default for RequestEnvelope {
    fn default() -> Self {
        Self {
            error_language: "en_US".to_owned(),
            detail_level: "ReturnAll".to_owned(),
        }
    }
}

/// The skeleton every outgoing payload is seeded with before the caller's
/// data is merged over it.
#[must_use]
pub fn default_payload() -> Value {
    json!({ "requestEnvelope": RequestEnvelope::default() })
}

/// The provider's business-level acknowledgement code.
///
/// Only [`Success`](Ack::Success) and
/// [`SuccessWithWarning`](Ack::SuccessWithWarning) classify as success; the
/// match is exact and case-sensitive, so any other value (including casing
/// variants) is a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ack {
    /// The operation succeeded.
    Success,
    /// The operation succeeded but the response carries warnings.
    SuccessWithWarning,
    /// The operation failed.
    Failure,
    /// The operation failed and the response carries warnings.
    FailureWithWarning,
    /// Any acknowledgement value not covered above.
    Other(String),
}

impl Ack {
    /// Whether this acknowledgement classifies the call as a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::SuccessWithWarning)
    }
}

impl From<String> for Ack {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Success" => Self::Success,
            "SuccessWithWarning" => Self::SuccessWithWarning,
            "Failure" => Self::Failure,
            "FailureWithWarning" => Self::FailureWithWarning,
            _ => Self::Other(value),
        }
    }
}

impl From<Ack> for String {
    fn from(ack: Ack) -> Self {
        ack.to_string()
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::SuccessWithWarning => f.write_str("SuccessWithWarning"),
            Self::Failure => f.write_str("Failure"),
            Self::FailureWithWarning => f.write_str("FailureWithWarning"),
            Self::Other(value) => f.write_str(value),
        }
    }
}

/// The `responseEnvelope` object present in every response body.
///
/// Unknown provider fields are ignored; everything but `ack` is optional in
/// practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// When the provider processed the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Business-level outcome of the call.
    pub ack: Ack,

    /// Provider-issued id for support correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    /// Provider build number that served the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}
