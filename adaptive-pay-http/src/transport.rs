//! Authenticated HTTPS POST transport.
//!
//! One [`Transport`] is built per client from the validated [`Config`]: the
//! authentication and format headers are assembled once (a value that is not
//! a legal header byte sequence fails construction, not the call), and every
//! request reuses the same `reqwest::Client`. Responses are buffered in full
//! before being handed to the classifier; nothing is streamed to the caller.

use adaptive_pay::Config;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, redirect};
use serde_json::Value;

#[cfg(feature = "telemetry")]
use tracing::debug;

use crate::error::ApiError;

/// `X-PAYPAL-SECURITY-USERID` request header.
pub const SECURITY_USERID: HeaderName = HeaderName::from_static("x-paypal-security-userid");

/// `X-PAYPAL-SECURITY-PASSWORD` request header.
pub const SECURITY_PASSWORD: HeaderName = HeaderName::from_static("x-paypal-security-password");

/// `X-PAYPAL-SECURITY-SIGNATURE` request header.
pub const SECURITY_SIGNATURE: HeaderName = HeaderName::from_static("x-paypal-security-signature");

/// `X-PAYPAL-APPLICATION-ID` request header.
pub const APPLICATION_ID: HeaderName = HeaderName::from_static("x-paypal-application-id");

/// `X-PAYPAL-REQUEST-DATA-FORMAT` request header.
pub const REQUEST_DATA_FORMAT: HeaderName = HeaderName::from_static("x-paypal-request-data-format");

/// `X-PAYPAL-RESPONSE-DATA-FORMAT` request header.
pub const RESPONSE_DATA_FORMAT: HeaderName =
    HeaderName::from_static("x-paypal-response-data-format");

/// `X-PAYPAL-SANDBOX-EMAIL-ADDRESS` request header.
pub const SANDBOX_EMAIL_ADDRESS: HeaderName =
    HeaderName::from_static("x-paypal-sandbox-email-address");

/// `X-PAYPAL-DEVICE-IPADDRESS` request header.
pub const DEVICE_IPADDRESS: HeaderName = HeaderName::from_static("x-paypal-device-ipaddress");

/// Issues authenticated POSTs to the environment-selected API host.
pub struct Transport {
    http: reqwest::Client,
    headers: HeaderMap,
    base_url: String,
}

impl Transport {
    /// Builds the transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Header`] when a configured value cannot be sent
    /// as an HTTP header, or [`ApiError::Transport`] when the underlying
    /// HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let headers = build_headers(config)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            http,
            headers,
            base_url: config.base_url().to_owned(),
        })
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs `payload` as JSON to `{base_url}/{path}` and buffers the whole
    /// response body.
    ///
    /// The status code is returned untouched alongside the raw body;
    /// classification is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error on any connection-level
    /// failure (DNS, TLS, reset, timeout) or while reading the body.
    pub async fn post(
        &self,
        path: &str,
        payload: &Value,
    ) -> Result<(StatusCode, String), reqwest::Error> {
        let url = format!("{}/{}", self.base_url, path);

        #[cfg(feature = "telemetry")]
        debug!(%url, "issuing api request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        #[cfg(feature = "telemetry")]
        debug!(status = status.as_u16(), bytes = body.len(), "api response buffered");

        Ok((status, body))
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn build_headers(config: &Config) -> Result<HeaderMap, ApiError> {
    let credentials = config.credentials();

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(SECURITY_USERID, HeaderValue::from_str(&credentials.user_id)?);
    headers.insert(SECURITY_PASSWORD, HeaderValue::from_str(&credentials.password)?);
    headers.insert(SECURITY_SIGNATURE, HeaderValue::from_str(&credentials.signature)?);
    headers.insert(APPLICATION_ID, HeaderValue::from_str(config.app_id())?);
    headers.insert(REQUEST_DATA_FORMAT, HeaderValue::from_str(config.request_format())?);
    headers.insert(RESPONSE_DATA_FORMAT, HeaderValue::from_str(config.response_format())?);

    if let Some(email) = config.sandbox_email_address() {
        headers.insert(SANDBOX_EMAIL_ADDRESS, HeaderValue::from_str(email)?);
    }
    if let Some(ip) = config.device_ip_address() {
        headers.insert(DEVICE_IPADDRESS, HeaderValue::from_str(ip)?);
    }

    Ok(headers)
}
