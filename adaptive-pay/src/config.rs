//! Client configuration for the Adaptive Payments APIs.
//!
//! Configuration is resolved once, up front: [`ConfigBuilder::build`] merges
//! caller-supplied values over the provider's fixed defaults and fails fast on
//! anything the API would reject on every call (missing credentials, missing
//! application id outside the sandbox, unparsable endpoint override). The
//! resulting [`Config`] is immutable and is shared by every request the
//! client makes.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// The provider's global application id, valid for any sandbox account.
pub const SANDBOX_APP_ID: &str = "APP-80W284485P519543T";

/// Default request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which of the provider's two environments requests are routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live environment (`svcs.paypal.com`). Requires a real application id.
    #[default]
    Production,
    /// Test environment (`svcs.sandbox.paypal.com`).
    Sandbox,
}

impl Environment {
    /// Returns `true` for the sandbox environment.
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }
}

/// The three security credentials sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API caller id (`X-PAYPAL-SECURITY-USERID`).
    pub user_id: String,
    /// API password (`X-PAYPAL-SECURITY-PASSWORD`).
    pub password: String,
    /// API signature (`X-PAYPAL-SECURITY-SIGNATURE`).
    pub signature: String,
}

/// Per-environment base URLs and redirect URL templates.
///
/// The templates carry a `%s` placeholder that the client substitutes with
/// the provider-issued key (`payKey` or `preapprovalKey`) when building the
/// end-user redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Production API base URL.
    pub production_url: String,
    /// Sandbox API base URL.
    pub sandbox_url: String,
    /// Production payment approval redirect template.
    pub approval_url: String,
    /// Sandbox payment approval redirect template.
    pub sandbox_approval_url: String,
    /// Production preapproval redirect template.
    pub preapproval_url: String,
    /// Sandbox preapproval redirect template.
    pub sandbox_preapproval_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            production_url: "https://svcs.paypal.com".to_owned(),
            sandbox_url: "https://svcs.sandbox.paypal.com".to_owned(),
            approval_url: "https://www.paypal.com/cgi-bin/webscr?cmd=_ap-payment&paykey=%s"
                .to_owned(),
            sandbox_approval_url:
                "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_ap-payment&paykey=%s"
                    .to_owned(),
            preapproval_url: "https://www.paypal.com/webscr?cmd=_ap-preapproval&preapprovalkey=%s"
                .to_owned(),
            sandbox_preapproval_url:
                "https://www.sandbox.paypal.com/webscr?cmd=_ap-preapproval&preapprovalkey=%s"
                    .to_owned(),
        }
    }
}

/// Immutable, validated client configuration.
///
/// Constructed through [`Config::builder`]; reused unchanged across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    credentials: Credentials,
    app_id: String,
    environment: Environment,
    endpoints: Endpoints,
    request_format: String,
    response_format: String,
    sandbox_email_address: Option<String>,
    device_ip_address: Option<String>,
    timeout: Duration,
}

impl Config {
    /// Starts building a configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The security credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The application id sent as `X-PAYPAL-APPLICATION-ID`.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// The configured environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns `true` when routing to the sandbox.
    #[must_use]
    pub const fn is_sandbox(&self) -> bool {
        self.environment.is_sandbox()
    }

    /// API base URL for the configured environment, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        let url = match self.environment {
            Environment::Production => &self.endpoints.production_url,
            Environment::Sandbox => &self.endpoints.sandbox_url,
        };
        url.trim_end_matches('/')
    }

    /// Payment approval redirect template for the configured environment.
    #[must_use]
    pub fn approval_template(&self) -> &str {
        match self.environment {
            Environment::Production => &self.endpoints.approval_url,
            Environment::Sandbox => &self.endpoints.sandbox_approval_url,
        }
    }

    /// Preapproval redirect template for the configured environment.
    #[must_use]
    pub fn preapproval_template(&self) -> &str {
        match self.environment {
            Environment::Production => &self.endpoints.preapproval_url,
            Environment::Sandbox => &self.endpoints.sandbox_preapproval_url,
        }
    }

    /// Wire format announced in `X-PAYPAL-REQUEST-DATA-FORMAT`.
    #[must_use]
    pub fn request_format(&self) -> &str {
        &self.request_format
    }

    /// Wire format announced in `X-PAYPAL-RESPONSE-DATA-FORMAT`.
    #[must_use]
    pub fn response_format(&self) -> &str {
        &self.response_format
    }

    /// Optional `X-PAYPAL-SANDBOX-EMAIL-ADDRESS` header value.
    #[must_use]
    pub fn sandbox_email_address(&self) -> Option<&str> {
        self.sandbox_email_address.as_deref()
    }

    /// Optional `X-PAYPAL-DEVICE-IPADDRESS` header value.
    #[must_use]
    pub fn device_ip_address(&self) -> Option<&str> {
        self.device_ip_address.as_deref()
    }

    /// Request timeout applied by the transport.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builder for [`Config`].
///
/// All validation happens in [`build`](Self::build); setters never fail.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    user_id: Option<String>,
    password: Option<String>,
    signature: Option<String>,
    app_id: Option<String>,
    environment: Environment,
    endpoints: Endpoints,
    request_format: Option<String>,
    response_format: Option<String>,
    sandbox_email_address: Option<String>,
    device_ip_address: Option<String>,
    timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Sets the API caller id.
    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets the API password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the API signature.
    #[must_use]
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Sets the application id. Required outside the sandbox; inside the
    /// sandbox it defaults to [`SANDBOX_APP_ID`].
    #[must_use]
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Selects the target environment.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Routes requests to the sandbox. Shorthand for
    /// `environment(Environment::Sandbox)`.
    #[must_use]
    pub const fn sandbox(self) -> Self {
        self.environment(Environment::Sandbox)
    }

    /// Overrides the per-environment URLs and redirect templates.
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Overrides the request wire format header value.
    #[must_use]
    pub fn request_format(mut self, format: impl Into<String>) -> Self {
        self.request_format = Some(format.into());
        self
    }

    /// Overrides the response wire format header value.
    #[must_use]
    pub fn response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = Some(format.into());
        self
    }

    /// Sets the `X-PAYPAL-SANDBOX-EMAIL-ADDRESS` header.
    #[must_use]
    pub fn sandbox_email_address(mut self, email: impl Into<String>) -> Self {
        self.sandbox_email_address = Some(email.into());
        self
    }

    /// Sets the `X-PAYPAL-DEVICE-IPADDRESS` header.
    #[must_use]
    pub fn device_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.device_ip_address = Some(ip.into());
        self
    }

    /// Sets the request timeout (default 30 seconds).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validates and produces the immutable [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a credential field is missing or empty,
    /// when no application id is set outside the sandbox, or when an
    /// endpoint base URL override does not parse.
    pub fn build(self) -> Result<Config, ConfigError> {
        let user_id = require(self.user_id, "userId")?;
        let password = require(self.password, "password")?;
        let signature = require(self.signature, "signature")?;

        let app_id = match self.app_id {
            Some(id) if !id.is_empty() => id,
            _ if self.environment.is_sandbox() => SANDBOX_APP_ID.to_owned(),
            _ => return Err(ConfigError::MissingAppId),
        };

        check_url("productionUrl", &self.endpoints.production_url)?;
        check_url("sandboxUrl", &self.endpoints.sandbox_url)?;

        Ok(Config {
            credentials: Credentials {
                user_id,
                password,
                signature,
            },
            app_id,
            environment: self.environment,
            endpoints: self.endpoints,
            request_format: self.request_format.unwrap_or_else(|| "JSON".to_owned()),
            response_format: self.response_format.unwrap_or_else(|| "JSON".to_owned()),
            sandbox_email_address: self.sandbox_email_address,
            device_ip_address: self.device_ip_address,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

fn require(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(field)),
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl { field, source })?;
    Ok(())
}
