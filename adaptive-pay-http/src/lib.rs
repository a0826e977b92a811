#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport and client for the PayPal Adaptive Payments /
//! Adaptive Accounts APIs.
//!
//! [`AdaptiveClient`] wraps the pure pipeline from the `adaptive-pay` crate
//! with a `reqwest`-based transport: it seeds and merges the request payload,
//! POSTs it with the authentication headers to the environment-selected host,
//! and classifies the buffered response. Bespoke operations (`pay`,
//! `preapproval`, lookups) add their validation and redirect URL enrichment
//! on top of the same table-driven dispatch every catalog operation uses.
//!
//! # Example
//!
//! ```no_run
//! use adaptive_pay::{Config, Operation};
//! use adaptive_pay_http::AdaptiveClient;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), adaptive_pay_http::ApiError> {
//! let config = Config::builder()
//!     .user_id("caller_api1.example.com")
//!     .password("secret")
//!     .signature("A6kM0mvjB0")
//!     .sandbox()
//!     .build()?;
//! let client = AdaptiveClient::new(config)?;
//!
//! let result = client
//!     .pay(json!({
//!         "actionType": "PAY",
//!         "currencyCode": "USD",
//!         "receiverList": {
//!             "receiver": [{ "email": "seller@example.com", "amount": "10.00" }]
//!         },
//!         "returnUrl": "https://example.com/return",
//!         "cancelUrl": "https://example.com/cancel"
//!     }))
//!     .await?;
//! println!("approve at {}", result["paymentApprovalUrl"]);
//!
//! // Catalog operations go through the generic dispatch.
//! let plans = client
//!     .call(Operation::GetFundingPlans, json!({ "payKey": result["payKey"] }))
//!     .await?;
//! # let _ = plans;
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables `tracing` events in the transport
//!
//! # Modules
//!
//! - [`client`] - The per-operation client façade
//! - [`error`] - The unified call error type
//! - [`transport`] - Authenticated HTTPS POST with buffered responses

pub mod client;
pub mod error;
pub mod transport;

pub use client::AdaptiveClient;
pub use error::ApiError;
pub use transport::Transport;
