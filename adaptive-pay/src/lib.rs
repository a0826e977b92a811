#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the PayPal Adaptive Payments / Adaptive Accounts client SDK.
//!
//! This crate provides the transport-independent pieces of the SDK: validated
//! client configuration, request/response envelopes, the recursive payload
//! merge, the operation catalog, and the response classifier that turns a raw
//! HTTP status and body into a success/failure outcome. The HTTP transport and
//! the per-operation client façade live in the `adaptive-pay-http` crate.
//!
//! The Adaptive APIs layer a business-level acknowledgement code on top of
//! HTTP: a `2xx` response still carries a `responseEnvelope.ack` field that
//! decides whether the call actually succeeded. The classifier in [`response`]
//! keeps these two layers distinct so that neither can mask the other.
//!
//! # Modules
//!
//! - [`config`] - Credentials, environment routing, and endpoint defaults
//! - [`envelope`] - Request/response envelopes and the acknowledgement code
//! - [`error`] - Construction-time and classification error types
//! - [`merge`] - Recursive right-biased JSON payload merge
//! - [`ops`] - Catalog of remote operations and their wire paths
//! - [`response`] - HTTP-layer and application-layer response classification

pub mod config;
pub mod envelope;
pub mod error;
pub mod merge;
pub mod ops;
pub mod response;

pub use config::{Config, ConfigBuilder, Credentials, Endpoints, Environment};
pub use envelope::{Ack, RequestEnvelope, ResponseEnvelope, default_payload};
pub use error::{ConfigError, ResponseError};
pub use merge::merge;
pub use ops::Operation;
pub use response::classify;
