//! The per-operation client façade.

use adaptive_pay::{Config, Operation, classify, default_payload, merge};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::transport::Transport;

/// Client for the Adaptive Payments / Adaptive Accounts APIs.
///
/// Holds only the immutable [`Config`] and the shared transport, so a single
/// instance can be used concurrently from multiple tasks. Every call is one
/// outbound request and one buffered response; nothing is retried.
pub struct AdaptiveClient {
    config: Config,
    transport: Transport,
}

impl AdaptiveClient {
    /// Builds a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Header`] when a configured credential cannot be
    /// sent as an HTTP header, or [`ApiError::Transport`] when the HTTP
    /// client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let transport = Transport::new(&config)?;
        Ok(Self { config, transport })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Invokes any catalog operation: seeds the default `requestEnvelope`,
    /// merges the caller's `data` over it, POSTs, and classifies the
    /// response.
    ///
    /// On success the returned value is the parsed provider body with
    /// `httpStatusCode` injected.
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] on connection-level failure,
    /// [`ApiError::Response`] when the provider's answer classifies as a
    /// failure (malformed body, non-2xx status, or failing ack — the latter
    /// two still carry the body).
    pub async fn call(&self, operation: Operation, data: Value) -> Result<Value, ApiError> {
        let payload = merge(&default_payload(), &data);
        let (status, body) = self.transport.post(operation.path(), &payload).await?;
        Ok(classify(status.as_u16(), &body)?)
    }

    /// Creates a payment ([`Operation::Pay`]).
    ///
    /// When the provider reports `paymentExecStatus` of `CREATED`, the
    /// environment's approval template is expanded with the returned
    /// `payKey` and attached as `paymentApprovalUrl` — the URL the sender
    /// must visit to approve the payment. The enrichment is best-effort: a
    /// missing key or placeholder never fails an otherwise successful call.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call); errors from the wrapped call propagate
    /// unchanged.
    pub async fn pay(&self, data: Value) -> Result<Value, ApiError> {
        let mut body = self.call(Operation::Pay, data).await?;

        if body.get("paymentExecStatus").and_then(Value::as_str) == Some("CREATED") {
            let key = body.get("payKey").and_then(Value::as_str);
            if let Some(url) = expand_template(self.config.approval_template(), key) {
                if let Some(object) = body.as_object_mut() {
                    object.insert("paymentApprovalUrl".to_owned(), json!(url));
                }
            }
        }

        Ok(body)
    }

    /// Sets up a preapproval agreement ([`Operation::Preapproval`]).
    ///
    /// When the response carries a `preapprovalKey`, the environment's
    /// preapproval template is expanded with it and attached as
    /// `preapprovalUrl`. Best-effort, like [`pay`](Self::pay).
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn preapproval(&self, data: Value) -> Result<Value, ApiError> {
        let mut body = self.call(Operation::Preapproval, data).await?;

        let key = body.get("preapprovalKey").and_then(Value::as_str);
        if let Some(url) = expand_template(self.config.preapproval_template(), key) {
            if let Some(object) = body.as_object_mut() {
                object.insert("preapprovalUrl".to_owned(), json!(url));
            }
        }

        Ok(body)
    }

    /// Fetches the display options of a payment
    /// ([`Operation::GetPaymentOptions`]).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] without any I/O when `pay_key` is empty;
    /// otherwise same as [`call`](Self::call).
    pub async fn get_payment_options(&self, pay_key: &str) -> Result<Value, ApiError> {
        if pay_key.is_empty() {
            return Err(ApiError::Validation("payKey"));
        }
        self.call(Operation::GetPaymentOptions, json!({ "payKey": pay_key }))
            .await
    }

    /// Fetches the state of a payment ([`Operation::PaymentDetails`]).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] without any I/O when `params` carries none
    /// of `payKey`, `transactionId`, `trackingId`; otherwise same as
    /// [`call`](Self::call).
    pub async fn payment_details(&self, params: Value) -> Result<Value, ApiError> {
        require_lookup_key(&params)?;
        self.call(Operation::PaymentDetails, params).await
    }

    /// Refunds all or part of a payment ([`Operation::Refund`]).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] without any I/O when `params` carries none
    /// of `payKey`, `transactionId`, `trackingId`; otherwise same as
    /// [`call`](Self::call).
    pub async fn refund(&self, params: Value) -> Result<Value, ApiError> {
        require_lookup_key(&params)?;
        self.call(Operation::Refund, params).await
    }
}

impl std::fmt::Debug for AdaptiveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveClient")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

/// Lookup operations accept any one of these identifying keys.
const LOOKUP_KEYS: [&str; 3] = ["payKey", "transactionId", "trackingId"];

fn require_lookup_key(params: &Value) -> Result<(), ApiError> {
    // null and "" both count as absent
    let present = LOOKUP_KEYS.iter().any(|key| {
        params.get(key).is_some_and(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    });
    if present {
        Ok(())
    } else {
        Err(ApiError::Validation("payKey, transactionId or trackingId"))
    }
}

/// Substitutes `key` for the `%s` placeholder. `None` when either side of
/// the substitution is missing; enrichment is skipped, never failed.
fn expand_template(template: &str, key: Option<&str>) -> Option<String> {
    let key = key?;
    template
        .contains("%s")
        .then(|| template.replacen("%s", key, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adaptive_pay::Endpoints;
    use adaptive_pay::response::HTTP_STATUS_KEY;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sandbox_client(server: &MockServer) -> AdaptiveClient {
        let config = Config::builder()
            .user_id("caller_api1.example.com")
            .password("secret")
            .signature("A6kM0mvjB0")
            .sandbox()
            .endpoints(Endpoints {
                sandbox_url: server.uri(),
                ..Endpoints::default()
            })
            .build()
            .unwrap();
        AdaptiveClient::new(config).unwrap()
    }

    fn success_envelope() -> Value {
        json!({
            "timestamp": "2013-05-20T11:23:13.339-07:00",
            "ack": "Success",
            "correlationId": "56c0b50e0c39c",
            "build": "5710487"
        })
    }

    #[tokio::test]
    async fn pay_created_attaches_sandbox_approval_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptivePayments/Pay"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseEnvelope": success_envelope(),
                "payKey": "ABC",
                "paymentExecStatus": "CREATED"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        let result = client.pay(json!({ "actionType": "PAY" })).await.unwrap();

        assert_eq!(
            result["paymentApprovalUrl"],
            json!("https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_ap-payment&paykey=ABC")
        );
        assert_eq!(result[HTTP_STATUS_KEY], json!(200));
        assert_eq!(result["payKey"], json!("ABC"));
    }

    #[tokio::test]
    async fn pay_not_created_is_left_unenriched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptivePayments/Pay"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseEnvelope": success_envelope(),
                "payKey": "ABC",
                "paymentExecStatus": "COMPLETED"
            })))
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        let result = client.pay(json!({})).await.unwrap();
        assert!(result.get("paymentApprovalUrl").is_none());
    }

    #[tokio::test]
    async fn pay_created_without_pay_key_still_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptivePayments/Pay"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseEnvelope": success_envelope(),
                "paymentExecStatus": "CREATED"
            })))
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        let result = client.pay(json!({})).await.unwrap();
        assert!(result.get("paymentApprovalUrl").is_none());
        assert_eq!(result[HTTP_STATUS_KEY], json!(200));
    }

    #[tokio::test]
    async fn failed_ack_yields_error_and_body_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptivePayments/Pay"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseEnvelope": { "ack": "Failed" },
                "error": [{ "errorId": "580022", "message": "Invalid request parameter" }]
            })))
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        let err = client.pay(json!({})).await.unwrap_err();

        assert!(err.to_string().contains("Failed"));
        assert_eq!(err.http_status(), Some(200));
        let body = err.response_body().unwrap();
        assert_eq!(body[HTTP_STATUS_KEY], json!(200));
        assert_eq!(body["error"][0]["errorId"], json!("580022"));
    }

    #[tokio::test]
    async fn server_error_carries_status_without_ack_inspection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptivePayments/Preapproval"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "responseEnvelope": { "ack": "Success" }
            })))
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        let err = client.preapproval(json!({})).await.unwrap_err();
        assert_eq!(err.http_status(), Some(500));
        assert!(err.response_body().is_some());
    }

    #[tokio::test]
    async fn preapproval_attaches_preapproval_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptivePayments/Preapproval"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseEnvelope": success_envelope(),
                "preapprovalKey": "PA-1MX55014BE039073M"
            })))
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        let result = client.preapproval(json!({})).await.unwrap();
        assert_eq!(
            result["preapprovalUrl"],
            json!(
                "https://www.sandbox.paypal.com/webscr?cmd=_ap-preapproval&preapprovalkey=PA-1MX55014BE039073M"
            )
        );
    }

    #[tokio::test]
    async fn call_seeds_default_envelope_and_merges_caller_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptivePayments/ExecutePayment"))
            .and(body_partial_json(json!({
                "requestEnvelope": {
                    "errorLanguage": "en_US",
                    "detailLevel": "ReturnAll"
                },
                "payKey": "ABC"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseEnvelope": success_envelope()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        client
            .call(Operation::ExecutePayment, json!({ "payKey": "ABC" }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn caller_envelope_overrides_defaults_key_by_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptiveAccounts/GetVerifiedStatus"))
            .and(body_partial_json(json!({
                "requestEnvelope": {
                    "errorLanguage": "fr_FR",
                    "detailLevel": "ReturnAll"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseEnvelope": success_envelope()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        client
            .call(
                Operation::GetVerifiedStatus,
                json!({ "requestEnvelope": { "errorLanguage": "fr_FR" } }),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn lookup_operations_validate_before_any_io() {
        // nothing listens here; a network attempt would be a transport error
        let config = Config::builder()
            .user_id("u")
            .password("p")
            .signature("s")
            .sandbox()
            .endpoints(Endpoints {
                sandbox_url: "http://127.0.0.1:1".to_owned(),
                ..Endpoints::default()
            })
            .build()
            .unwrap();
        let client = AdaptiveClient::new(config).unwrap();

        for result in [
            client.payment_details(json!({})).await,
            client.payment_details(json!({ "payKey": "" })).await,
            client.payment_details(json!({ "transactionId": null })).await,
            client.refund(json!({ "unrelated": 1 })).await,
            client.refund(json!({ "trackingId": "" })).await,
            client.get_payment_options("").await,
        ] {
            match result {
                Err(ApiError::Validation(_)) => {}
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn lookup_accepts_any_identifying_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptivePayments/PaymentDetails"))
            .and(body_partial_json(json!({ "trackingId": "T-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseEnvelope": success_envelope(),
                "status": "COMPLETED"
            })))
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        let result = client
            .payment_details(json!({ "trackingId": "T-1" }))
            .await
            .unwrap();
        assert_eq!(result["status"], json!("COMPLETED"));
    }

    #[tokio::test]
    async fn refund_posts_to_refund_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AdaptivePayments/Refund"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseEnvelope": success_envelope(),
                "refundInfoList": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        client.refund(json!({ "payKey": "ABC" })).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_response_keeps_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
            .mount(&server)
            .await;

        let client = sandbox_client(&server);
        let err = client.pay(json!({})).await.unwrap_err();
        match err {
            ApiError::Response(response_err) => {
                assert_eq!(response_err.raw_body(), Some("<html>proxy</html>"));
                assert_eq!(response_err.http_status(), 200);
            }
            other => panic!("expected response error, got {other:?}"),
        }
    }

    #[test]
    fn expand_template_is_best_effort() {
        assert_eq!(
            expand_template("https://x/?key=%s", Some("ABC")),
            Some("https://x/?key=ABC".to_owned())
        );
        assert_eq!(expand_template("https://x/?key=%s", None), None);
        assert_eq!(expand_template("https://x/no-placeholder", Some("ABC")), None);
    }
}
