//! Response classification.
//!
//! Turns the raw `(status, body)` pair read off the wire into the SDK's
//! success/failure contract. Two layers are inspected in order: the HTTP
//! status first, then the provider's `responseEnvelope.ack` code. A `2xx`
//! status never implies business success, and a failing ack never hides the
//! status — `httpStatusCode` is injected into the parsed body on every path
//! so callers can always read it uniformly.

use serde_json::{Value, json};

use crate::envelope::Ack;
use crate::error::ResponseError;

/// Key injected into every parsed body.
pub const HTTP_STATUS_KEY: &str = "httpStatusCode";

/// Classifies a buffered provider response.
///
/// On success the returned value is exactly the parsed provider body plus
/// the injected `httpStatusCode` field.
///
/// # Errors
///
/// - [`ResponseError::Malformed`] when the body is not valid JSON, is not a
///   JSON object, or lacks a string `responseEnvelope.ack` field on a `2xx`
///   response;
/// - [`ResponseError::HttpStatus`] when the status is outside `[200, 300)`
///   (the ack is not inspected on this path);
/// - [`ResponseError::Application`] when the status is `2xx` but the ack is
///   neither `Success` nor `SuccessWithWarning`. The error message carries
///   the literal ack value and the error owns the full body.
pub fn classify(status: u16, raw: &str) -> Result<Value, ResponseError> {
    let mut body: Value = serde_json::from_str(raw).map_err(|source| ResponseError::Malformed {
        status,
        raw: raw.to_owned(),
        source: Some(source),
    })?;

    let Some(object) = body.as_object_mut() else {
        return Err(ResponseError::Malformed {
            status,
            raw: raw.to_owned(),
            source: None,
        });
    };
    object.insert(HTTP_STATUS_KEY.to_owned(), json!(status));

    if !(200..300).contains(&status) {
        return Err(ResponseError::HttpStatus { status, body });
    }

    let ack = match body
        .get("responseEnvelope")
        .and_then(|envelope| envelope.get("ack"))
        .and_then(Value::as_str)
    {
        Some(ack) => ack.to_owned(),
        None => {
            return Err(ResponseError::Malformed {
                status,
                raw: raw.to_owned(),
                source: None,
            });
        }
    };

    if Ack::from(ack.clone()).is_success() {
        Ok(body)
    } else {
        Err(ResponseError::Application { ack, status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(ack: &str) -> String {
        json!({
            "responseEnvelope": {
                "timestamp": "2013-05-20T11:23:13.339-07:00",
                "ack": ack,
                "correlationId": "56c0b50e0c39c",
                "build": "5710487"
            },
            "payKey": "AP-3TY011106S4428730"
        })
        .to_string()
    }

    #[test]
    fn success_ack_returns_body_with_status_injected() {
        let result = classify(200, &body("Success")).unwrap();
        assert_eq!(result[HTTP_STATUS_KEY], json!(200));
        assert_eq!(result["payKey"], json!("AP-3TY011106S4428730"));
    }

    #[test]
    fn success_with_warning_is_success() {
        assert!(classify(200, &body("SuccessWithWarning")).is_ok());
    }

    #[test]
    fn success_body_is_unchanged_apart_from_status() {
        let raw = body("Success");
        let mut expected: Value = serde_json::from_str(&raw).unwrap();
        expected[HTTP_STATUS_KEY] = json!(200);
        assert_eq!(classify(200, &raw).unwrap(), expected);
    }

    #[test]
    fn foreign_ack_at_200_is_an_application_error_with_body() {
        let err = classify(200, &body("Failure")).unwrap_err();
        assert!(err.to_string().contains("Failure"));
        assert_eq!(err.http_status(), 200);
        let body = err.body().unwrap();
        assert_eq!(body[HTTP_STATUS_KEY], json!(200));
        assert_eq!(body["payKey"], json!("AP-3TY011106S4428730"));
    }

    #[test]
    fn ack_match_is_exact_and_case_sensitive() {
        assert!(classify(200, &body("success")).is_err());
        assert!(classify(200, &body("SuccessWithWarnings")).is_err());
    }

    #[test]
    fn non_2xx_fails_without_ack_inspection() {
        // ack says Success, status says otherwise: the status wins
        let err = classify(400, &body("Success")).unwrap_err();
        assert!(matches!(err, ResponseError::HttpStatus { status: 400, .. }));
        assert!(err.to_string().contains("400"));
        assert_eq!(err.body().unwrap()[HTTP_STATUS_KEY], json!(400));
    }

    #[test]
    fn server_error_carries_status_and_body() {
        let err = classify(500, &body("Failure")).unwrap_err();
        assert_eq!(err.http_status(), 500);
        assert!(matches!(err, ResponseError::HttpStatus { .. }));
    }

    #[test]
    fn unparsable_body_is_malformed() {
        let err = classify(200, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ResponseError::Malformed { status: 200, .. }));
        assert_eq!(err.raw_body(), Some("<html>Bad Gateway</html>"));
        assert!(err.body().is_none());
    }

    #[test]
    fn unparsable_body_keeps_error_status() {
        let err = classify(502, "upstream connect error").unwrap_err();
        assert_eq!(err.http_status(), 502);
    }

    #[test]
    fn non_object_body_is_malformed() {
        let err = classify(200, "\"ok\"").unwrap_err();
        assert!(matches!(err, ResponseError::Malformed { .. }));
    }

    #[test]
    fn missing_ack_on_2xx_is_malformed() {
        let err = classify(200, r#"{"payKey": "ABC"}"#).unwrap_err();
        assert!(matches!(err, ResponseError::Malformed { status: 200, .. }));
    }
}
