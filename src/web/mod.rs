use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::distributor::DistributorError;

/// W3C error code the distributor reports when no session could be started.
const SESSION_NOT_CREATED: &str = "session not created";

/// One outbound HTTP message. The path is relative to the distributor base
/// URL; the transport owns host resolution.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        HttpRequest {
            method,
            path: path.into(),
            body: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        HttpResponse { status, body }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Distributor responses wrap their payload under a `value` member:
/// `{"value": {...}}` on success, `{"value":{"error":...,"message":...}}`
/// on failure.
#[derive(Debug, Deserialize)]
struct ValueEnvelope {
    #[serde(default)]
    value: Value,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

/// Decode a distributor response into the expected value shape.
///
/// Success status: an empty body or a null `value` is void (`None`),
/// anything else deserializes to `T`. Failure status: a decodable error
/// envelope with the session-not-created code becomes the typed error;
/// everything else surfaces as a generic error carrying status and raw body.
pub fn interpret<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<Option<T>, DistributorError> {
    if !response.status.is_success() {
        return Err(error_from(response));
    }

    if response.body.is_empty() {
        return Ok(None);
    }
    let envelope: ValueEnvelope = serde_json::from_slice(&response.body)?;
    if envelope.value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(envelope.value)?))
}

fn error_from(response: &HttpResponse) -> DistributorError {
    if let Ok(envelope) = serde_json::from_slice::<ValueEnvelope>(&response.body) {
        if let Ok(detail) = serde_json::from_value::<ErrorDetail>(envelope.value) {
            if detail.error == SESSION_NOT_CREATED {
                return DistributorError::SessionNotCreated {
                    message: detail.message,
                };
            }
        }
    }
    DistributorError::UnexpectedStatus {
        status: response.status,
        body: response.text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Session;
    use serde_json::json;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(
            StatusCode::from_u16(status).unwrap(),
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_success_envelope_decodes_value() {
        let resp = response(200, r#"{"value":{"sessionId":"abc"}}"#);
        let session: Option<Session> = interpret(&resp).unwrap();
        assert_eq!(session.unwrap().id, "abc");
    }

    #[test]
    fn test_empty_body_is_void() {
        let resp = response(200, "");
        let decoded: Option<Value> = interpret(&resp).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_null_value_is_void() {
        let resp = response(200, r#"{"value":null}"#);
        let decoded: Option<Value> = interpret(&resp).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_session_not_created_envelope_maps_to_typed_error() {
        let resp = response(
            500,
            r#"{"value":{"error":"session not created","message":"no node"}}"#,
        );
        let err = interpret::<Session>(&resp).unwrap_err();
        match err {
            DistributorError::SessionNotCreated { message } => assert_eq!(message, "no node"),
            other => panic!("expected SessionNotCreated, got {other:?}"),
        }
    }

    #[test]
    fn test_undecodable_failure_carries_status_and_body() {
        let resp = response(502, "bad gateway");
        let err = interpret::<Value>(&resp).unwrap_err();
        match err {
            DistributorError::UnexpectedStatus { status, body } => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_other_error_codes_stay_generic() {
        let resp = response(
            404,
            r#"{"value":{"error":"invalid session id","message":"gone"}}"#,
        );
        let err = interpret::<Value>(&resp).unwrap_err();
        assert!(matches!(err, DistributorError::UnexpectedStatus { .. }));
    }

    #[test]
    fn test_malformed_success_body_is_a_decode_fault() {
        let resp = response(200, "{truncated");
        let err = interpret::<Value>(&resp).unwrap_err();
        assert!(matches!(err, DistributorError::Decode(_)));
    }

    #[test]
    fn test_success_value_shape_mismatch_is_a_decode_fault() {
        let resp = HttpResponse::new(
            StatusCode::OK,
            serde_json::to_vec(&json!({"value": {"unexpected": true}})).unwrap(),
        );
        let err = interpret::<Session>(&resp).unwrap_err();
        assert!(matches!(err, DistributorError::Decode(_)));
    }
}
