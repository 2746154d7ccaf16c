//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: A response whose status code did not match what
//!   the operation expected; carries the raw response
//! - [`InvalidHttpRequestError`]: A request that failed validation before sending
//! - [`HttpError`]: Failures of the transport itself
//!
//! # Example
//!
//! ```rust,ignore
//! use wiotp_historian::clients::HttpError;
//!
//! match client.get("api/v0002/historianconnectors", None).await {
//!     Ok(response) => println!("{}: {}", response.code, response.body),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpResponse;

/// Error carrying an HTTP response whose status code was not the expected one.
///
/// No distinction is made between 4xx and 5xx causes; callers inspect
/// [`code`](Self::code) and [`body`](Self::body) directly.
///
/// # Example
///
/// ```rust
/// use wiotp_historian::clients::HttpResponseError;
/// use serde_json::json;
///
/// let error = HttpResponseError {
///     code: 400,
///     body: json!({"message": "CUDHC0300E: Invalid request"}),
///     message: "CUDHC0300E: Invalid request".to_string(),
///     request_id: None,
/// };
///
/// assert_eq!(error.to_string(), "HTTP 400: CUDHC0300E: Invalid request");
/// ```
#[derive(Debug, Clone, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The decoded response body.
    pub body: serde_json::Value,
    /// Human readable summary extracted from the body.
    pub message: String,
    /// Request id for error reporting, if the server sent one.
    pub request_id: Option<String>,
}

impl HttpResponseError {
    /// Builds the error from a raw response.
    ///
    /// The message is the body's `message` field when present (the platform's
    /// error format), then `error`, and the serialized body otherwise.
    #[must_use]
    pub fn from_response(response: HttpResponse) -> Self {
        let message = ["message", "error"]
            .iter()
            .find_map(|key| response.body.get(*key).and_then(serde_json::Value::as_str))
            .map_or_else(|| response.body.to_string(), ToString::to_string);
        let request_id = response.request_id().map(ToString::to_string);

        Self {
            code: response.code,
            body: response.body,
            message,
            request_id,
        }
    }
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path was empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Unified error type for transport failures.
///
/// Non-2xx responses are NOT errors at this layer; they come back as
/// [`HttpResponse`] values and the resource layer decides what to accept.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_from_response_uses_platform_message_field() {
        let response = HttpResponse::new(
            409,
            HashMap::new(),
            json!({"message": "CUDHC0301E: Connector already exists", "exception": {"id": "CUDHC0301E"}}),
        );

        let error = HttpResponseError::from_response(response);

        assert_eq!(error.code, 409);
        assert_eq!(error.message, "CUDHC0301E: Connector already exists");
        assert_eq!(error.body["exception"]["id"], "CUDHC0301E");
    }

    #[test]
    fn test_from_response_falls_back_to_serialized_body() {
        let response = HttpResponse::new(500, HashMap::new(), json!({"raw_body": "oops"}));

        let error = HttpResponseError::from_response(response);

        assert_eq!(error.message, r#"{"raw_body":"oops"}"#);
        assert_eq!(error.to_string(), r#"HTTP 500: {"raw_body":"oops"}"#);
    }

    #[test]
    fn test_from_response_keeps_request_id() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-42".to_string()]);
        let response = HttpResponse::new(400, headers, json!({"error": "bad"}));

        let error = HttpResponseError::from_response(response);

        assert_eq!(error.message, "bad");
        assert_eq!(error.request_id.as_deref(), Some("req-42"));
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let response_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            body: json!({}),
            message: "test".to_string(),
            request_id: None,
        };
        let _ = response_error;

        let invalid_error: &dyn std::error::Error = &InvalidHttpRequestError::EmptyPath;
        let _ = invalid_error;
    }
}
