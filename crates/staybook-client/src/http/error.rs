//! HTTP error classification and normalization
//!
//! Normalizes backend error responses and transport failures into a uniform
//! shape the retry loop can make decisions over.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Classification of a failed request outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClassification {
    /// 401: the stored session is no longer valid
    AuthenticationExpired,
    /// 5xx: the backend failed; surfaced unchanged
    ServerFault,
    /// 429: recoverable with exponential backoff
    RateLimited,
    /// No response received at all; recoverable with a fixed delay
    TransientNetworkFailure,
    /// Everything else; passed through untouched
    Other,
}

impl ErrorClassification {
    /// Whether the gateway may re-dispatch a request failing this way
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorClassification::RateLimited | ErrorClassification::TransientNetworkFailure
        )
    }
}

/// Normalized representation of a failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpError {
    /// HTTP status code, absent for network-level failures
    pub status_code: Option<u16>,
    /// Classification driving the retry decision
    pub classification: ErrorClassification,
    /// Human-readable message, extracted from the backend body when present
    pub message: String,
    /// Backend error payload, when the body parsed as JSON
    pub details: Option<Value>,
}

impl HttpError {
    /// Build from a non-success response, consuming its body
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let details = serde_json::from_str::<Value>(&body).ok();
        let message = Self::extract_backend_message(&details, &body, status);

        Self {
            status_code: Some(status.as_u16()),
            classification: Self::classify_status(status),
            message,
            details,
        }
    }

    /// Build from a transport error where no response was received
    pub fn from_request_error(error: reqwest::Error) -> Self {
        match error.status() {
            // A status means a response did arrive; classify it normally
            Some(status) => Self {
                status_code: Some(status.as_u16()),
                classification: Self::classify_status(status),
                message: error.to_string(),
                details: None,
            },
            None => Self {
                status_code: None,
                classification: ErrorClassification::TransientNetworkFailure,
                message: error.to_string(),
                details: None,
            },
        }
    }

    /// Classify an HTTP status code
    pub fn classify_status(status: StatusCode) -> ErrorClassification {
        match status.as_u16() {
            401 => ErrorClassification::AuthenticationExpired,
            429 => ErrorClassification::RateLimited,
            500..=599 => ErrorClassification::ServerFault,
            _ => ErrorClassification::Other,
        }
    }

    /// Pull the backend's message out of its JSON error body
    fn extract_backend_message(details: &Option<Value>, body: &str, status: StatusCode) -> String {
        if let Some(json) = details {
            if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
                return message.to_string();
            }
            if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
                return error.to_string();
            }
        }
        if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.to_string()
        }
    }

    /// Whether the retry loop may re-dispatch this request
    pub fn is_recoverable(&self) -> bool {
        self.classification.is_recoverable()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP error [{}]: {} ({:?})",
            self.status_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "no response".to_string()),
            self.message,
            self.classification
        )
    }
}

impl std::error::Error for HttpError {}

impl From<HttpError> for crate::Error {
    fn from(http_error: HttpError) -> Self {
        crate::Error::Http {
            message: http_error.message.clone(),
            status_code: http_error.status_code,
            source: http_error
                .details
                .as_ref()
                .map(|details| anyhow::anyhow!("{}", details)),
        }
    }
}
