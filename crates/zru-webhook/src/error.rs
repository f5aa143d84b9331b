use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use zru::ZruError;

#[derive(Debug)]
pub enum WebhookError {
    /// Body is not a JSON object
    InvalidPayload(String),
    /// Signature field missing or not a string
    MalformedPayload(String),
    /// Declared signature does not match
    InvalidSignature,
    /// Internal error
    Internal(String),
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookError::InvalidPayload(msg) => write!(f, "invalid payload: {}", msg),
            WebhookError::MalformedPayload(msg) => write!(f, "malformed payload: {}", msg),
            WebhookError::InvalidSignature => write!(f, "invalid signature"),
            WebhookError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for WebhookError {}

impl From<ZruError> for WebhookError {
    fn from(e: ZruError) -> Self {
        match e {
            ZruError::MalformedPayload(msg) => WebhookError::MalformedPayload(msg),
            other => WebhookError::Internal(other.to_string()),
        }
    }
}

impl ResponseError for WebhookError {
    fn error_response(&self) -> HttpResponse {
        match self {
            WebhookError::InvalidPayload(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "invalid_payload",
                    "message": msg
                }))
            }
            WebhookError::MalformedPayload(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "malformed_payload",
                    "message": msg
                }))
            }
            WebhookError::InvalidSignature => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "invalid_signature",
                "message": "Notification signature does not match"
            })),
            WebhookError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}
