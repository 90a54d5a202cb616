//! Error types for the Sporta client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, API, decoding, input validation and cancellation outcomes.

use std::fmt;
use thiserror::Error;

/// Banner text used when a failure carries no message of its own.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed.";

/// The unified error type for Sporta operations.
///
/// Callers can match on the variants to tell a superseded request
/// ([`Error::Cancelled`]) apart from failures that must reach the user.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, HTTP client).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with a non-2xx status or `status: false`.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The payload could not be mapped onto the expected view model.
    #[error("unexpected payload: {message}")]
    Decode { message: String },

    /// Input validation errors (URL, role, route formats).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A required form field failed client-side validation.
    #[error("{field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The request was superseded by a newer one from the same controller.
    #[error("request cancelled")]
    Cancelled,
}

impl Error {
    /// Build a validation error for a form field.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Build a decode error.
    pub fn decode(message: impl fmt::Display) -> Self {
        Error::Decode {
            message: message.to_string(),
        }
    }

    /// Returns true for superseded requests, which are never surfaced.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Returns true if the backend rejected the bearer token.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Api(e) if e.is_auth_error())
    }

    /// The text shown in the alert banner for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(e) => e.message.clone(),
            Error::Transport(e) => e.to_string(),
            Error::Decode { .. } => DEFAULT_FAILURE_MESSAGE.to_string(),
            Error::InvalidInput(e) => e.to_string(),
            Error::Validation { reason, .. } => reason.clone(),
            Error::Cancelled => String::new(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::decode(err)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A failure reported by the backend.
///
/// `status` is the HTTP status when the failure came with one; an
/// application-level `status: false` envelope inside a 2xx response has
/// `status: None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code, if the failure was a non-2xx response.
    pub status: Option<u16>,
    /// Message from the envelope, or a generic fallback.
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: Option<u16>, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| match status {
                Some(code) => format!("HTTP {code}"),
                None => DEFAULT_FAILURE_MESSAGE.to_string(),
            });
        Self { status, message }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "HTTP {status}: ")?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Unknown role string.
    #[error("unknown role '{value}'")]
    Role { value: String },

    /// Unknown booking status.
    #[error("unknown booking status '{value}'")]
    BookingStatus { value: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_falls_back_to_status_text() {
        let err = ApiError::new(Some(502), None);
        assert_eq!(err.message, "HTTP 502");

        let err = ApiError::new(None, Some("  ".to_string()));
        assert_eq!(err.message, DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = Error::from(ApiError::new(Some(400), Some("Venue is closed".into())));
        assert_eq!(err.user_message(), "Venue is closed");
        assert!(!err.is_cancelled());
    }

    #[test]
    fn cancelled_has_no_banner() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(Error::Cancelled.user_message().is_empty());
    }

    #[test]
    fn forbidden_counts_as_auth_error() {
        let err = Error::from(ApiError::new(Some(403), None));
        assert!(err.is_auth_error());
    }
}
