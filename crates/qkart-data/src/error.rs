//! API client error types.

use thiserror::Error;

/// Errors that can occur when calling the storefront API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid URL or request construction failure.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Non-2xx response. `message` is the server's `message` field, if any.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http {
        status: u16,
        message: Option<String>,
    },

    /// Failed to decode the response body.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the failure happened before any response arrived.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }

    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The message the server put in its error body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// The server message verbatim when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ApiError::InvalidRequest(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
