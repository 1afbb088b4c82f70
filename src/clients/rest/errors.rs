//! REST-specific error types for the SeamlessPay API SDK.
//!
//! The transport returns every response verbatim. The REST client maps
//! non-2xx responses to the variants of [`RestError`] by status code:
//!
//! | Status | Variant |
//! |---|---|
//! | 400, 404 | [`RestError::InvalidRequest`] |
//! | 401 | [`RestError::Authentication`] |
//! | 403 | [`RestError::Permission`] |
//! | 429 | [`RestError::RateLimit`] |
//! | anything else | [`RestError::Api`] |
//!
//! # Example
//!
//! ```rust,ignore
//! use seamlesspay_api::clients::RestError;
//!
//! match Charge::retrieve(&client, "TR_123", None).await {
//!     Ok(charge) => println!("{:?}", charge.status),
//!     Err(RestError::InvalidRequest(details)) => println!("Bad request: {details}"),
//!     Err(RestError::Authentication(details)) => println!("Check your API key: {details}"),
//!     Err(other) => println!("Failed: {other}"),
//! }
//! ```

use std::fmt;

use crate::clients::http_response::ApiResponse;
use crate::clients::{HttpError, InvalidHttpRequestError};
use thiserror::Error;

/// Details of an error reported by, or on behalf of, the SeamlessPay API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDetails {
    /// The HTTP status code, `None` if the request never left the client.
    pub status: Option<u16>,
    /// Human-readable message.
    pub message: String,
    /// The `Request-Id` response header, if present.
    pub request_id: Option<String>,
    /// The raw response body, if a response was received.
    pub body: Option<String>,
}

impl ErrorDetails {
    /// Creates details for an error detected before sending.
    #[must_use]
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            request_id: None,
            body: None,
        }
    }

    fn from_response(response: &ApiResponse) -> Self {
        Self {
            status: Some(response.code),
            message: error_message(response),
            request_id: response.request_id().map(String::from),
            body: Some(response.body.clone()),
        }
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(status) = self.status {
            write!(f, "; code: {status}")?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, "; request-id: {request_id}")?;
        }
        Ok(())
    }
}

/// Error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The API key is missing or was rejected (401).
    #[error("{0}")]
    Authentication(ErrorDetails),

    /// The request was malformed or referenced a missing object (400, 404).
    #[error("{0}")]
    InvalidRequest(ErrorDetails),

    /// The API key lacks permission for the request (403).
    #[error("{0}")]
    Permission(ErrorDetails),

    /// Too many requests hit the API too quickly (429).
    #[error("{0}")]
    RateLimit(ErrorDetails),

    /// Any other non-2xx response.
    #[error("{0}")]
    Api(ErrorDetails),

    /// A 2xx response whose body could not be deserialized.
    #[error("Invalid response object from API: {message} (HTTP response code was {status})")]
    InvalidResponse {
        /// The HTTP status code.
        status: u16,
        /// Why deserialization failed.
        message: String,
        /// The raw response body.
        body: String,
    },

    /// A transport-level error occurred.
    #[error(transparent)]
    Http(HttpError),
}

impl RestError {
    /// Maps a non-2xx response to the matching variant.
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Self {
        let details = ErrorDetails::from_response(response);
        match response.code {
            400 | 404 => Self::InvalidRequest(details),
            401 => Self::Authentication(details),
            403 => Self::Permission(details),
            429 => Self::RateLimit(details),
            _ => Self::Api(details),
        }
    }

    /// Returns the error details, if this error came from (or stands in for) an API response.
    #[must_use]
    pub const fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Authentication(d)
            | Self::InvalidRequest(d)
            | Self::Permission(d)
            | Self::RateLimit(d)
            | Self::Api(d) => Some(d),
            Self::InvalidResponse { .. } | Self::Http(_) => None,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidResponse { status, .. } => Some(*status),
            _ => self.details().and_then(|d| d.status),
        }
    }
}

impl From<HttpError> for RestError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::InvalidRequest(InvalidHttpRequestError::MissingApiKey) => {
                Self::Authentication(ErrorDetails::local(
                    InvalidHttpRequestError::MissingApiKey.to_string(),
                ))
            }
            other => Self::Http(other),
        }
    }
}

impl From<InvalidHttpRequestError> for RestError {
    fn from(error: InvalidHttpRequestError) -> Self {
        HttpError::from(error).into()
    }
}

/// Picks the message from a JSON error body, falling back to the raw text.
fn error_message(response: &ApiResponse) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(serde_json::Value::as_str)
                .or_else(|| body.get("error").and_then(serde_json::Value::as_str))
                .or_else(|| {
                    body.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(serde_json::Value::as_str)
                })
                .map(String::from)
        });

    match from_json {
        Some(message) => message,
        None if response.body.trim().is_empty() => {
            format!("Request failed with HTTP status {}", response.code)
        }
        None => response.body.clone(),
    }
}
