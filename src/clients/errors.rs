//! HTTP-specific error types for the SeamlessPay API SDK.
//!
//! The transport never interprets response status: non-2xx responses are
//! returned verbatim and mapped to remote errors by the REST client. The
//! types here cover what can go wrong before a response exists, or while a
//! body is being read.
//!
//! - [`ApiConnectionError`]: The API could not be reached
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`StreamError`]: A response body could not be read
//! - [`HeaderParseError`]: A response header held an unparseable value
//! - [`HttpError`]: Unified error type for the transport
//!
//! # Example
//!
//! ```rust,ignore
//! use seamlesspay_api::clients::HttpError;
//!
//! match client.request(&request).await {
//!     Ok(response) => println!("{}: {}", response.code, response.body),
//!     Err(HttpError::Connection(e)) => println!("Unreachable: {e}"),
//!     Err(HttpError::Stream(e)) => println!("Body error: {e}"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the API cannot be reached.
///
/// Raised for any I/O failure while connecting, sending the request or
/// retrieving the response status. The message names the configured API base
/// so that a misconfigured host is easy to spot.
#[derive(Debug, Error)]
#[error(
    "IOException during API request to SeamlessPay ({api_base}): {message} \
     Please check your internet connection and try again. If this problem persists, \
     you should check SeamlessPay's service status."
)]
pub struct ApiConnectionError {
    /// The API base the request was sent to.
    pub api_base: String,
    /// The message of the underlying failure.
    pub message: String,
    /// The underlying failure, when one exists.
    #[source]
    pub source: Option<reqwest::Error>,
}

impl ApiConnectionError {
    pub(crate) fn from_reqwest(api_base: impl Into<String>, error: reqwest::Error) -> Self {
        Self {
            api_base: api_base.into(),
            message: error.to_string(),
            source: Some(error),
        }
    }
}

/// Errors raised while reading a response body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The body was already consumed or closed.
    #[error("Response body stream is closed.")]
    Closed,

    /// Reading the body failed.
    #[error("Failed to read response body: {0}")]
    Read(String),
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// No API key was set on the options or the defaults.
    #[error(
        "No API key provided. Set an API key on ClientDefaults or on the RequestOptions \
         of this request. You can generate API keys from the SeamlessPay Dashboard."
    )]
    MissingApiKey,

    /// The request URL could not be parsed.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A header name or value is not valid HTTP.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialization(String),
}

/// Error returned when a response header holds a value that cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderParseError {
    /// The `Date` header is not a valid RFC 1123 date.
    #[error("Invalid Date header '{value}': {reason}")]
    InvalidDate {
        /// The raw header value.
        value: String,
        /// Why parsing failed.
        reason: String,
    },
}

/// Unified error type for the transport.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API could not be reached.
    #[error(transparent)]
    Connection(#[from] ApiConnectionError),

    /// The response body could not be read.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}
