//! HTTP response types for the SeamlessPay API SDK.
//!
//! The transport hands back an [`ApiResponseStream`] whose body has not been
//! read yet. [`ApiResponseStream::unstream`] drains it exactly once into a
//! buffered [`ApiResponse`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::clients::errors::{HeaderParseError, StreamError};
use crate::clients::http_headers::HttpHeaders;

/// A buffered response from the SeamlessPay API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HttpHeaders,
    /// The response body, decoded as UTF-8.
    pub body: String,
    /// How many times the request was retried before this response.
    pub num_retries: u32,
}

impl ApiResponse {
    /// Creates a response that was obtained without retries.
    #[must_use]
    pub fn new(code: u16, headers: HttpHeaders, body: impl Into<String>) -> Self {
        Self {
            code,
            headers,
            body: body.into(),
            num_retries: 0,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        is_success(self.code)
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Returns the `Date` header, if present.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderParseError::InvalidDate`] if the header is not an
    /// RFC 1123 date.
    pub fn date(&self) -> Result<Option<DateTime<Utc>>, HeaderParseError> {
        parse_date(&self.headers)
    }

    /// Returns the `Idempotency-Key` header, if present.
    #[must_use]
    pub fn idempotency_key(&self) -> Option<&str> {
        self.headers.first_value("idempotency-key")
    }

    /// Returns the `Request-Id` header, if present.
    ///
    /// Include this ID when reporting a problem to SeamlessPay.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers.first_value("request-id")
    }
}

enum BodySource {
    Network(reqwest::Response),
    Buffered(Option<Vec<u8>>),
}

impl std::fmt::Debug for BodySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(_) => f.write_str("Network(..)"),
            Self::Buffered(bytes) => f
                .debug_tuple("Buffered")
                .field(&bytes.as_ref().map(Vec::len))
                .finish(),
        }
    }
}

/// A response whose body has not been read yet.
///
/// The body is single-use. Once it has been drained by [`unstream`] or
/// [`read_to_end`], or released by [`close`], any further read fails with
/// [`StreamError::Closed`].
///
/// [`unstream`]: ApiResponseStream::unstream
/// [`read_to_end`]: ApiResponseStream::read_to_end
/// [`close`]: ApiResponseStream::close
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::clients::{ApiResponseStream, HttpHeaders, StreamError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut stream = ApiResponseStream::from_bytes(404, HttpHeaders::new(), b"not found".to_vec());
///
/// let response = stream.unstream().await.unwrap();
/// assert_eq!(response.code, 404);
/// assert_eq!(response.body, "not found");
///
/// assert_eq!(stream.next_chunk().await, Err(StreamError::Closed));
/// # }
/// ```
#[derive(Debug)]
pub struct ApiResponseStream {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HttpHeaders,
    /// How many times the request was retried before this response.
    pub num_retries: u32,
    body: Option<BodySource>,
}

impl ApiResponseStream {
    pub(crate) fn from_network(response: reqwest::Response) -> Self {
        Self {
            code: response.status().as_u16(),
            headers: HttpHeaders::from_header_map(response.headers()),
            num_retries: 0,
            body: Some(BodySource::Network(response)),
        }
    }

    /// Creates a stream over an in-memory body.
    #[must_use]
    pub fn from_bytes(code: u16, headers: HttpHeaders, body: Vec<u8>) -> Self {
        Self {
            code,
            headers,
            num_retries: 0,
            body: Some(BodySource::Buffered(Some(body))),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        is_success(self.code)
    }

    /// Returns `true` once the body has been drained or closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.body.is_none()
    }

    /// Reads the next chunk of the body, `None` at end of body.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] if the body was closed, or
    /// [`StreamError::Read`] if reading from the connection failed.
    pub async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        match self.body.as_mut() {
            None => Err(StreamError::Closed),
            Some(BodySource::Buffered(bytes)) => Ok(bytes.take()),
            Some(BodySource::Network(response)) => response
                .chunk()
                .await
                .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
                .map_err(|e| StreamError::Read(e.to_string())),
        }
    }

    /// Drains the remaining body and closes the stream.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] if the body was already closed, or
    /// [`StreamError::Read`] if reading from the connection failed. The
    /// stream is closed in both cases.
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>, StreamError> {
        match self.body.take() {
            None => Err(StreamError::Closed),
            Some(BodySource::Buffered(bytes)) => Ok(bytes.unwrap_or_default()),
            Some(BodySource::Network(response)) => response
                .bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|e| StreamError::Read(e.to_string())),
        }
    }

    /// Converts this stream into a buffered [`ApiResponse`].
    ///
    /// The body is decoded as UTF-8, replacing invalid sequences. Status,
    /// headers and retry count are carried over unchanged.
    ///
    /// # Errors
    ///
    /// See [`read_to_end`](Self::read_to_end).
    pub async fn unstream(&mut self) -> Result<ApiResponse, StreamError> {
        let bytes = self.read_to_end().await?;
        Ok(ApiResponse {
            code: self.code,
            headers: self.headers.clone(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
            num_retries: self.num_retries,
        })
    }

    /// Releases the body without reading it. Closing twice is a no-op.
    pub fn close(&mut self) {
        self.body = None;
    }

    /// Returns the `Date` header, if present.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderParseError::InvalidDate`] if the header is not an
    /// RFC 1123 date.
    pub fn date(&self) -> Result<Option<DateTime<Utc>>, HeaderParseError> {
        parse_date(&self.headers)
    }

    /// Returns the `Idempotency-Key` header, if present.
    #[must_use]
    pub fn idempotency_key(&self) -> Option<&str> {
        self.headers.first_value("idempotency-key")
    }

    /// Returns the `Request-Id` header, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers.first_value("request-id")
    }
}

const fn is_success(code: u16) -> bool {
    code >= 200 && code <= 299
}

fn parse_date(headers: &HttpHeaders) -> Result<Option<DateTime<Utc>>, HeaderParseError> {
    headers
        .first_value("date")
        .map(|value| {
            DateTime::parse_from_rfc2822(value)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|e| HeaderParseError::InvalidDate {
                    value: value.to_string(),
                    reason: e.to_string(),
                })
        })
        .transpose()
}
