//! HTTP client types for SeamlessPay API communication.
//!
//! This module provides the transport layer of the SDK: request
//! descriptors, the retry-aware HTTP transport, response buffering and the
//! REST client that maps remote errors.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiRequest`]: A fully assembled request, built from [`RequestOptions`](crate::RequestOptions)
//! - [`HttpClient`]: The async transport; returns every response verbatim
//! - [`ApiResponseStream`]: A response whose body has not been read yet
//! - [`ApiResponse`]: A buffered response
//! - [`HttpHeaders`]: Case-insensitive, multi-valued headers
//! - [`rest::RestClient`]: Higher-level REST client
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use seamlesspay_api::clients::{ApiRequest, HttpClient, HttpMethod};
//! use seamlesspay_api::{ApiKey, ClientDefaults, RequestOptions};
//!
//! let defaults = ClientDefaults::builder()
//!     .api_key(ApiKey::new("sk_test").unwrap())
//!     .build()?;
//! let client = HttpClient::new(defaults.clone());
//!
//! let request = ApiRequest::builder(HttpMethod::Get, "https://api.seamlesspay.com/v1/quotes/QT_1/pdf")
//!     .build(&RequestOptions::from_defaults(&defaults))?;
//!
//! let mut stream = client.request_stream(&request).await?;
//! while let Some(chunk) = stream.next_chunk().await? {
//!     file.write_all(&chunk)?;
//! }
//! ```

mod errors;
mod http_client;
mod http_headers;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{
    ApiConnectionError, HeaderParseError, HttpError, InvalidHttpRequestError, StreamError,
};
pub use http_client::{
    HttpClient, INITIAL_NETWORK_RETRY_DELAY, MAX_NETWORK_RETRY_DELAY, MAX_RETRY_AFTER,
};
pub use http_headers::HttpHeaders;
pub use http_request::{ApiRequest, ApiRequestBuilder, HttpContent, HttpMethod, SDK_VERSION};
pub use http_response::{ApiResponse, ApiResponseStream};

// Re-export REST client types at the clients module level
pub use rest::{ErrorDetails, RestClient, RestError};
