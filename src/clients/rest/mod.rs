//! REST API client for SeamlessPay.
//!
//! This module provides a higher-level client built on top of the
//! [`HttpClient`](crate::clients::HttpClient):
//!
//! - [`RestClient`]: Builds requests from a path and parameters, sends them
//!   with retries and deserializes the response
//! - [`RestError`]: Error type mapping non-2xx statuses to typed variants
//! - [`ErrorDetails`]: Status, message, request id and body of a remote error
//!
//! # Retry Behavior
//!
//! Requests are retried up to `max_network_retries` times (from the request
//! options) on connectivity failures and 429 / 5xx responses. The default is
//! no retries.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::{ErrorDetails, RestError};
