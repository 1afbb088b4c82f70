//! # SeamlessPay API Rust SDK
//!
//! A Rust SDK for the SeamlessPay payments API, providing validated request
//! configuration, an async HTTP transport with retries, REST resources and
//! webhook event decoding.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Client-wide defaults via [`ClientDefaults`] and per-request overrides via
//!   [`RequestOptions`]
//! - Validated newtypes for credentials, idempotency keys and endpoints
//! - An async HTTP client with retry and `Retry-After` handling
//! - Streamed responses for large bodies such as quote PDFs
//! - REST resources for charges, invoices and quotes
//! - Webhook event decoding with a discriminator registry
//!
//! ## Quick Start
//!
//! ```rust
//! use seamlesspay_api::{ApiKey, ClientDefaults, IdempotencyKey, RequestOptions};
//! use std::time::Duration;
//!
//! let defaults = ClientDefaults::builder()
//!     .api_key(ApiKey::new("sk_test_123").unwrap())
//!     .max_network_retries(2)
//!     .build()
//!     .unwrap();
//!
//! let options = RequestOptions::builder(&defaults)
//!     .idempotency_key(IdempotencyKey::new("order-1001").unwrap())
//!     .read_timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.max_network_retries(), 2);
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use seamlesspay_api::rest::resources::{Charge, ChargeCreateParams};
//! use seamlesspay_api::RestClient;
//!
//! let client = RestClient::new(defaults);
//! let charge = Charge::create(
//!     &client,
//!     &ChargeCreateParams {
//!         amount: Some("25.00".into()),
//!         token: Some("TKN_01".to_string()),
//!         ..Default::default()
//!     },
//!     Some(&options),
//! )
//! .await?;
//! ```
//!
//! ## Webhooks
//!
//! ```rust
//! use seamlesspay_api::webhooks::Event;
//!
//! let event = Event::from_json(
//!     r#"{"id": "evt_1", "data": {"object": {"object": "payout", "x": 1}}}"#,
//! ).unwrap();
//! assert!(event.data.object.is_some_and(|object| object.as_raw().is_some()));
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`](https://docs.rs/tracing) events and never
//! installs a subscriber. Request metadata is logged at `debug`, retries and
//! decoder degradation at `warn`.

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{
    AccountId, ApiKey, ApiVersion, ClientDefaults, ClientDefaultsBuilder, ClientId, EndpointUrl,
    IdempotencyKey, ProxyCredential, RequestOptions, RequestOptionsBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiConnectionError, ApiRequest, ApiResponse, ApiResponseStream, HttpClient, HttpError,
    HttpHeaders, HttpMethod, InvalidHttpRequestError, RestClient, RestError, StreamError,
};
