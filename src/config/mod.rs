//! Configuration types for the SeamlessPay API SDK.
//!
//! This module provides the configuration used to parameterize every call.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientDefaults`]: Immutable defaults (credentials, API base, timeouts,
//!   retries, proxy) shared by every request made through a client
//! - [`ClientDefaultsBuilder`]: A builder for constructing [`ClientDefaults`]
//! - [`RequestOptions`]: The validated, immutable settings for one request
//! - [`RequestOptionsBuilder`]: A builder seeded from [`ClientDefaults`]
//! - [`ApiKey`], [`ClientId`], [`IdempotencyKey`], [`AccountId`],
//!   [`EndpointUrl`], [`ProxyCredential`]: Validated newtypes
//! - [`ApiVersion`]: The SeamlessPay API version
//!
//! There is no process-wide mutable configuration. Defaults are an explicit
//! value that is passed to every builder and client.
//!
//! # Example
//!
//! ```rust
//! use seamlesspay_api::{ApiKey, ClientDefaults, RequestOptions, IdempotencyKey};
//! use std::time::Duration;
//!
//! let defaults = ClientDefaults::builder()
//!     .api_key(ApiKey::new("sk_test").unwrap())
//!     .read_timeout(Duration::from_secs(20))
//!     .build()
//!     .unwrap();
//!
//! let options = RequestOptions::builder(&defaults)
//!     .idempotency_key(IdempotencyKey::new("order-1234").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.read_timeout(), Duration::from_secs(20));
//! ```

mod newtypes;
mod request_options;
mod version;

pub use newtypes::{AccountId, ApiKey, ClientId, EndpointUrl, IdempotencyKey, ProxyCredential};
pub use request_options::{RequestOptions, RequestOptionsBuilder};
pub use version::ApiVersion;

use std::time::Duration;

use crate::error::ConfigError;

/// Production API base.
pub const LIVE_API_BASE: &str = "https://api.seamlesspay.com";

/// Sandbox API base.
pub const SANDBOX_API_BASE: &str = "https://api.seamlesspay.dev";

/// Default timeout for establishing a connection (milliseconds).
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for reading from an established connection (milliseconds).
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 80_000;

/// Default settings shared by every request made through a client.
///
/// `ClientDefaults` replaces process-wide mutable settings: it is built once,
/// never mutated, and passed explicitly to [`RequestOptions::builder`] and to
/// the clients.
///
/// # Thread Safety
///
/// `ClientDefaults` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientDefaults {
    api_key: Option<ApiKey>,
    client_id: Option<ClientId>,
    api_base: EndpointUrl,
    connect_timeout: Duration,
    read_timeout: Duration,
    max_network_retries: u32,
    connection_proxy: Option<EndpointUrl>,
    proxy_credential: Option<ProxyCredential>,
    user_agent_prefix: Option<String>,
}

impl ClientDefaults {
    /// Creates a new builder for constructing `ClientDefaults`.
    #[must_use]
    pub fn builder() -> ClientDefaultsBuilder {
        ClientDefaultsBuilder::new()
    }

    /// Returns the default API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the default client identifier, if configured.
    #[must_use]
    pub const fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &EndpointUrl {
        &self.api_base
    }

    /// Returns the default connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the default read timeout.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns the default maximum number of network retries.
    #[must_use]
    pub const fn max_network_retries(&self) -> u32 {
        self.max_network_retries
    }

    /// Returns the default proxy, if configured.
    #[must_use]
    pub const fn connection_proxy(&self) -> Option<&EndpointUrl> {
        self.connection_proxy.as_ref()
    }

    /// Returns the default proxy credential, if configured.
    #[must_use]
    pub const fn proxy_credential(&self) -> Option<&ProxyCredential> {
        self.proxy_credential.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            api_key: None,
            client_id: None,
            api_base: default_api_base(),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            max_network_retries: 0,
            connection_proxy: None,
            proxy_credential: None,
            user_agent_prefix: None,
        }
    }
}

// Verify ClientDefaults is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientDefaults>();
};

fn default_api_base() -> EndpointUrl {
    EndpointUrl::live_api_base()
}

/// Builder for constructing [`ClientDefaults`] instances.
///
/// # Defaults
///
/// - `api_base`: [`LIVE_API_BASE`]
/// - `connect_timeout`: 30 seconds
/// - `read_timeout`: 80 seconds
/// - `max_network_retries`: 0
/// - everything else: `None`
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::{ApiKey, ClientDefaults, EndpointUrl, ProxyCredential};
///
/// let defaults = ClientDefaults::builder()
///     .api_key(ApiKey::new("sk_test").unwrap())
///     .api_base(EndpointUrl::new("https://api.seamlesspay.dev").unwrap())
///     .max_network_retries(2)
///     .connection_proxy(EndpointUrl::new("http://proxy.internal:3128").unwrap())
///     .proxy_credential(ProxyCredential::new("user", "pass").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(defaults.max_network_retries(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ClientDefaultsBuilder {
    api_key: Option<ApiKey>,
    client_id: Option<ClientId>,
    api_base: Option<EndpointUrl>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    max_network_retries: Option<u32>,
    connection_proxy: Option<EndpointUrl>,
    proxy_credential: Option<ProxyCredential>,
    user_agent_prefix: Option<String>,
}

impl ClientDefaultsBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the default client identifier.
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn api_base(mut self, api_base: EndpointUrl) -> Self {
        self.api_base = Some(api_base);
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the read timeout.
    ///
    /// This value should be set conservatively because some API requests
    /// can take time on the server side.
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Sets the maximum number of times a request is retried.
    #[must_use]
    pub const fn max_network_retries(mut self, retries: u32) -> Self {
        self.max_network_retries = Some(retries);
        self
    }

    /// Routes requests through the given proxy.
    #[must_use]
    pub fn connection_proxy(mut self, proxy: EndpointUrl) -> Self {
        self.connection_proxy = Some(proxy);
        self
    }

    /// Sets the credential presented to the proxy.
    #[must_use]
    pub fn proxy_credential(mut self, credential: ProxyCredential) -> Self {
        self.proxy_credential = Some(credential);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientDefaults`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if a timeout is zero,
    /// [`ConfigError::EmptyOption`] if the user agent prefix is blank, or
    /// [`ConfigError::InvalidHeaderValue`] if it cannot be sent as a header.
    pub fn build(self) -> Result<ClientDefaults, ConfigError> {
        let base = ClientDefaults::default();

        let connect_timeout = self.connect_timeout.unwrap_or(base.connect_timeout);
        let read_timeout = self.read_timeout.unwrap_or(base.read_timeout);
        validate_timeout("connect_timeout", connect_timeout)?;
        validate_timeout("read_timeout", read_timeout)?;

        let user_agent_prefix = match self.user_agent_prefix {
            Some(prefix) if prefix.trim().is_empty() => {
                return Err(ConfigError::EmptyOption {
                    field: "user_agent_prefix",
                })
            }
            Some(prefix) => {
                let prefix = prefix.trim();
                reqwest::header::HeaderValue::from_str(prefix).map_err(|_| {
                    ConfigError::InvalidHeaderValue {
                        field: "user_agent_prefix",
                    }
                })?;
                Some(prefix.to_string())
            }
            None => None,
        };

        Ok(ClientDefaults {
            api_key: self.api_key,
            client_id: self.client_id,
            api_base: self.api_base.unwrap_or(base.api_base),
            connect_timeout,
            read_timeout,
            max_network_retries: self.max_network_retries.unwrap_or(base.max_network_retries),
            connection_proxy: self.connection_proxy,
            proxy_credential: self.proxy_credential,
            user_agent_prefix,
        })
    }
}

pub(crate) fn validate_timeout(field: &'static str, timeout: Duration) -> Result<(), ConfigError> {
    if timeout.is_zero() {
        return Err(ConfigError::InvalidTimeout { field });
    }
    Ok(())
}
