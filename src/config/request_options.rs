//! Per-request options.
//!
//! [`RequestOptions`] carries the validated settings used to parameterize a
//! single request: credentials, idempotency key, account and version
//! overrides, timeouts, retry budget and proxy.

use std::time::Duration;

use super::{
    validate_timeout, AccountId, ApiKey, ApiVersion, ClientDefaults, ClientId, EndpointUrl,
    IdempotencyKey, ProxyCredential,
};
use crate::error::ConfigError;

/// Validated, immutable settings for one request.
///
/// Construct with [`RequestOptions::builder`] or take the defaults as-is with
/// [`RequestOptions::from_defaults`]. Every string option is either absent or
/// non-empty after trimming; this is enforced by the validated newtypes when
/// the values are created.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::{AccountId, ApiKey, ClientDefaults, IdempotencyKey, RequestOptions};
///
/// let defaults = ClientDefaults::default();
/// let options = RequestOptions::builder(&defaults)
///     .api_key(ApiKey::new("sk_test").unwrap())
///     .seamlesspay_account(AccountId::new("acct_123").unwrap())
///     .idempotency_key(IdempotencyKey::new("retry-safe-1").unwrap())
///     .build()
///     .unwrap();
///
/// // A follow-up operation keeps the credential and account, never the key
/// let next = options.to_builder(&defaults).build().unwrap();
/// assert!(next.idempotency_key().is_none());
/// assert_eq!(next.seamlesspay_account(), options.seamlesspay_account());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOptions {
    api_key: Option<ApiKey>,
    client_id: Option<ClientId>,
    idempotency_key: Option<IdempotencyKey>,
    seamlesspay_account: Option<AccountId>,
    api_version: ApiVersion,
    version_override: Option<ApiVersion>,
    connect_timeout: Duration,
    read_timeout: Duration,
    max_network_retries: u32,
    connection_proxy: Option<EndpointUrl>,
    proxy_credential: Option<ProxyCredential>,
    user_agent_prefix: Option<String>,
}

// Verify RequestOptions is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestOptions>();
};

impl RequestOptions {
    /// Creates a builder seeded with the given defaults.
    #[must_use]
    pub fn builder(defaults: &ClientDefaults) -> RequestOptionsBuilder {
        RequestOptionsBuilder::new(defaults)
    }

    /// Returns options taken from the defaults without any per-request override.
    #[must_use]
    pub fn from_defaults(defaults: &ClientDefaults) -> Self {
        RequestOptionsBuilder::new(defaults).freeze()
    }

    /// Converts these options back into a builder for a new operation.
    ///
    /// Only the API key and the account override are carried forward. The
    /// idempotency key and version override are dropped so that a new
    /// operation cannot reuse them by accident; timeouts, retries, proxy and
    /// client id come fresh from `defaults`.
    #[must_use]
    pub fn to_builder(&self, defaults: &ClientDefaults) -> RequestOptionsBuilder {
        let builder = RequestOptionsBuilder::new(defaults);
        let builder = match &self.api_key {
            Some(key) => builder.api_key(key.clone()),
            None => builder.clear_api_key(),
        };
        match &self.seamlesspay_account {
            Some(account) => builder.seamlesspay_account(account.clone()),
            None => builder.clear_seamlesspay_account(),
        }
    }

    /// Returns the API key, if any.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the client identifier, if any.
    #[must_use]
    pub const fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    /// Returns the idempotency key, if any.
    #[must_use]
    pub const fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }

    /// Returns the account override, if any.
    #[must_use]
    pub const fn seamlesspay_account(&self) -> Option<&AccountId> {
        self.seamlesspay_account.as_ref()
    }

    /// Returns the API version the bindings are pinned to.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the version override, if any.
    ///
    /// Only set this when the response is not deserialized into the typed
    /// resources of this crate, e.g. when acting on behalf of another
    /// integration that passes the raw data on.
    #[must_use]
    pub const fn version_override(&self) -> Option<&ApiVersion> {
        self.version_override.as_ref()
    }

    /// Returns the version sent on the wire: the override if set, else the pinned version.
    #[must_use]
    pub fn effective_api_version(&self) -> &ApiVersion {
        self.version_override.as_ref().unwrap_or(&self.api_version)
    }

    /// Returns the connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the read timeout.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns the maximum number of network retries.
    #[must_use]
    pub const fn max_network_retries(&self) -> u32 {
        self.max_network_retries
    }

    /// Returns the proxy, if any.
    #[must_use]
    pub const fn connection_proxy(&self) -> Option<&EndpointUrl> {
        self.connection_proxy.as_ref()
    }

    /// Returns the proxy credential, if any.
    #[must_use]
    pub const fn proxy_credential(&self) -> Option<&ProxyCredential> {
        self.proxy_credential.as_ref()
    }

    /// Returns the `User-Agent` prefix inherited from the client defaults.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

/// Builder for [`RequestOptions`].
///
/// A new builder starts from the API key, client id, timeouts, retry budget
/// and proxy of the [`ClientDefaults`] it is created from. Each setter has a
/// matching getter and, for optional values, a `clear_*` method that means
/// "use default / omit".
#[derive(Clone, Debug)]
pub struct RequestOptionsBuilder {
    api_key: Option<ApiKey>,
    client_id: Option<ClientId>,
    idempotency_key: Option<IdempotencyKey>,
    seamlesspay_account: Option<AccountId>,
    version_override: Option<ApiVersion>,
    connect_timeout: Duration,
    read_timeout: Duration,
    max_network_retries: u32,
    connection_proxy: Option<EndpointUrl>,
    proxy_credential: Option<ProxyCredential>,
    user_agent_prefix: Option<String>,
}

impl RequestOptionsBuilder {
    /// Creates a builder seeded from `defaults`.
    #[must_use]
    pub fn new(defaults: &ClientDefaults) -> Self {
        Self {
            api_key: defaults.api_key().cloned(),
            client_id: defaults.client_id().cloned(),
            idempotency_key: None,
            seamlesspay_account: None,
            version_override: None,
            connect_timeout: defaults.connect_timeout(),
            read_timeout: defaults.read_timeout(),
            max_network_retries: defaults.max_network_retries(),
            connection_proxy: defaults.connection_proxy().cloned(),
            proxy_credential: defaults.proxy_credential().cloned(),
            user_agent_prefix: defaults.user_agent_prefix().map(str::to_string),
        }
    }

    /// Returns the API key currently set.
    #[must_use]
    pub const fn get_api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Removes the API key.
    #[must_use]
    pub fn clear_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    /// Returns the client identifier currently set.
    #[must_use]
    pub const fn get_client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    /// Sets the client identifier.
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Removes the client identifier.
    #[must_use]
    pub fn clear_client_id(mut self) -> Self {
        self.client_id = None;
        self
    }

    /// Returns the idempotency key currently set.
    #[must_use]
    pub const fn get_idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }

    /// Sets the idempotency key.
    #[must_use]
    pub fn idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }

    /// Removes the idempotency key.
    #[must_use]
    pub fn clear_idempotency_key(mut self) -> Self {
        self.idempotency_key = None;
        self
    }

    /// Returns the account override currently set.
    #[must_use]
    pub const fn get_seamlesspay_account(&self) -> Option<&AccountId> {
        self.seamlesspay_account.as_ref()
    }

    /// Acts on behalf of the given account.
    #[must_use]
    pub fn seamlesspay_account(mut self, account: AccountId) -> Self {
        self.seamlesspay_account = Some(account);
        self
    }

    /// Removes the account override.
    #[must_use]
    pub fn clear_seamlesspay_account(mut self) -> Self {
        self.seamlesspay_account = None;
        self
    }

    /// Returns the version override currently set.
    #[must_use]
    pub const fn get_version_override(&self) -> Option<&ApiVersion> {
        self.version_override.as_ref()
    }

    /// Overrides the API version sent with the request.
    ///
    /// Responses made with a different version may not deserialize into the
    /// typed resources of this crate; use this only for raw pass-through.
    #[must_use]
    pub fn version_override(mut self, version: ApiVersion) -> Self {
        self.version_override = Some(version);
        self
    }

    /// Removes the version override.
    #[must_use]
    pub fn clear_version_override(mut self) -> Self {
        self.version_override = None;
        self
    }

    /// Returns the connect timeout currently set.
    #[must_use]
    pub const fn get_connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Sets the timeout for establishing new connections.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Returns the read timeout currently set.
    #[must_use]
    pub const fn get_read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Sets the timeout for reading from an established connection.
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Returns the retry budget currently set.
    #[must_use]
    pub const fn get_max_network_retries(&self) -> u32 {
        self.max_network_retries
    }

    /// Sets the maximum number of times the request is retried.
    #[must_use]
    pub const fn max_network_retries(mut self, retries: u32) -> Self {
        self.max_network_retries = retries;
        self
    }

    /// Returns the proxy currently set.
    #[must_use]
    pub const fn get_connection_proxy(&self) -> Option<&EndpointUrl> {
        self.connection_proxy.as_ref()
    }

    /// Routes the request through the given proxy.
    #[must_use]
    pub fn connection_proxy(mut self, proxy: EndpointUrl) -> Self {
        self.connection_proxy = Some(proxy);
        self
    }

    /// Connects directly, without a proxy.
    #[must_use]
    pub fn clear_connection_proxy(mut self) -> Self {
        self.connection_proxy = None;
        self
    }

    /// Returns the proxy credential currently set.
    #[must_use]
    pub const fn get_proxy_credential(&self) -> Option<&ProxyCredential> {
        self.proxy_credential.as_ref()
    }

    /// Sets the credential presented to the proxy.
    #[must_use]
    pub fn proxy_credential(mut self, credential: ProxyCredential) -> Self {
        self.proxy_credential = Some(credential);
        self
    }

    /// Removes the proxy credential.
    #[must_use]
    pub fn clear_proxy_credential(mut self) -> Self {
        self.proxy_credential = None;
        self
    }

    /// Builds the [`RequestOptions`].
    ///
    /// The builder is consumed, so built options cannot be affected by later
    /// changes to it; clone the builder first to derive several variants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if a timeout is zero.
    pub fn build(self) -> Result<RequestOptions, ConfigError> {
        validate_timeout("connect_timeout", self.connect_timeout)?;
        validate_timeout("read_timeout", self.read_timeout)?;
        Ok(self.freeze())
    }

    fn freeze(self) -> RequestOptions {
        RequestOptions {
            api_key: self.api_key,
            client_id: self.client_id,
            idempotency_key: self.idempotency_key,
            seamlesspay_account: self.seamlesspay_account,
            api_version: ApiVersion::latest(),
            version_override: self.version_override,
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
            max_network_retries: self.max_network_retries,
            connection_proxy: self.connection_proxy,
            proxy_credential: self.proxy_credential,
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}
