//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that normalize
//! and validate their contents on construction. Every string option is trimmed;
//! a value that is empty after trimming is rejected with a
//! [`ConfigError::EmptyOption`] naming the option.

use crate::error::{ConfigError, MAX_IDEMPOTENCY_KEY_LENGTH};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

/// Trims `value` and rejects an empty result.
fn normalize(field: &'static str, value: impl Into<String>) -> Result<String, ConfigError> {
    let value = value.into();
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ConfigError::EmptyOption { field });
    }
    Ok(normalized.to_string())
}

/// A validated SeamlessPay API key.
///
/// The key is trimmed on construction and stored base64-encoded; the raw
/// secret is not retained. The `Debug` implementation masks the value.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::ApiKey;
///
/// let key = ApiKey::new("  sk_test  ").unwrap();
/// assert_eq!(key.encoded(), "c2tfdGVzdA==");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyOption`] if the key is empty after trimming.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let normalized = normalize("api_key", key)?;
        Ok(Self(STANDARD.encode(normalized.as_bytes())))
    }

    /// Returns the encoded form used on the wire.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated client identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyOption`] if the identifier is empty after trimming.
    pub fn new(client_id: impl Into<String>) -> Result<Self, ConfigError> {
        normalize("client_id", client_id).map(Self)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated idempotency key.
///
/// Keys are trimmed and must be between 1 and 255 characters long.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::{ConfigError, IdempotencyKey};
///
/// assert!(IdempotencyKey::new("a".repeat(255)).is_ok());
/// assert_eq!(
///     IdempotencyKey::new("a".repeat(256)),
///     Err(ConfigError::IdempotencyKeyTooLong { length: 256 })
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Creates a new validated idempotency key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyOption`] if the key is empty after trimming,
    /// or [`ConfigError::IdempotencyKeyTooLong`] if it exceeds 255 characters.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let normalized = normalize("idempotency_key", key)?;
        let length = normalized.chars().count();
        if length > MAX_IDEMPOTENCY_KEY_LENGTH {
            return Err(ConfigError::IdempotencyKeyTooLong { length });
        }
        Ok(Self(normalized))
    }
}

impl AsRef<str> for IdempotencyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated SeamlessPay account identifier, used to act on behalf of
/// another account.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    /// Creates a new validated account identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyOption`] if the identifier is empty after trimming.
    pub fn new(account: impl Into<String>) -> Result<Self, ConfigError> {
        normalize("seamlesspay_account", account).map(Self)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated endpoint URL, used for the API base and for proxies.
///
/// The URL must carry an alphabetic scheme and a non-empty host. A trailing
/// slash is removed so that paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::EndpointUrl;
///
/// let url = EndpointUrl::new("https://api.seamlesspay.dev/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.seamlesspay.dev");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("api.seamlesspay.dev"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EndpointUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::for_field("endpoint", url)
    }

    /// The production API base, `https://api.seamlesspay.com`.
    pub(crate) fn live_api_base() -> Self {
        let url = super::LIVE_API_BASE.to_string();
        Self {
            scheme_end: 5,
            host_start: 8,
            host_end: url.len(),
            url,
        }
    }

    pub(crate) fn for_field(field: &'static str, url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidUrl {
            field,
            url: url.clone(),
        };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // Skip userinfo when present
        let remainder = &url[host_start..];
        let authority_end = remainder
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        let host_start = url[host_start..authority_end]
            .rfind('@')
            .map_or(host_start, |i| host_start + i + 1);

        let host_end = url[host_start..authority_end]
            .find(':')
            .map_or(authority_end, |i| host_start + i);
        if host_start == host_end || url[host_start..host_end].contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Credentials presented to an authenticating proxy.
///
/// The password is masked in `Debug` output.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ProxyCredential {
    username: String,
    password: String,
}

impl ProxyCredential {
    /// Creates a new proxy credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyOption`] if the username is empty after trimming.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            username: normalize("proxy_username", username)?,
            password: password.into(),
        })
    }

    /// Returns the proxy username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the proxy password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for ProxyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCredential")
            .field("username", &self.username)
            .field("password", &"*****")
            .finish()
    }
}
