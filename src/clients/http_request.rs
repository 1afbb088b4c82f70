//! HTTP request descriptor for the SeamlessPay API SDK.
//!
//! This module provides the [`ApiRequest`] type and its builder. A request is
//! fully assembled and validated when it is built: the URL is absolute, the
//! credential is present, and every header the transport will send is in
//! place. It is never mutated afterwards.

use std::fmt;

use serde::Serialize;

use crate::clients::errors::InvalidHttpRequestError;
use crate::clients::http_headers::HttpHeaders;
use crate::config::RequestOptions;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP methods supported by the SeamlessPay API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for methods whose parameters travel in the query string.
    #[must_use]
    pub const fn uses_query_params(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request body together with its content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpContent {
    bytes: Vec<u8>,
    content_type: String,
}

impl HttpContent {
    /// Creates content from raw bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// Serializes `value` as an `application/json` body.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::Serialization`] if `value` cannot be
    /// represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, InvalidHttpRequestError> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| InvalidHttpRequestError::Serialization(e.to_string()))?;
        Ok(Self::new(bytes, "application/json"))
    }

    /// Returns the body bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// A fully assembled request to the SeamlessPay API.
///
/// Use [`ApiRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::clients::{ApiRequest, HttpMethod};
/// use seamlesspay_api::{ApiKey, ClientDefaults, IdempotencyKey, RequestOptions};
///
/// let defaults = ClientDefaults::builder()
///     .api_key(ApiKey::new("sk_test").unwrap())
///     .build()
///     .unwrap();
/// let options = RequestOptions::builder(&defaults)
///     .idempotency_key(IdempotencyKey::new("order-1").unwrap())
///     .build()
///     .unwrap();
///
/// let request = ApiRequest::builder(HttpMethod::Get, "https://api.seamlesspay.com/charges")
///     .query_param("limit", "10")
///     .build(&options)
///     .unwrap();
///
/// assert_eq!(request.url().as_str(), "https://api.seamlesspay.com/charges?limit=10");
/// assert_eq!(request.headers().first_value("authorization"), Some("Bearer c2tfdGVzdA=="));
/// assert_eq!(request.headers().first_value("idempotency-key"), Some("order-1"));
/// ```
#[derive(Clone, Debug)]
pub struct ApiRequest {
    method: HttpMethod,
    url: reqwest::Url,
    headers: HttpHeaders,
    content: Option<HttpContent>,
    options: RequestOptions,
}

// Verify ApiRequest is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiRequest>();
};

impl ApiRequest {
    /// Creates a new builder for a request to the absolute `url`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, url)
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the absolute URL, including the query string.
    #[must_use]
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Returns every header that will be sent.
    #[must_use]
    pub const fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    /// Returns the body, if any.
    #[must_use]
    pub const fn content(&self) -> Option<&HttpContent> {
        self.content.as_ref()
    }

    /// Returns the options this request was built from.
    #[must_use]
    pub const fn options(&self) -> &RequestOptions {
        &self.options
    }
}

/// Builder for constructing [`ApiRequest`] instances.
#[derive(Clone, Debug)]
pub struct ApiRequestBuilder {
    method: HttpMethod,
    url: String,
    query: Vec<(String, String)>,
    headers: HttpHeaders,
    content: Option<HttpContent>,
}

impl ApiRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HttpHeaders::new(),
            content: None,
        }
    }

    /// Appends a query parameter. Keys and values are percent-encoded on build.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends every pair as a query parameter.
    #[must_use]
    pub fn query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Adds a caller header. Library headers set on build take precedence.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn content(mut self, content: HttpContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Builds the [`ApiRequest`] for the given options.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if no API key is available, the
    /// URL is not absolute, or a header is not valid HTTP.
    pub fn build(self, options: &RequestOptions) -> Result<ApiRequest, InvalidHttpRequestError> {
        let api_key = options
            .api_key()
            .ok_or(InvalidHttpRequestError::MissingApiKey)?;

        let url = build_url(&self.url, &self.query)?;
        let agent = match options.user_agent_prefix() {
            Some(prefix) => format!("{prefix} {}", user_agent()),
            None => user_agent(),
        };

        let mut headers = self
            .headers
            .with_replaced_header("Accept", "application/json")
            .with_replaced_header("Authorization", format!("Bearer {}", api_key.encoded()))
            .with_replaced_header("API-Version", options.effective_api_version().to_string())
            .with_replaced_header("User-Agent", agent)
            .with_replaced_header("X-SeamlessPay-Client-User-Agent", client_user_agent());
        if let Some(key) = options.idempotency_key() {
            let key: &str = key.as_ref();
            headers = headers.with_replaced_header("Idempotency-Key", key);
        }
        if let Some(account) = options.seamlesspay_account() {
            let account: &str = account.as_ref();
            headers = headers.with_replaced_header("SeamlessPay-Account", account);
        }

        validate_headers(&headers)?;

        Ok(ApiRequest {
            method: self.method,
            url,
            headers,
            content: self.content,
            options: options.clone(),
        })
    }
}

fn build_url(
    base: &str,
    query: &[(String, String)],
) -> Result<reqwest::Url, InvalidHttpRequestError> {
    let mut full = base.to_string();
    if !query.is_empty() {
        let encoded = query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        full.push(if base.contains('?') { '&' } else { '?' });
        full.push_str(&encoded);
    }

    reqwest::Url::parse(&full).map_err(|e| InvalidHttpRequestError::InvalidUrl {
        url: full.clone(),
        reason: e.to_string(),
    })
}

fn validate_headers(headers: &HttpHeaders) -> Result<(), InvalidHttpRequestError> {
    for (name, values) in headers.iter() {
        let invalid = || InvalidHttpRequestError::InvalidHeader {
            name: name.to_string(),
        };
        reqwest::header::HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        for value in values {
            reqwest::header::HeaderValue::from_str(value).map_err(|_| invalid())?;
        }
    }
    Ok(())
}

fn user_agent() -> String {
    format!("SeamlessPay/v2 RustBindings/{SDK_VERSION}")
}

fn client_user_agent() -> String {
    serde_json::json!({
        "bindings_version": SDK_VERSION,
        "lang": "rust",
        "lang_version": env!("CARGO_PKG_RUST_VERSION"),
        "os_name": std::env::consts::OS,
        "os_arch": std::env::consts::ARCH,
        "publisher": "seamlesspay",
    })
    .to_string()
}
