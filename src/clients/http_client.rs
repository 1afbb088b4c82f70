//! HTTP transport for SeamlessPay API communication.
//!
//! This module provides the [`HttpClient`] type, which executes an
//! [`ApiRequest`] and hands back the raw response. It never interprets the
//! status code; mapping statuses to errors is the job of
//! [`RestClient`](crate::clients::RestClient).

use std::time::Duration;

use rand::Rng;

use crate::clients::errors::{ApiConnectionError, HttpError};
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::{ApiResponse, ApiResponseStream};
use crate::config::{ClientDefaults, RequestOptions};

/// Delay before the first retry.
pub const INITIAL_NETWORK_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Upper bound for the computed backoff between retries.
pub const MAX_NETWORK_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Longest `Retry-After` value that is honoured on a 429 response.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// HTTP transport for the SeamlessPay API.
///
/// Each call uses the transport settings carried by the request's
/// [`RequestOptions`]: connect timeout, read timeout and proxy. Proxy
/// credentials are attached to the connection itself, so requests through
/// different proxies never share authentication state.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use seamlesspay_api::clients::{ApiRequest, HttpClient, HttpMethod};
/// use seamlesspay_api::{ApiKey, ClientDefaults, RequestOptions};
///
/// let defaults = ClientDefaults::builder()
///     .api_key(ApiKey::new("sk_test").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(defaults.clone());
///
/// let request = ApiRequest::builder(HttpMethod::Get, "https://api.seamlesspay.com/charges")
///     .build(&RequestOptions::from_defaults(&defaults))
///     .unwrap();
///
/// let response = client.request(&request).await?;
/// println!("{} {}", response.code, response.body);
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    defaults: ClientDefaults,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new transport using the given defaults.
    #[must_use]
    pub const fn new(defaults: ClientDefaults) -> Self {
        Self { defaults }
    }

    /// Returns the defaults this transport was created with.
    #[must_use]
    pub const fn defaults(&self) -> &ClientDefaults {
        &self.defaults
    }

    /// Sends the request once and returns the response with an unread body.
    ///
    /// Both 2xx and non-2xx responses are returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Connection`] if connecting, sending or reading
    /// the status fails. The error names the configured API base.
    pub async fn request_stream(&self, request: &ApiRequest) -> Result<ApiResponseStream, HttpError> {
        let api_base = self.defaults.api_base().to_string();
        let client = self
            .build_client(request.options())
            .map_err(|e| ApiConnectionError::from_reqwest(api_base.clone(), e))?;

        let mut builder = client.request(reqwest_method(request.method()), request.url().clone());
        let headers = request.headers();
        for (name, _) in headers.iter() {
            if let Some(value) = headers.joined_value(name) {
                builder = builder.header(name, value);
            }
        }
        if let Some(content) = request.content() {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, content.content_type())
                .body(content.bytes().to_vec());
        }

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "Sending request to SeamlessPay"
        );

        let response = builder
            .send()
            .await
            .map_err(|e| ApiConnectionError::from_reqwest(api_base, e))?;

        let stream = ApiResponseStream::from_network(response);
        tracing::debug!(
            status = stream.code,
            request_id = stream.request_id().unwrap_or_default(),
            "Received response from SeamlessPay"
        );
        Ok(stream)
    }

    /// Sends the request once and buffers the whole body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Connection`] if the API cannot be reached, or
    /// [`HttpError::Stream`] if the body cannot be read.
    pub async fn request(&self, request: &ApiRequest) -> Result<ApiResponse, HttpError> {
        let mut stream = self.request_stream(request).await?;
        Ok(stream.unstream().await?)
    }

    /// Sends the request, retrying connectivity failures and 429/5xx responses.
    ///
    /// The request is retried at most `max_network_retries` times, as set on
    /// its options. Every attempt replays the same request, including its
    /// idempotency key. The returned stream records how many retries were
    /// made.
    ///
    /// Backoff starts at [`INITIAL_NETWORK_RETRY_DELAY`] and doubles up to
    /// [`MAX_NETWORK_RETRY_DELAY`], with random jitter. A 429 response with a
    /// `Retry-After` header waits for that long instead, up to
    /// [`MAX_RETRY_AFTER`].
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt.
    pub async fn request_stream_with_retries(
        &self,
        request: &ApiRequest,
    ) -> Result<ApiResponseStream, HttpError> {
        let max_retries = request.options().max_network_retries();
        let mut retries: u32 = 0;

        loop {
            let result = self.request_stream(request).await;

            let retry_after = match &result {
                Ok(stream) if should_retry_status(stream.code) => {
                    Some(retry_after_header(stream.code, stream.headers.first_value("retry-after")))
                }
                Err(HttpError::Connection(_)) => Some(None),
                _ => None,
            };

            let Some(retry_after) = retry_after.filter(|_| retries < max_retries) else {
                return result.map(|mut stream| {
                    stream.num_retries = retries;
                    stream
                });
            };

            retries += 1;
            let delay = retry_after.unwrap_or_else(|| backoff_delay(retries));
            match result {
                Ok(mut stream) => {
                    tracing::warn!(
                        status = stream.code,
                        retry = retries,
                        max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Retrying request after retryable status"
                    );
                    stream.close();
                }
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        retry = retries,
                        max_retries,
                        "Retrying request after connection failure"
                    );
                }
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// Like [`request_stream_with_retries`](Self::request_stream_with_retries),
    /// but buffers the body of the final response.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt, or [`HttpError::Stream`] if the
    /// final body cannot be read.
    pub async fn request_with_retries(&self, request: &ApiRequest) -> Result<ApiResponse, HttpError> {
        let mut stream = self.request_stream_with_retries(request).await?;
        Ok(stream.unstream().await?)
    }

    fn build_client(&self, options: &RequestOptions) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(options.connect_timeout())
            .read_timeout(options.read_timeout());

        builder = match options.connection_proxy() {
            Some(proxy_url) => {
                let mut proxy = reqwest::Proxy::all(proxy_url.as_ref())?;
                if let Some(credential) = options.proxy_credential() {
                    proxy = proxy.basic_auth(credential.username(), credential.password());
                }
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        builder.build()
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

const fn should_retry_status(code: u16) -> bool {
    code == 429 || code >= 500
}

/// Reads `Retry-After` (whole or fractional seconds) on 429 responses only.
fn retry_after_header(code: u16, value: Option<&str>) -> Option<Duration> {
    if code != 429 {
        return None;
    }
    let seconds = value?.trim().parse::<f64>().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(Duration::from_secs_f64(seconds)).filter(|delay| *delay <= MAX_RETRY_AFTER)
}

fn backoff_delay(retry: u32) -> Duration {
    let exponent = retry.saturating_sub(1).min(16);
    let delay = INITIAL_NETWORK_RETRY_DELAY
        .saturating_mul(2u32.pow(exponent))
        .min(MAX_NETWORK_RETRY_DELAY);
    // Jitter between 50% and 100% of the delay
    let jitter = rand::thread_rng().gen_range(0.5..=1.0);
    delay.mul_f64(jitter)
}
