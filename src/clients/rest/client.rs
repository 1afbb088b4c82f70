//! REST client implementation for the SeamlessPay API.
//!
//! This module provides the [`RestClient`] type, which turns a path and a
//! set of parameters into an [`ApiRequest`], sends it through the retrying
//! transport and deserializes the response.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::rest::RestError;
use crate::clients::{
    ApiRequest, ApiResponse, ApiResponseStream, HttpClient, HttpContent, HttpMethod,
    InvalidHttpRequestError,
};
use crate::config::{ClientDefaults, RequestOptions};

/// REST API client for SeamlessPay.
///
/// Parameters of GET and DELETE requests are flattened into the query
/// string (`metadata[key]=value`, `items[0]=value`); parameters of POST and
/// PUT requests are sent as a JSON body.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use seamlesspay_api::clients::{HttpMethod, RestClient};
/// use seamlesspay_api::{ApiKey, ClientDefaults};
///
/// let defaults = ClientDefaults::builder()
///     .api_key(ApiKey::new("sk_test").unwrap())
///     .build()?;
/// let client = RestClient::new(defaults);
///
/// let charge: serde_json::Value = client
///     .request(HttpMethod::Get, "/charges/TR_123", None::<&()>, None)
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    http_client: HttpClient,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client using the given defaults.
    #[must_use]
    pub const fn new(defaults: ClientDefaults) -> Self {
        Self {
            http_client: HttpClient::new(defaults),
        }
    }

    /// Returns the defaults this client was created with.
    #[must_use]
    pub const fn defaults(&self) -> &ClientDefaults {
        self.http_client.defaults()
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the absolute URL for `path` under the configured API base.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let base = self.defaults().api_base().as_ref();
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Sends a request and deserializes the JSON response into `T`.
    ///
    /// When `options` is `None` the client defaults are used.
    ///
    /// # Errors
    ///
    /// Returns the [`RestError`] variant matching a non-2xx status,
    /// [`RestError::InvalidResponse`] if a 2xx body does not match `T`, or
    /// [`RestError::Http`] for transport failures.
    pub async fn request<T, P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
        options: Option<&RequestOptions>,
    ) -> Result<T, RestError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self.request_raw(method, path, params, options).await?;
        response.json().map_err(|e| RestError::InvalidResponse {
            status: response.code,
            message: e.to_string(),
            body: response.body.clone(),
        })
    }

    /// Sends a request and returns the buffered 2xx response.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn request_raw<P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse, RestError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, params, options)?;
        let response = self.http_client.request_with_retries(&request).await?;
        if response.is_ok() {
            Ok(response)
        } else {
            Err(RestError::from_response(&response))
        }
    }

    /// Sends a request and returns the 2xx response with its body unread.
    ///
    /// A non-2xx response is drained and mapped to a [`RestError`].
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn request_stream<P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponseStream, RestError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, params, options)?;
        let mut stream = self.http_client.request_stream_with_retries(&request).await?;
        if stream.is_ok() {
            return Ok(stream);
        }
        let response = stream
            .unstream()
            .await
            .map_err(crate::clients::HttpError::from)?;
        Err(RestError::from_response(&response))
    }

    fn build_request<P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiRequest, RestError>
    where
        P: Serialize + ?Sized,
    {
        let defaults_options;
        let options = if let Some(options) = options {
            options
        } else {
            defaults_options = RequestOptions::from_defaults(self.defaults());
            &defaults_options
        };

        let params = params
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| InvalidHttpRequestError::Serialization(e.to_string()))?
            .filter(|value| !value.is_null());

        let mut builder = ApiRequest::builder(method, self.url_for(path));
        if let Some(params) = params {
            if method.uses_query_params() {
                builder = builder.query_params(flatten_params(&params)?);
            } else {
                builder = builder.content(HttpContent::json(&params)?);
            }
        }

        Ok(builder.build(options)?)
    }
}

/// Flattens a parameter object into `key[nested]=value` query pairs.
pub(crate) fn flatten_params(
    params: &Value,
) -> Result<Vec<(String, String)>, InvalidHttpRequestError> {
    let Value::Object(map) = params else {
        return Err(InvalidHttpRequestError::Serialization(
            "request parameters must serialize to a JSON object".to_string(),
        ));
    };
    let mut pairs = Vec::new();
    for (key, value) in map {
        flatten_into(key.clone(), value, &mut pairs);
    }
    Ok(pairs)
}

fn flatten_into(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(format!("{key}[{index}]"), item, pairs);
            }
        }
        Value::Object(map) => {
            for (name, item) in map {
                flatten_into(format!("{key}[{name}]"), item, pairs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, EndpointUrl};
    use serde_json::json;

    fn client() -> RestClient {
        RestClient::new(
            ClientDefaults::builder()
                .api_key(ApiKey::new("sk_test").unwrap())
                .api_base(EndpointUrl::new("https://api.seamlesspay.dev/").unwrap())
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_url_for_joins_base_and_path() {
        let client = client();
        assert_eq!(client.url_for("/charges"), "https://api.seamlesspay.dev/charges");
        assert_eq!(client.url_for("v1/quotes"), "https://api.seamlesspay.dev/v1/quotes");
    }

    #[test]
    fn test_flatten_nested_params() {
        let pairs = flatten_params(&json!({
            "amount": "100",
            "capture": true,
            "metadata": {"order": "A1"},
            "lineItems": [{"sku": "s1"}],
            "skipped": null
        }))
        .unwrap();

        assert!(pairs.contains(&("amount".to_string(), "100".to_string())));
        assert!(pairs.contains(&("capture".to_string(), "true".to_string())));
        assert!(pairs.contains(&("metadata[order]".to_string(), "A1".to_string())));
        assert!(pairs.contains(&("lineItems[0][sku]".to_string(), "s1".to_string())));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_flatten_rejects_non_object() {
        assert!(matches!(
            flatten_params(&json!([1, 2])),
            Err(InvalidHttpRequestError::Serialization(_))
        ));
    }

    #[test]
    fn test_get_params_go_to_query_string() {
        let request = client()
            .build_request(HttpMethod::Get, "/charges", Some(&json!({"page": 2})), None)
            .unwrap();
        assert_eq!(request.url().query(), Some("page=2"));
        assert!(request.content().is_none());
    }

    #[test]
    fn test_post_params_go_to_json_body() {
        let request = client()
            .build_request(HttpMethod::Post, "/charges", Some(&json!({"amount": "100"})), None)
            .unwrap();
        assert!(request.url().query().is_none());
        let content = request.content().unwrap();
        assert_eq!(content.content_type(), "application/json");
        assert_eq!(content.bytes(), br#"{"amount":"100"}"#);
    }

    #[test]
    fn test_missing_api_key_fails_before_sending() {
        let client = RestClient::new(ClientDefaults::default());
        let result = client.build_request(HttpMethod::Get, "/charges", None::<&Value>, None);
        assert!(matches!(result, Err(RestError::Authentication(_))));
    }
}
