//! Case-insensitive, multi-valued HTTP header map.

use std::collections::HashMap;

/// HTTP headers keyed by lowercase name, each holding one or more values.
///
/// Lookups are case-insensitive. Values keep insertion order.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::clients::HttpHeaders;
///
/// let headers = HttpHeaders::new()
///     .with_header("Request-Id", "req_123")
///     .with_header("Vary", "Accept")
///     .with_header("vary", "Origin");
///
/// assert_eq!(headers.first_value("request-id"), Some("req_123"));
/// assert_eq!(headers.all_values("VARY"), ["Accept", "Origin"]);
/// assert_eq!(headers.joined_value("vary").as_deref(), Some("Accept,Origin"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    map: HashMap<String, Vec<String>>,
}

impl HttpHeaders {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `value` appended under `name`.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    /// Returns a copy with `value` replacing any existing values under `name`.
    #[must_use]
    pub fn with_replaced_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.map
            .insert(name.as_ref().to_lowercase(), vec![value.into()]);
        self
    }

    /// Appends `value` under `name`.
    pub fn append(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.map
            .entry(name.as_ref().to_lowercase())
            .or_default()
            .push(value.into());
    }

    /// Returns the first value for `name`, if any.
    #[must_use]
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value for `name`, empty if the header is absent.
    #[must_use]
    pub fn all_values(&self, name: &str) -> &[String] {
        self.map
            .get(&name.to_lowercase())
            .map_or(&[][..], Vec::as_slice)
    }

    /// Returns the values for `name` joined with `,`, as sent on the wire.
    #[must_use]
    pub fn joined_value(&self, name: &str) -> Option<String> {
        self.map
            .get(&name.to_lowercase())
            .filter(|values| !values.is_empty())
            .map(|values| values.join(","))
    }

    /// Returns `true` if `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_lowercase())
    }

    /// Iterates over header names and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.map
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Returns the number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Collects response headers; values that are not valid UTF-8 are skipped.
    pub(crate) fn from_header_map(headers: &reqwest::header::HeaderMap) -> Self {
        let mut result = Self::new();
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                result.append(name.as_str(), value);
            }
        }
        result
    }
}
