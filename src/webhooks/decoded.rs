//! Generic JSON tree decoder.
//!
//! [`decode`] turns an arbitrary `serde_json::Value` into a [`DecodedValue`],
//! an explicit tagged union that callers can match exhaustively. Numbers keep
//! their integer or floating point representation.

use std::collections::HashMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// A JSON number in the representation it was written with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// A signed integer.
    Integer(i64),
    /// An integer too large for `i64`.
    Unsigned(u64),
    /// A floating point number.
    Float(f64),
}

impl Number {
    /// Returns the value as `f64`, possibly losing precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(i) => i as f64,
            Self::Unsigned(u) => u as f64,
            Self::Float(f) => f,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(i) => Some(i),
            Self::Unsigned(u) => i64::try_from(u).ok(),
            Self::Float(_) => None,
        }
    }

    fn to_json(self) -> Value {
        match self {
            Self::Integer(i) => Value::from(i),
            Self::Unsigned(u) => Value::from(u),
            // Non-finite floats have no JSON form
            Self::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        }
    }
}

/// A decoded JSON node.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedValue {
    /// JSON `null`.
    Null,
    /// JSON `true` / `false`.
    Bool(bool),
    /// A JSON number.
    Number(Number),
    /// A JSON string.
    String(String),
    /// A JSON array, in order.
    List(Vec<DecodedValue>),
    /// A JSON object. Key order is not preserved.
    Map(HashMap<String, DecodedValue>),
}

impl DecodedValue {
    /// Returns `true` for [`DecodedValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list, if this is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the map, if this is one.
    #[must_use]
    pub const fn as_map(&self) -> Option<&HashMap<String, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if this is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Re-encodes this tree as JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => n.to_json(),
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&Value> for DecodedValue {
    fn from(value: &Value) -> Self {
        decode(value)
    }
}

/// Decodes a JSON tree.
///
/// Total over every JSON kind. A number that fits none of the supported
/// representations decodes as [`DecodedValue::Null`] and logs a warning;
/// the rest of the document is still decoded.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::webhooks::{decode, DecodedValue, Number};
/// use serde_json::json;
///
/// let decoded = decode(&json!({"amount": 100, "tags": ["a"], "paid": true}));
///
/// assert_eq!(decoded.get("amount"), Some(&DecodedValue::Number(Number::Integer(100))));
/// assert_eq!(decoded.get("paid").and_then(DecodedValue::as_bool), Some(true));
/// assert_eq!(decoded.to_json(), json!({"amount": 100, "tags": ["a"], "paid": true}));
/// ```
#[must_use]
pub fn decode(value: &Value) -> DecodedValue {
    match value {
        Value::Null => DecodedValue::Null,
        Value::Bool(b) => DecodedValue::Bool(*b),
        Value::Number(n) => decode_number(n),
        Value::String(s) => DecodedValue::String(s.clone()),
        Value::Array(items) => DecodedValue::List(items.iter().map(decode).collect()),
        Value::Object(map) => DecodedValue::Map(decode_object(map)),
    }
}

/// Decodes every member of a JSON object.
#[must_use]
pub fn decode_object(map: &serde_json::Map<String, Value>) -> HashMap<String, DecodedValue> {
    map.iter()
        .map(|(key, value)| (key.clone(), decode(value)))
        .collect()
}

fn decode_number(number: &serde_json::Number) -> DecodedValue {
    if let Some(i) = number.as_i64() {
        DecodedValue::Number(Number::Integer(i))
    } else if let Some(u) = number.as_u64() {
        DecodedValue::Number(Number::Unsigned(u))
    } else if let Some(f) = number.as_f64() {
        DecodedValue::Number(Number::Float(f))
    } else {
        tracing::warn!(
            number = %number,
            "Unrecognized JSON number representation, decoding as null"
        );
        DecodedValue::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_primitives() {
        assert_eq!(decode(&json!(null)), DecodedValue::Null);
        assert_eq!(decode(&json!(true)), DecodedValue::Bool(true));
        assert_eq!(decode(&json!("s")), DecodedValue::String("s".to_string()));
        assert_eq!(
            decode(&json!(-7)),
            DecodedValue::Number(Number::Integer(-7))
        );
        assert_eq!(
            decode(&json!(u64::MAX)),
            DecodedValue::Number(Number::Unsigned(u64::MAX))
        );
        assert_eq!(
            decode(&json!(1.5)),
            DecodedValue::Number(Number::Float(1.5))
        );
    }

    #[test]
    fn test_decode_keeps_list_order() {
        let decoded = decode(&json!([3, "two", null]));
        let items = decoded.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_number().and_then(|n| n.as_i64()), Some(3));
        assert_eq!(items[1].as_str(), Some("two"));
        assert!(items[2].is_null());
    }

    #[test]
    fn test_decode_nested_objects() {
        let decoded = decode(&json!({"order": {"items": [{"sku": "A"}]}}));
        let sku = decoded
            .get("order")
            .and_then(|order| order.get("items"))
            .and_then(DecodedValue::as_list)
            .and_then(|items| items.first())
            .and_then(|item| item.get("sku"))
            .and_then(DecodedValue::as_str);
        assert_eq!(sku, Some("A"));
    }

    #[test]
    fn test_decode_then_reencode_preserves_document() {
        let document = json!({
            "id": "evt_1",
            "livemode": false,
            "amount": 100,
            "fee": 0.3,
            "big": u64::MAX,
            "tags": ["a", "b", ["nested", 1]],
            "meta": {"empty": {}, "list": [], "none": null}
        });
        assert_eq!(decode(&document).to_json(), document);
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let decoded = decode(&json!({"a": [1, 2.5, "x"]}));
        assert_eq!(serde_json::to_value(&decoded).unwrap(), decoded.to_json());
    }

    #[test]
    fn test_accessors_on_wrong_kind_return_none() {
        let decoded = DecodedValue::String("x".to_string());
        assert!(decoded.as_bool().is_none());
        assert!(decoded.as_number().is_none());
        assert!(decoded.as_list().is_none());
        assert!(decoded.as_map().is_none());
        assert!(decoded.get("x").is_none());
    }

    #[test]
    fn test_non_finite_float_reencodes_as_null() {
        assert_eq!(
            DecodedValue::Number(Number::Float(f64::NAN)).to_json(),
            Value::Null
        );
    }
}
