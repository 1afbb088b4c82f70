//! Webhook event types.
//!
//! An [`Event`] is the envelope the API posts to a webhook endpoint. Its
//! [`EventData`] carries the affected object, decoded into a concrete
//! resource when its discriminator is registered and kept as a
//! [`RawJsonObject`] otherwise.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::rest::resources::{Charge, Invoice, Quote};

use super::decoded::{decode_object, DecodedValue};
use super::deserializer::EventDataDeserializer;
use super::errors::WebhookError;

/// A payload object whose type is not registered.
///
/// Members stay reachable through [`get`](Self::get).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawJsonObject {
    members: HashMap<String, DecodedValue>,
}

impl RawJsonObject {
    /// Decodes every member of a JSON object.
    #[must_use]
    pub fn from_map(map: &serde_json::Map<String, Value>) -> Self {
        Self {
            members: decode_object(map),
        }
    }

    /// Looks up a member.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DecodedValue> {
        self.members.get(key)
    }

    /// The discriminator, if the object carries one.
    #[must_use]
    pub fn object(&self) -> Option<&str> {
        self.get("object").and_then(DecodedValue::as_str)
    }

    /// All members.
    #[must_use]
    pub const fn members(&self) -> &HashMap<String, DecodedValue> {
        &self.members
    }
}

impl Serialize for RawJsonObject {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.members.serialize(serializer)
    }
}

/// The object an event is about.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventObject {
    /// A `charge` payload.
    Charge(Box<Charge>),
    /// An `invoice` payload.
    Invoice(Box<Invoice>),
    /// A `quote` payload.
    Quote(Box<Quote>),
    /// A payload of any other type.
    Raw(RawJsonObject),
}

impl EventObject {
    /// Returns the charge, if this is one.
    #[must_use]
    pub fn as_charge(&self) -> Option<&Charge> {
        match self {
            Self::Charge(charge) => Some(charge),
            _ => None,
        }
    }

    /// Returns the invoice, if this is one.
    #[must_use]
    pub fn as_invoice(&self) -> Option<&Invoice> {
        match self {
            Self::Invoice(invoice) => Some(invoice),
            _ => None,
        }
    }

    /// Returns the quote, if this is one.
    #[must_use]
    pub fn as_quote(&self) -> Option<&Quote> {
        match self {
            Self::Quote(quote) => Some(quote),
            _ => None,
        }
    }

    /// Returns the raw object, if the type was not registered.
    #[must_use]
    pub const fn as_raw(&self) -> Option<&RawJsonObject> {
        match self {
            Self::Raw(raw) => Some(raw),
            _ => None,
        }
    }
}

/// The `data` member of an event.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventData {
    /// The `object` tag of the payload, e.g. `"charge"`.
    #[serde(skip)]
    pub discriminator: Option<String>,
    /// The decoded payload, `None` when `data` has no `object` member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<EventObject>,
    /// Values of changed attributes before the event, for update events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_attributes: Option<HashMap<String, DecodedValue>>,
}

impl<'de> Deserialize<'de> for EventData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        EventDataDeserializer::new()
            .deserialize(&value)
            .map_err(serde::de::Error::custom)
    }
}

/// Identifies the API request that caused an event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    /// Id of the request, `None` for automatic events.
    #[serde(default)]
    pub id: Option<String>,
    /// Idempotency key the request was sent with.
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// A webhook event envelope.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::webhooks::Event;
///
/// let event = Event::from_json(r#"{
///     "id": "evt_1",
///     "type": "charge.updated",
///     "data": {
///         "object": {"object": "charge", "id": "TR_1", "amount": 100},
///         "previous_attributes": {"amount": 50}
///     }
/// }"#).unwrap();
///
/// let charge = event.data.object.as_ref().and_then(|o| o.as_charge()).unwrap();
/// assert_eq!(charge.amount.as_ref().unwrap().as_str(), "100");
/// assert!(event.data.previous_attributes.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<String>,
    /// Event type, e.g. `charge.captured`.
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    /// Creation time in seconds since the epoch.
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub livemode: Option<bool>,
    #[serde(default)]
    pub api_version: Option<String>,
    /// Webhook deliveries still pending for this event.
    #[serde(default)]
    pub pending_webhooks: Option<i64>,
    #[serde(default)]
    pub request: Option<EventRequest>,
    pub data: EventData,
}

impl Event {
    /// Parses a webhook body using the built-in registry.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError`] if the body is not JSON, the `data` payload
    /// cannot be assembled, or a registered type fails to decode.
    pub fn from_json(body: &str) -> Result<Self, WebhookError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(&value, &EventDataDeserializer::new())
    }

    /// Parses a JSON event with an explicit deserializer.
    ///
    /// Use this with a custom [`TypeRegistry`](super::TypeRegistry) or when
    /// the body is already parsed.
    ///
    /// # Errors
    ///
    /// See [`from_json`](Self::from_json).
    pub fn from_value(
        value: &Value,
        data_deserializer: &EventDataDeserializer<'_>,
    ) -> Result<Self, WebhookError> {
        let Value::Object(envelope) = value else {
            return Err(WebhookError::NotAnObject {
                found: super::errors::json_kind(value),
            });
        };
        let data = match envelope.get("data") {
            Some(data) => data_deserializer.deserialize(data)?,
            None => return Err(WebhookError::NotAnObject { found: "null" }),
        };

        let mut rest = envelope.clone();
        rest.remove("data");
        let header: EventHeader = serde_json::from_value(Value::Object(rest))?;

        Ok(Self {
            id: header.id,
            event_type: header.event_type,
            created: header.created,
            livemode: header.livemode,
            api_version: header.api_version,
            pending_webhooks: header.pending_webhooks,
            request: header.request,
            data,
        })
    }
}

/// Envelope members other than `data`.
#[derive(Deserialize)]
struct EventHeader {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default)]
    event_type: Option<String>,
    #[serde(default)]
    created: Option<i64>,
    #[serde(default)]
    livemode: Option<bool>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    pending_webhooks: Option<i64>,
    #[serde(default)]
    request: Option<EventRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_envelope_fields() {
        let event = Event::from_value(
            &json!({
                "id": "evt_1",
                "type": "invoice.created",
                "created": 1_700_000_000,
                "livemode": false,
                "api_version": "v2",
                "pending_webhooks": 1,
                "request": {"id": "req_1", "idempotency_key": "idem"},
                "data": {"object": {"object": "invoice", "id": "in_123"}}
            }),
            &EventDataDeserializer::new(),
        )
        .unwrap();

        assert_eq!(event.event_type.as_deref(), Some("invoice.created"));
        assert_eq!(event.pending_webhooks, Some(1));
        assert_eq!(
            event.request.unwrap().idempotency_key.as_deref(),
            Some("idem")
        );
        assert_eq!(event.data.discriminator.as_deref(), Some("invoice"));
        assert_eq!(
            event
                .data
                .object
                .as_ref()
                .and_then(EventObject::as_invoice)
                .unwrap()
                .id
                .as_deref(),
            Some("in_123")
        );
    }

    #[test]
    fn test_serde_path_matches_from_json() {
        let body = r#"{"id": "evt_2", "data": {"object": {"object": "quote", "id": "qt_1"}}}"#;
        let via_serde: Event = serde_json::from_str(body).unwrap();
        assert_eq!(via_serde, Event::from_json(body).unwrap());
    }

    #[test]
    fn test_envelope_must_be_object() {
        let error = Event::from_value(&json!("evt"), &EventDataDeserializer::new()).unwrap_err();
        assert!(matches!(error, WebhookError::NotAnObject { found: "string" }));
    }

    #[test]
    fn test_event_without_payload_object_serializes_without_it() {
        let event = Event::from_json(r#"{"id": "evt_3", "data": {"previous_attributes": {"a": 1}}}"#)
            .unwrap();
        assert!(event.data.object.is_none());
        let encoded = serde_json::to_value(&event).unwrap();
        assert_eq!(encoded["data"], json!({"previous_attributes": {"a": 1}}));
    }

    #[test]
    fn test_raw_object_serializes_members() {
        let raw = RawJsonObject::from_map(json!({"object": "payout", "x": 1}).as_object().unwrap());
        assert_eq!(raw.object(), Some("payout"));
        assert_eq!(
            serde_json::to_value(EventObject::Raw(raw)).unwrap(),
            json!({"object": "payout", "x": 1})
        );
    }
}
