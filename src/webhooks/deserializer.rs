//! Assembly of [`EventData`] from a raw `data` member.

use serde_json::Value;

use super::decoded::decode_object;
use super::errors::{json_kind, WebhookError};
use super::registry::TypeRegistry;
use super::types::{EventData, EventObject, RawJsonObject};

/// Builds [`EventData`] by dispatching the payload on its discriminator.
///
/// Recognized members of `data`:
///
/// - `object`: when present, must be an object with a string `object`
///   member. A registered discriminator decodes into its type, any other
///   into [`EventObject::Raw`].
/// - `previous_attributes`: `null` means absent, an object is decoded, any
///   other kind is ignored.
///
/// Other members are ignored.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::webhooks::{EventDataDeserializer, TypeRegistry};
/// use serde_json::json;
///
/// let registry = TypeRegistry::new();
/// let data = EventDataDeserializer::with_registry(&registry)
///     .deserialize(&json!({"object": {"object": "charge", "id": "TR_1"}}))
///     .unwrap();
///
/// // Nothing is registered, so even a charge stays raw
/// assert!(data.object.unwrap().as_raw().is_some());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EventDataDeserializer<'a> {
    registry: &'a TypeRegistry,
}

impl Default for EventDataDeserializer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDataDeserializer<'static> {
    /// Uses the built-in [`TypeRegistry::global`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::global(),
        }
    }
}

impl<'a> EventDataDeserializer<'a> {
    /// Uses an explicitly built registry.
    #[must_use]
    pub const fn with_registry(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Assembles event data from the JSON `data` member.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::NotAnObject`] if `value`, or an `object` member that
    ///   is present, is not a JSON object
    /// - [`WebhookError::MissingDiscriminator`] if the payload has no string
    ///   `object` member
    /// - [`WebhookError::Deserialize`] if the registered type rejects the
    ///   payload
    pub fn deserialize(&self, value: &Value) -> Result<EventData, WebhookError> {
        let Value::Object(members) = value else {
            return Err(WebhookError::NotAnObject {
                found: json_kind(value),
            });
        };

        let previous_attributes = match members.get("previous_attributes") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(decode_object(map)),
            Some(other) => {
                tracing::warn!(
                    kind = json_kind(other),
                    "Ignoring previous_attributes that is not an object"
                );
                None
            }
        };

        let (discriminator, object) = match members.get("object") {
            None => (None, None),
            Some(Value::Object(payload)) => {
                let (discriminator, object) = self.dispatch(payload)?;
                (Some(discriminator), Some(object))
            }
            Some(other) => {
                return Err(WebhookError::NotAnObject {
                    found: json_kind(other),
                })
            }
        };

        Ok(EventData {
            discriminator,
            object,
            previous_attributes,
        })
    }

    fn dispatch(
        &self,
        payload: &serde_json::Map<String, Value>,
    ) -> Result<(String, EventObject), WebhookError> {
        let discriminator = payload
            .get("object")
            .and_then(Value::as_str)
            .ok_or(WebhookError::MissingDiscriminator)?
            .to_string();

        let object = match self.registry.lookup(&discriminator) {
            Some(factory) => factory(Value::Object(payload.clone())).map_err(|source| {
                WebhookError::Deserialize {
                    discriminator: discriminator.clone(),
                    source,
                }
            })?,
            None => {
                tracing::debug!(
                    discriminator = %discriminator,
                    "No registered type for event object, keeping raw JSON"
                );
                EventObject::Raw(RawJsonObject::from_map(payload))
            }
        };

        Ok((discriminator, object))
    }
}
