//! Webhook event decoding.
//!
//! - [`Event`]: The envelope posted to a webhook endpoint
//! - [`EventData`]: The affected object plus previous attribute values
//! - [`EventDataDeserializer`]: Dispatches the payload on its `object` tag
//! - [`TypeRegistry`]: Maps tags to concrete types
//! - [`decode`]: Turns any JSON tree into a [`DecodedValue`]
//!
//! # Example
//!
//! ```rust
//! use seamlesspay_api::webhooks::{Event, EventObject};
//!
//! let body = r#"{
//!     "id": "evt_1",
//!     "type": "charge.captured",
//!     "data": {"object": {"object": "charge", "id": "TR_1", "status": "CAPTURED"}}
//! }"#;
//!
//! let event = Event::from_json(body).unwrap();
//! match &event.data.object {
//!     Some(EventObject::Charge(charge)) => {
//!         assert_eq!(charge.status.as_deref(), Some("CAPTURED"));
//!     }
//!     other => panic!("unexpected object {other:?}"),
//! }
//! ```

mod decoded;
mod deserializer;
mod errors;
mod registry;
mod types;

pub use decoded::{decode, decode_object, DecodedValue, Number};
pub use deserializer::EventDataDeserializer;
pub use errors::WebhookError;
pub use registry::{EventObjectFactory, TypeRegistry};
pub use types::{Event, EventData, EventObject, EventRequest, RawJsonObject};
