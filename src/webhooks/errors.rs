//! Error types for decoding webhook events.
//!
//! # Example
//!
//! ```rust
//! use seamlesspay_api::webhooks::{Event, WebhookError};
//!
//! let error = Event::from_json("[1, 2]").unwrap_err();
//! assert!(matches!(error, WebhookError::NotAnObject { found: "array" }));
//!
//! let error = Event::from_json("{").unwrap_err();
//! assert!(matches!(error, WebhookError::Json(_)));
//! ```

use thiserror::Error;

/// Errors raised while assembling an event payload.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The payload root, or a present `object` member, was not a JSON object.
    #[error("Event payload must be a JSON object, found {found}")]
    NotAnObject {
        /// The JSON kind that was found instead.
        found: &'static str,
    },

    /// The `object` payload has no string `object` member naming its type.
    #[error("Event payload object has no string \"object\" discriminator")]
    MissingDiscriminator,

    /// A registered type failed to decode its payload.
    #[error("Failed to decode event object of type '{discriminator}': {source}")]
    Deserialize {
        /// The discriminator that selected the type.
        discriminator: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The input was not valid JSON or did not match the event envelope.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Names the kind of a JSON value for error messages.
pub(crate) const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
