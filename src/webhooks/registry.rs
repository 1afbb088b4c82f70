//! Discriminator to type registry for event payloads.
//!
//! The API tags every payload object with an `object` string such as
//! `"charge"`. A [`TypeRegistry`] maps that tag to a factory that decodes the
//! payload into the matching [`EventObject`] variant.
//!
//! # Example
//!
//! ```rust
//! use seamlesspay_api::webhooks::{EventObject, TypeRegistry};
//! use serde_json::json;
//!
//! let registry = TypeRegistry::global();
//! let factory = registry.lookup("charge").unwrap();
//! let object = factory(json!({"object": "charge", "id": "TR_1"})).unwrap();
//! assert!(matches!(object, EventObject::Charge(_)));
//!
//! assert!(registry.lookup("payout").is_none());
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;

use crate::rest::resources::{Charge, Invoice, Quote};
use crate::rest::ApiResource;

use super::types::EventObject;

/// Decodes a payload object into an [`EventObject`].
pub type EventObjectFactory = fn(Value) -> Result<EventObject, serde_json::Error>;

/// Maps discriminator strings to payload factories.
///
/// Build a custom registry with [`register`](Self::register) before handing
/// it to an [`EventDataDeserializer`](super::EventDataDeserializer); the
/// built-in one from [`global`](Self::global) is read-only.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    factories: HashMap<&'static str, EventObjectFactory>,
}

// Verify TypeRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TypeRegistry>();
};

impl TypeRegistry {
    /// Creates an empty registry. Every payload decodes as raw.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in resource types.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new()
            .register(Charge::OBJECT, |value| {
                serde_json::from_value(value).map(|c| EventObject::Charge(Box::new(c)))
            })
            .register(Invoice::OBJECT, |value| {
                serde_json::from_value(value).map(|i| EventObject::Invoice(Box::new(i)))
            })
            .register(Quote::OBJECT, |value| {
                serde_json::from_value(value).map(|q| EventObject::Quote(Box::new(q)))
            })
    }

    /// The process-wide built-in registry, initialized on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_builtins)
    }

    /// Registers `factory` for `discriminator`, replacing any previous entry.
    #[must_use]
    pub fn register(mut self, discriminator: &'static str, factory: EventObjectFactory) -> Self {
        self.factories.insert(discriminator, factory);
        self
    }

    /// Returns the factory for `discriminator`, if one is registered.
    #[must_use]
    pub fn lookup(&self, discriminator: &str) -> Option<EventObjectFactory> {
        self.factories.get(discriminator).copied()
    }

    /// Returns `true` if `discriminator` has a factory.
    #[must_use]
    pub fn contains(&self, discriminator: &str) -> bool {
        self.factories.contains_key(discriminator)
    }
}
