//! Integration tests for webhook event decoding.

use seamlesspay_api::rest::resources::Amount;
use seamlesspay_api::webhooks::{
    decode, DecodedValue, Event, EventDataDeserializer, EventObject, Number, RawJsonObject,
    TypeRegistry, WebhookError,
};
use serde_json::json;

#[test]
fn test_charge_envelope_decodes_into_charge() {
    let body = r#"{
        "id": "evt_1",
        "type": "charge.captured",
        "created": 1700000000,
        "livemode": false,
        "data": {
            "object": {
                "object": "charge",
                "id": "TR_01",
                "amount": "10.00",
                "currency": "USD",
                "paymentNetwork": "Visa"
            }
        }
    }"#;

    let event = Event::from_json(body).unwrap();

    assert_eq!(event.id.as_deref(), Some("evt_1"));
    assert_eq!(event.event_type.as_deref(), Some("charge.captured"));
    assert_eq!(event.data.discriminator.as_deref(), Some("charge"));
    let Some(EventObject::Charge(charge)) = &event.data.object else {
        panic!("expected a charge, got {:?}", event.data.object);
    };
    assert_eq!(charge.id.as_deref(), Some("TR_01"));
    assert_eq!(charge.payment_network.as_deref(), Some("Visa"));
}

#[test]
fn test_unknown_discriminator_exposes_members() {
    let event = Event::from_json(
        r#"{"data": {"object": {"object": "unknown_type", "x": {"y": [1, 2]}}}}"#,
    )
    .unwrap();

    let raw = event.data.object.as_ref().and_then(EventObject::as_raw).unwrap();
    assert_eq!(raw.object(), Some("unknown_type"));
    assert_eq!(raw.get("x"), Some(&decode(&json!({"y": [1, 2]}))));
}

#[test]
fn test_null_previous_attributes_with_charge_amount() {
    let event = Event::from_json(
        r#"{"data": {"object": {"object": "charge", "amount": 100}, "previous_attributes": null}}"#,
    )
    .unwrap();

    assert!(event.data.previous_attributes.is_none());
    assert_eq!(
        event
            .data
            .object
            .as_ref()
            .and_then(EventObject::as_charge)
            .unwrap()
            .amount,
        Some(Amount::new("100"))
    );
}

#[test]
fn test_previous_attributes_are_decoded() {
    let event = Event::from_json(
        r#"{"data": {
            "object": {"object": "charge", "amount": 100},
            "previous_attributes": {"amount": 50, "status": "AUTHORIZED"}
        }}"#,
    )
    .unwrap();

    let previous = event.data.previous_attributes.unwrap();
    assert_eq!(
        previous.get("amount"),
        Some(&DecodedValue::Number(Number::Integer(50)))
    );
    assert_eq!(
        previous.get("status").and_then(DecodedValue::as_str),
        Some("AUTHORIZED")
    );
}

#[test]
fn test_non_object_data_is_rejected() {
    let error = EventDataDeserializer::new()
        .deserialize(&json!("charge"))
        .unwrap_err();
    assert!(matches!(error, WebhookError::NotAnObject { found: "string" }));

    let error = Event::from_json(r#"{"data": 42}"#).unwrap_err();
    assert!(matches!(error, WebhookError::NotAnObject { found: "number" }));
}

#[test]
fn test_data_without_object_member_keeps_previous_attributes() {
    let data = EventDataDeserializer::new()
        .deserialize(&json!({"previous_attributes": {"amount": 50}}))
        .unwrap();

    assert!(data.object.is_none());
    assert!(data.discriminator.is_none());
    assert_eq!(
        data.previous_attributes.unwrap().get("amount"),
        Some(&DecodedValue::Number(Number::Integer(50)))
    );

    let event = Event::from_json(r#"{"id": "evt_2", "data": {"livemode": true}}"#).unwrap();
    assert!(event.data.object.is_none());
}

#[test]
fn test_present_non_object_payload_is_rejected() {
    let error = Event::from_json(r#"{"data": {"object": "charge"}}"#).unwrap_err();
    assert!(matches!(error, WebhookError::NotAnObject { found: "string" }));
}

#[test]
fn test_missing_discriminator_is_rejected() {
    let error = Event::from_json(r#"{"data": {"object": {"id": "TR_01"}}}"#).unwrap_err();
    assert!(matches!(error, WebhookError::MissingDiscriminator));

    let error = Event::from_json(r#"{"data": {"object": {"object": 5}}}"#).unwrap_err();
    assert!(matches!(error, WebhookError::MissingDiscriminator));
}

#[test]
fn test_custom_registry_decodes_additional_type() {
    let registry = TypeRegistry::new().register("payout", |value| {
        Ok(EventObject::Raw(
            value
                .as_object()
                .map(RawJsonObject::from_map)
                .unwrap_or_default(),
        ))
    });
    let deserializer = EventDataDeserializer::with_registry(&registry);

    let event = Event::from_value(
        &json!({"data": {"object": {"object": "charge", "id": "TR_01"}}}),
        &deserializer,
    )
    .unwrap();

    // charge is not in this registry
    let object = event.data.object.unwrap();
    assert!(object.as_charge().is_none());
    assert!(object.as_raw().is_some());
}

#[test]
fn test_event_round_trips_through_serde() {
    let event = Event::from_json(
        r#"{"id": "evt_9", "type": "quote.created", "data": {"object": {"object": "quote", "id": "qt_1"}}}"#,
    )
    .unwrap();

    let encoded = serde_json::to_value(&event).unwrap();
    assert_eq!(encoded["data"]["object"]["id"], json!("qt_1"));
    assert_eq!(encoded["type"], json!("quote.created"));
}
