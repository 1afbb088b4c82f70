//! Charge resource.
//!
//! - Create: `POST /charges`
//! - Retrieve: `GET /charges/{id}`
//! - Update: `PUT /charges/{id}`
//! - List: `GET /charges`
//!
//! # Example
//!
//! ```rust,ignore
//! use seamlesspay_api::rest::resources::{Charge, ChargeCreateParams};
//! use seamlesspay_api::rest::ApiResource;
//!
//! let params = ChargeCreateParams {
//!     amount: Some("10.00".into()),
//!     token: Some("TKN_01".to_string()),
//!     capture: Some(true),
//!     ..Default::default()
//! };
//! let charge = Charge::create(&client, &params, None).await?;
//!
//! let same = Charge::retrieve(&client, charge.id.as_deref().unwrap(), None).await?;
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, RestClient, RestError};
use crate::config::RequestOptions;
use crate::rest::resources::Amount;
use crate::rest::{ApiResource, ListResponse};

/// A card or bank account charge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    /// Transaction id. Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Always `"charge"` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    /// Charged amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,

    /// Authorization code from the issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,

    /// Whether the card is a business card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_card: Option<bool>,

    /// ISO currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Payment type, e.g. `credit_card` or `ach`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,

    /// Card network, e.g. `Visa`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_network: Option<String>,

    /// Bank account type for ACH charges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,

    /// Card expiration date as `MMYY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    /// Last four digits of the card or account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_four: Option<String>,

    /// Level 2/3 order data, passed through as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Transaction status, e.g. `CAPTURED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharge_fee_amount: Option<Amount>,

    /// Payment token the charge was made with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<Amount>,

    /// Transaction date as written by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,

    /// AVS and CVV verification results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<serde_json::Value>,
}

impl ApiResource for Charge {
    const OBJECT: &'static str = "charge";
    const COLLECTION_PATH: &'static str = "/charges";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Charge {
    /// Creates a charge.
    ///
    /// # Errors
    ///
    /// Returns the [`RestError`] matching the response status, or a
    /// transport error.
    pub async fn create(
        client: &RestClient,
        params: &ChargeCreateParams,
        options: Option<&RequestOptions>,
    ) -> Result<Self, RestError> {
        client
            .request(HttpMethod::Post, Self::COLLECTION_PATH, Some(params), options)
            .await
    }

    /// Updates this charge.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidRequest`] without sending anything if this
    /// charge has no id.
    pub async fn update(
        &self,
        client: &RestClient,
        params: &ChargeUpdateParams,
        options: Option<&RequestOptions>,
    ) -> Result<Self, RestError> {
        let path = self.instance_path()?;
        client
            .request(HttpMethod::Put, &path, Some(params), options)
            .await
    }

    /// Lists charges, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns the [`RestError`] matching the response status, or a
    /// transport error.
    pub async fn list(
        client: &RestClient,
        params: &ChargeListParams,
        options: Option<&RequestOptions>,
    ) -> Result<ListResponse<Self>, RestError> {
        client
            .request(HttpMethod::Get, Self::COLLECTION_PATH, Some(params), options)
            .await
    }
}

/// Parameters for [`Charge::create`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeCreateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,

    /// Capture immediately instead of only authorizing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Statement descriptor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_wallet_program_type: Option<String>,

    /// Body-level idempotency key, distinct from the `Idempotency-Key` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub surcharge_fee_amount: Option<Amount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<serde_json::Value>,

    #[serde(rename = "orderID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Payment token to charge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Amount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<Amount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_exempt: Option<bool>,
}

/// Parameters for [`Charge::update`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeUpdateParams {
    /// New amount, e.g. for a partial capture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<Amount>,
}

/// Parameters for [`Charge::list`]. Sent as a query string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeListParams {
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Arbitrary extra filters.
    #[serde(flatten)]
    pub filters: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_charge_deserializes_camel_case_fields() {
        let charge: Charge = serde_json::from_value(json!({
            "id": "TR_01",
            "object": "charge",
            "amount": 100,
            "authCode": "A1",
            "businessCard": false,
            "lastFour": "4242",
            "statusCode": "00",
            "verification": {"cvvVerification": "passed"}
        }))
        .unwrap();

        assert_eq!(charge.id(), Some("TR_01"));
        assert_eq!(charge.amount, Some(Amount::new("100")));
        assert_eq!(charge.auth_code.as_deref(), Some("A1"));
        assert_eq!(charge.business_card, Some(false));
        assert_eq!(charge.last_four.as_deref(), Some("4242"));
        assert!(charge.verification.is_some());
    }

    #[test]
    fn test_create_params_skip_unset_fields() {
        let params = ChargeCreateParams {
            amount: Some("12.34".into()),
            order_id: Some("ORD".to_string()),
            capture: Some(true),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"amount": "12.34", "orderID": "ORD", "capture": true})
        );
    }

    #[test]
    fn test_list_params_flatten_filters() {
        let mut params = ChargeListParams {
            page: Some(2),
            ..Default::default()
        };
        params
            .filters
            .insert("currency".to_string(), "USD".to_string());

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"page": 2, "currency": "USD"})
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(Charge::retrieve_path("TR 1"), "/charges/TR%201");
        let charge = Charge {
            id: Some("TR_1".to_string()),
            ..Default::default()
        };
        assert_eq!(charge.instance_path().unwrap(), "/charges/TR_1");
        assert!(Charge::default().instance_path().is_err());
    }
}
