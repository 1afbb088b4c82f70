//! Invoice resource.
//!
//! - Create: `POST /v1/invoices`
//! - Retrieve: `GET /v1/invoices/{id}`
//! - Update: `POST /v1/invoices/{id}`

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, RestClient, RestError};
use crate::config::RequestOptions;
use crate::rest::resources::Amount;
use crate::rest::ApiResource;

/// An invoice for a customer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Always `"invoice"` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_due: Option<Amount>,

    /// E.g. `draft`, `open` or `paid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Creation time in seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl ApiResource for Invoice {
    const OBJECT: &'static str = "invoice";
    const COLLECTION_PATH: &'static str = "/v1/invoices";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Invoice {
    /// Creates an invoice.
    ///
    /// # Errors
    ///
    /// Returns the [`RestError`] matching the response status, or a
    /// transport error.
    pub async fn create(
        client: &RestClient,
        params: &InvoiceParams,
        options: Option<&RequestOptions>,
    ) -> Result<Self, RestError> {
        client
            .request(HttpMethod::Post, Self::COLLECTION_PATH, Some(params), options)
            .await
    }

    /// Updates this invoice. The API takes updates as `POST`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidRequest`] without sending anything if this
    /// invoice has no id.
    pub async fn update(
        &self,
        client: &RestClient,
        params: &InvoiceParams,
        options: Option<&RequestOptions>,
    ) -> Result<Self, RestError> {
        let path = self.instance_path()?;
        client
            .request(HttpMethod::Post, &path, Some(params), options)
            .await
    }
}

/// Parameters for [`Invoice::create`] and [`Invoice::update`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invoice_metadata_defaults_to_empty() {
        let invoice: Invoice =
            serde_json::from_value(json!({"id": "in_123", "object": "invoice"})).unwrap();
        assert!(invoice.metadata.is_empty());
        assert_eq!(invoice.instance_path().unwrap(), "/v1/invoices/in_123");
    }

    #[test]
    fn test_params_serialize_metadata_only_when_set() {
        let mut params = InvoiceParams::default();
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({}));

        params.metadata.insert("key".to_string(), "value".to_string());
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"metadata": {"key": "value"}})
        );
    }
}
