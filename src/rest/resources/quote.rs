//! Quote resource.
//!
//! Quotes can be retrieved as JSON or downloaded as a PDF. The PDF comes
//! back as an unread [`ApiResponseStream`] so large documents are never
//! buffered whole:
//!
//! ```rust,ignore
//! let mut pdf = Quote::pdf(&client, "qt_123", None::<&()>, None).await?;
//! while let Some(chunk) = pdf.next_chunk().await? {
//!     file.write_all(&chunk)?;
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponseStream, HttpMethod, RestClient, RestError};
use crate::config::RequestOptions;
use crate::rest::ApiResource;

/// A price quote.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Always `"quote"` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    /// Creation time in seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl ApiResource for Quote {
    const OBJECT: &'static str = "quote";
    const COLLECTION_PATH: &'static str = "/v1/quotes";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Quote {
    /// Downloads the quote PDF.
    ///
    /// `params` are sent as query parameters.
    ///
    /// # Errors
    ///
    /// Returns the [`RestError`] matching a non-2xx status (its body is read
    /// to build the error), or a transport error.
    pub async fn pdf<P>(
        client: &RestClient,
        id: &str,
        params: Option<&P>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponseStream, RestError>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("{}/pdf", Self::retrieve_path(id));
        client
            .request_stream(HttpMethod::Get, &path, params, options)
            .await
    }

    /// Downloads the PDF of this quote.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidRequest`] if this quote has no id, else
    /// as [`Quote::pdf`].
    pub async fn download_pdf<P>(
        &self,
        client: &RestClient,
        params: Option<&P>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponseStream, RestError>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("{}/pdf", self.instance_path()?);
        client
            .request_stream(HttpMethod::Get, &path, params, options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_deserializes() {
        let quote: Quote = serde_json::from_str(
            r#"{"id": "qt_123", "object": "quote", "created": 1700000000, "currency": "usd"}"#,
        )
        .unwrap();
        assert_eq!(quote.id(), Some("qt_123"));
        assert_eq!(quote.created, Some(1_700_000_000));
    }

    #[test]
    fn test_quote_without_id_has_no_pdf_path() {
        assert!(Quote::default().instance_path().is_err());
    }
}
