//! The [`ApiResource`] trait shared by every REST resource.
//!
//! A resource names its collection path and its webhook discriminator and
//! exposes its id. The trait provides `retrieve` and path helpers on top of
//! that; create, update and list live on each resource because their
//! parameters and HTTP methods differ.
//!
//! # Implementing a Resource
//!
//! ```rust
//! use seamlesspay_api::rest::ApiResource;
//! use serde::Deserialize;
//!
//! #[derive(Clone, Debug, Deserialize)]
//! struct Refund {
//!     id: Option<String>,
//! }
//!
//! impl ApiResource for Refund {
//!     const OBJECT: &'static str = "refund";
//!     const COLLECTION_PATH: &'static str = "/refunds";
//!
//!     fn id(&self) -> Option<&str> {
//!         self.id.as_deref()
//!     }
//! }
//!
//! assert_eq!(Refund::retrieve_path("RF_1"), "/refunds/RF_1");
//! ```

use serde::de::DeserializeOwned;

use crate::clients::{HttpMethod, RestClient, RestError};
use crate::config::RequestOptions;
use crate::rest::instance_path;

/// A REST resource reachable under a collection path.
#[allow(async_fn_in_trait)]
pub trait ApiResource: DeserializeOwned + Send + Sync + Sized {
    /// The discriminator the API writes into the `object` field.
    const OBJECT: &'static str;

    /// The collection path, e.g. `/charges`.
    const COLLECTION_PATH: &'static str;

    /// Returns the id, or `None` for a resource that was never created.
    fn id(&self) -> Option<&str>;

    /// Path of the resource with the given id.
    #[must_use]
    fn retrieve_path(id: &str) -> String {
        format!("{}/{}", Self::COLLECTION_PATH, urlencoding::encode(id))
    }

    /// Path of this resource instance.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidRequest`] when the resource has no id.
    fn instance_path(&self) -> Result<String, RestError> {
        instance_path(Self::COLLECTION_PATH, self.id())
    }

    /// Fetches a resource by id.
    ///
    /// # Errors
    ///
    /// Returns the [`RestError`] matching the response status, or a
    /// transport error.
    async fn retrieve(
        client: &RestClient,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Self, RestError> {
        let path = instance_path(Self::COLLECTION_PATH, Some(id))?;
        client
            .request::<Self, ()>(HttpMethod::Get, &path, None, options)
            .await
    }
}
