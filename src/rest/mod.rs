//! REST resources for the SeamlessPay API.
//!
//! - [`ApiResource`]: Shared retrieval and path building
//! - [`ListResponse`] and [`Pagination`]: One page of a list endpoint
//! - [`instance_path`]: `{collection}/{id}` with the id encoded
//! - [`resources`]: Charges, invoices and quotes
//!
//! # Example
//!
//! ```rust,ignore
//! use seamlesspay_api::rest::resources::{Charge, ChargeListParams};
//! use seamlesspay_api::rest::ApiResource;
//! use seamlesspay_api::{ApiKey, ClientDefaults, RestClient};
//!
//! let defaults = ClientDefaults::builder()
//!     .api_key(ApiKey::new("sk_test_123")?)
//!     .build()?;
//! let client = RestClient::new(defaults);
//!
//! let page = Charge::list(&client, &ChargeListParams::default(), None).await?;
//! for charge in page.iter() {
//!     println!("{:?} {:?}", charge.id, charge.status);
//! }
//! ```

mod list;
mod path;
mod resource;
pub mod resources;

pub use list::{ListResponse, Pagination};
pub use path::instance_path;
pub use resource::ApiResource;
