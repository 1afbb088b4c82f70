//! SeamlessPay REST resources.
//!
//! Each resource implements [`ApiResource`](crate::rest::ApiResource) for
//! retrieval and adds its own create, update and list operations.

mod charge;
mod common;
mod invoice;
mod quote;

pub use charge::{Charge, ChargeCreateParams, ChargeListParams, ChargeUpdateParams};
pub use common::Amount;
pub use invoice::{Invoice, InvoiceParams};
pub use quote::Quote;
