//! Path building for REST resources.

use crate::clients::{ErrorDetails, RestError};

/// Builds `{collection}/{id}` with the id percent-encoded.
///
/// # Errors
///
/// Returns [`RestError::InvalidRequest`] if `id` is `None`, i.e. the
/// resource has not been created yet.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::rest::instance_path;
///
/// assert_eq!(instance_path("/charges", Some("TR_1")).unwrap(), "/charges/TR_1");
/// assert_eq!(instance_path("/charges", Some("a/b")).unwrap(), "/charges/a%2Fb");
/// assert!(instance_path("/charges", None).is_err());
/// ```
pub fn instance_path(collection: &str, id: Option<&str>) -> Result<String, RestError> {
    let id = id.ok_or_else(|| {
        RestError::InvalidRequest(ErrorDetails::local(
            "Invalid null ID found for url path formatting. This can be because your string \
             value is null, or because you are using a resource that has not been created yet.",
        ))
    })?;
    Ok(format!("{collection}/{}", urlencoding::encode(id)))
}
