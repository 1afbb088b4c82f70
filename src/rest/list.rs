//! Paginated list responses.

use serde::{Deserialize, Serialize};

/// Pagination metadata returned with list responses.
///
/// Only passed through; the client does not drive pagination itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Results returned per page.
    #[serde(default)]
    pub count: Option<u32>,
    /// Page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Total number of pages.
    #[serde(default)]
    pub pages: Option<u32>,
    /// Total results for the query.
    #[serde(default)]
    pub size: Option<u32>,
}

impl Pagination {
    /// Returns `true` if a page after the current one exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        matches!((self.page, self.pages), (Some(page), Some(pages)) if page < pages)
    }
}

/// One page of a list endpoint.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::rest::ListResponse;
///
/// let page: ListResponse<serde_json::Value> = serde_json::from_str(
///     r#"{"data": [{"id": "TR_1"}], "pagination": {"count": 1, "page": 1, "pages": 3, "size": 3}}"#,
/// ).unwrap();
///
/// assert_eq!(page.len(), 1);
/// assert!(page.pagination.has_next_page());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Pagination metadata.
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> ListResponse<T> {
    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
