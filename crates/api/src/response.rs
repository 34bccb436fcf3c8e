//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Listings put a
//! [`Page`] inside it so clients get the items and the paginator together.

use aristotle_core::listing::Pagination;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a listing.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }
}
