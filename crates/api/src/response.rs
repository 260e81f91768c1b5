//! Shared response envelope types for API handlers.
//!
//! Resource responses use a `{ "data": ... }` envelope; paginated listings
//! add the page window and total, plus an optional human-readable message
//! for empty results.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Paginated listing envelope.
///
/// `message` is set only when the page is empty, and distinguishes "no
/// results for that search" from "nothing here at all".
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
