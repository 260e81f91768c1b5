//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// List parameters for the bucketlist collection (`?page=&limit=&q=`).
///
/// `page` is 1-based; `limit` is clamped in the handler via
/// `bucketlist_core::pagination`. `q` filters by case-insensitive
/// substring match on the name.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub q: Option<String>,
}
