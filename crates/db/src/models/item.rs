//! Bucketlist item entity model.

use bucketlist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `bucketlist_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub bucketlist_id: DbId,
    pub name: String,
    pub done: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Field changes for an item update. `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub done: Option<bool>,
}
