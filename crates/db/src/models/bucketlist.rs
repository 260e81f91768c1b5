//! Bucketlist entity model and response DTOs.

use bucketlist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::item::Item;

/// Row from the `bucketlists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bucketlist {
    pub id: DbId,
    pub name: String,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A bucketlist together with its items, as returned by get and list.
#[derive(Debug, Serialize)]
pub struct BucketlistDetail {
    pub id: DbId,
    pub name: String,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub items: Vec<Item>,
}

impl BucketlistDetail {
    pub fn new(bucketlist: Bucketlist, items: Vec<Item>) -> Self {
        Self {
            id: bucketlist.id,
            name: bucketlist.name,
            owner_id: bucketlist.owner_id,
            created_at: bucketlist.created_at,
            updated_at: bucketlist.updated_at,
            items,
        }
    }
}
