//! Repository for the `bucketlist_items` table.
//!
//! Items are scoped through their parent bucketlist: callers resolve the
//! parent through `BucketlistRepo::find_by_id_for_owner` first, so every
//! query here filters on `bucketlist_id`. A write to an item is observable
//! as a write to its parent -- each mutation advances the parent's
//! `updated_at` inside the same transaction.

use bucketlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::{Item, UpdateItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, bucketlist_id, name, done, created_at, updated_at";

/// Provides list-scoped CRUD for bucketlist items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item under a bucketlist and touch the parent's
    /// `updated_at`, atomically.
    ///
    /// A per-list duplicate name violates `uq_bucketlist_items_list_name`
    /// and surfaces as a `sqlx::Error::Database` with code 23505.
    pub async fn create(
        pool: &PgPool,
        bucketlist_id: DbId,
        name: &str,
    ) -> Result<Item, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO bucketlist_items (bucketlist_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&query)
            .bind(bucketlist_id)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        touch_parent(&mut tx, bucketlist_id).await?;
        tx.commit().await?;
        Ok(item)
    }

    /// List all items of one bucketlist, oldest first.
    pub async fn list_for_bucketlist(
        pool: &PgPool,
        bucketlist_id: DbId,
    ) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bucketlist_items
             WHERE bucketlist_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(bucketlist_id)
            .fetch_all(pool)
            .await
    }

    /// List the items of several bucketlists in one round trip.
    ///
    /// Used when assembling a page of bucketlists with their items.
    pub async fn list_for_bucketlists(
        pool: &PgPool,
        bucketlist_ids: &[DbId],
    ) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bucketlist_items
             WHERE bucketlist_id = ANY($1)
             ORDER BY bucketlist_id, created_at, id"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(bucketlist_ids)
            .fetch_all(pool)
            .await
    }

    /// Find a single item by id within one bucketlist.
    pub async fn find_by_id_in_list(
        pool: &PgPool,
        item_id: DbId,
        bucketlist_id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM bucketlist_items WHERE id = $1 AND bucketlist_id = $2");
        sqlx::query_as::<_, Item>(&query)
            .bind(item_id)
            .bind(bucketlist_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the bucketlist already contains an item with this name,
    /// excluding the given id (pass the id being renamed, or `None` on
    /// create).
    pub async fn name_exists_in_list(
        pool: &PgPool,
        bucketlist_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM bucketlist_items
                 WHERE bucketlist_id = $1 AND name = $2
                   AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(bucketlist_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(exists.0)
    }

    /// Apply an item update (rename and/or done flag) and touch the parent,
    /// atomically. Only non-`None` fields in `changes` are applied.
    ///
    /// Returns `None` when no row matches the id + bucketlist pair.
    pub async fn update(
        pool: &PgPool,
        item_id: DbId,
        bucketlist_id: DbId,
        changes: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE bucketlist_items SET
                 name = COALESCE($3, name),
                 done = COALESCE($4, done),
                 updated_at = NOW()
             WHERE id = $1 AND bucketlist_id = $2
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&query)
            .bind(item_id)
            .bind(bucketlist_id)
            .bind(&changes.name)
            .bind(changes.done)
            .fetch_optional(&mut *tx)
            .await?;

        if item.is_some() {
            touch_parent(&mut tx, bucketlist_id).await?;
        }
        tx.commit().await?;
        Ok(item)
    }

    /// Delete an item and touch the parent, atomically.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        item_id: DbId,
        bucketlist_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM bucketlist_items WHERE id = $1 AND bucketlist_id = $2")
            .bind(item_id)
            .bind(bucketlist_id)
            .execute(&mut *tx)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            touch_parent(&mut tx, bucketlist_id).await?;
        }
        tx.commit().await?;
        Ok(deleted)
    }
}

/// Advance the parent bucketlist's `updated_at` within an open transaction.
async fn touch_parent(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    bucketlist_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE bucketlists SET updated_at = NOW() WHERE id = $1")
        .bind(bucketlist_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
