//! Repository for the `bucketlists` table.
//!
//! Every query here is parameterized by the owner's user id. A bucketlist
//! id belonging to a different owner resolves to zero rows, which callers
//! report as not-found -- the same outcome as an id that does not exist.

use bucketlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::bucketlist::Bucketlist;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, owner_id, created_at, updated_at";

/// Provides owner-scoped CRUD, search, and pagination for bucketlists.
pub struct BucketlistRepo;

impl BucketlistRepo {
    /// Insert a new bucketlist for the given owner, returning the row.
    ///
    /// A per-owner duplicate name violates `uq_bucketlists_owner_name` and
    /// surfaces as a `sqlx::Error::Database` with code 23505.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        name: &str,
    ) -> Result<Bucketlist, sqlx::Error> {
        let query = format!(
            "INSERT INTO bucketlists (name, owner_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bucketlist>(&query)
            .bind(name)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// List a page of the owner's bucketlists, optionally filtered by a
    /// case-insensitive substring match on the name.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Bucketlist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bucketlists
             WHERE owner_id = $1
               AND ($2::TEXT IS NULL OR name ILIKE '%' || $2 || '%')
             ORDER BY created_at, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Bucketlist>(&query)
            .bind(owner_id)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the owner's bucketlists under the same filter as
    /// [`list_for_owner`](Self::list_for_owner).
    pub async fn count_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bucketlists
             WHERE owner_id = $1
               AND ($2::TEXT IS NULL OR name ILIKE '%' || $2 || '%')",
        )
        .bind(owner_id)
        .bind(search)
        .fetch_one(pool)
        .await?;
        Ok(count.0)
    }

    /// Find a single bucketlist by id, scoped to its owner.
    pub async fn find_by_id_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Bucketlist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bucketlists WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Bucketlist>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the owner already has a bucketlist with this name,
    /// excluding the given id (pass the id being renamed, or `None` on
    /// create).
    pub async fn name_exists_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM bucketlists
                 WHERE owner_id = $1 AND name = $2
                   AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(owner_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(exists.0)
    }

    /// Rename an owner's bucketlist, advancing `updated_at`.
    ///
    /// Returns `None` when no row matches the id + owner pair.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        name: &str,
    ) -> Result<Option<Bucketlist>, sqlx::Error> {
        let query = format!(
            "UPDATE bucketlists SET name = $3, updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bucketlist>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owner's bucketlist. Items cascade via the foreign key.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bucketlists WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
