//! Handlers for items nested under `/bucketlists/{id}/items`.
//!
//! Ownership is transitive: every handler first resolves the parent
//! bucketlist within the caller's scope (404 otherwise), then operates on
//! items filtered by that parent. Item writes advance the parent's
//! `updated_at` -- the repository does both inside one transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bucketlist_core::error::CoreError;
use bucketlist_core::types::DbId;
use bucketlist_core::validation::validate_resource_name;
use bucketlist_db::models::item::UpdateItem;
use bucketlist_db::repositories::ItemRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::bucketlists::find_owned;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /bucketlists/{id}/items`.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
}

/// Request body for `PUT /bucketlists/{id}/items/{item_id}`.
///
/// Both fields are optional; supplying neither (or only values equal to
/// the current state) is reported as "no changes made".
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub done: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/bucketlists/{id}/items
///
/// Add an item to one of the caller's bucketlists. The `done` flag starts
/// false.
pub async fn create_item(
    user: AuthUser,
    State(state): State<AppState>,
    Path(bucketlist_id): Path<DbId>,
    Json(input): Json<CreateItemRequest>,
) -> AppResult<impl IntoResponse> {
    let bucketlist = find_owned(&state, bucketlist_id, &user).await?;
    let name = require_name(input.name)?;

    if ItemRepo::name_exists_in_list(&state.pool, bucketlist.id, &name, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "The item is already in the list".to_string(),
        )));
    }

    let item = ItemRepo::create(&state.pool, bucketlist.id, &name).await?;

    tracing::info!(
        item_id = item.id,
        bucketlist_id,
        user_id = user.user_id,
        name = %item.name,
        "Item created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/bucketlists/{id}/items/{item_id}
///
/// Retrieve a single item from one of the caller's bucketlists.
pub async fn get_item(
    user: AuthUser,
    State(state): State<AppState>,
    Path((bucketlist_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let bucketlist = find_owned(&state, bucketlist_id, &user).await?;

    let item = ItemRepo::find_by_id_in_list(&state.pool, item_id, bucketlist.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;

    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/bucketlists/{id}/items/{item_id}
///
/// Rename an item and/or toggle its done flag. A request that changes
/// nothing is a 409 "No changes made"; a rename colliding with another
/// item in the same list is a distinct conflict.
pub async fn update_item(
    user: AuthUser,
    State(state): State<AppState>,
    Path((bucketlist_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateItemRequest>,
) -> AppResult<impl IntoResponse> {
    let bucketlist = find_owned(&state, bucketlist_id, &user).await?;

    let current = ItemRepo::find_by_id_in_list(&state.pool, item_id, bucketlist.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;

    // Normalize the requested changes against the current state: a field
    // equal to what is stored is not a change.
    let new_name = match input.name {
        Some(name) => {
            validate_resource_name("Item", &name)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            let name = name.trim().to_string();
            (name != current.name).then_some(name)
        }
        None => None,
    };
    let new_done = input.done.filter(|&done| done != current.done);

    if new_name.is_none() && new_done.is_none() {
        return Err(AppError::Core(CoreError::Conflict(
            "No changes made".to_string(),
        )));
    }

    if let Some(name) = &new_name {
        if ItemRepo::name_exists_in_list(&state.pool, bucketlist.id, name, Some(current.id))
            .await?
        {
            return Err(AppError::Core(CoreError::Conflict(
                "The item is already in the list".to_string(),
            )));
        }
    }

    let changes = UpdateItem {
        name: new_name,
        done: new_done,
    };
    let item = ItemRepo::update(&state.pool, item_id, bucketlist.id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;

    tracing::info!(
        item_id,
        bucketlist_id,
        user_id = user.user_id,
        done = item.done,
        "Item updated",
    );

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/bucketlists/{id}/items/{item_id}
///
/// Remove an item from one of the caller's bucketlists.
pub async fn delete_item(
    user: AuthUser,
    State(state): State<AppState>,
    Path((bucketlist_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let bucketlist = find_owned(&state, bucketlist_id, &user).await?;

    let deleted = ItemRepo::delete(&state.pool, item_id, bucketlist.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }));
    }

    tracing::info!(item_id, bucketlist_id, user_id = user.user_id, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate and normalize an item name from a request body.
fn require_name(name: Option<String>) -> Result<String, AppError> {
    let name = name.unwrap_or_default();
    validate_resource_name("Item", &name)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    Ok(name.trim().to_string())
}
