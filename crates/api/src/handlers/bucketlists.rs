//! Handlers for the `/bucketlists` resource.
//!
//! Every handler takes [`AuthUser`] and passes its id into the repository,
//! so no query can cross an ownership boundary. A bucketlist that exists
//! under another owner is reported exactly like one that does not exist.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bucketlist_core::error::CoreError;
use bucketlist_core::pagination::{clamp_page, clamp_page_size, page_offset};
use bucketlist_core::types::DbId;
use bucketlist_core::validation::validate_resource_name;
use bucketlist_db::models::bucketlist::{Bucketlist, BucketlistDetail};
use bucketlist_db::models::item::Item;
use bucketlist_db::repositories::{BucketlistRepo, ItemRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /bucketlists` and `PUT /bucketlists/{id}`.
#[derive(Debug, Deserialize)]
pub struct BucketlistNameRequest {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/bucketlists
///
/// List a page of the caller's bucketlists with their items. `q` filters
/// by case-insensitive substring; an empty page carries a message that
/// distinguishes a fruitless search from an empty collection.
pub async fn list_bucketlists(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_page_size(params.limit);
    let page = clamp_page(params.page);
    let offset = page_offset(page, limit);
    let search = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let bucketlists =
        BucketlistRepo::list_for_owner(&state.pool, user.user_id, search, limit, offset).await?;
    let total = BucketlistRepo::count_for_owner(&state.pool, user.user_id, search).await?;

    let message = if bucketlists.is_empty() {
        if search.is_some() {
            Some("No bucketlists matched your search".to_string())
        } else {
            Some("No bucketlists available".to_string())
        }
    } else {
        None
    };

    let data = with_items(&state, bucketlists).await?;

    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
        message,
    }))
}

/// POST /api/v1/bucketlists
///
/// Create a bucketlist for the caller.
pub async fn create_bucketlist(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BucketlistNameRequest>,
) -> AppResult<impl IntoResponse> {
    let name = require_name(input.name)?;

    if BucketlistRepo::name_exists_for_owner(&state.pool, user.user_id, &name, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Bucketlist already exists".to_string(),
        )));
    }

    let bucketlist = BucketlistRepo::create(&state.pool, user.user_id, &name).await?;

    tracing::info!(
        bucketlist_id = bucketlist.id,
        user_id = user.user_id,
        name = %bucketlist.name,
        "Bucketlist created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BucketlistDetail::new(bucketlist, Vec::new()),
        }),
    ))
}

/// GET /api/v1/bucketlists/{id}
///
/// Retrieve one of the caller's bucketlists with its items.
pub async fn get_bucketlist(
    user: AuthUser,
    State(state): State<AppState>,
    Path(bucketlist_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let bucketlist = find_owned(&state, bucketlist_id, &user).await?;
    let items = ItemRepo::list_for_bucketlist(&state.pool, bucketlist.id).await?;

    Ok(Json(DataResponse {
        data: BucketlistDetail::new(bucketlist, items),
    }))
}

/// PUT /api/v1/bucketlists/{id}
///
/// Rename one of the caller's bucketlists. Renaming to the current name is
/// reported as "no changes made"; renaming onto another of the caller's
/// bucketlists is a distinct conflict.
pub async fn update_bucketlist(
    user: AuthUser,
    State(state): State<AppState>,
    Path(bucketlist_id): Path<DbId>,
    Json(input): Json<BucketlistNameRequest>,
) -> AppResult<impl IntoResponse> {
    let name = require_name(input.name)?;
    let current = find_owned(&state, bucketlist_id, &user).await?;

    if name == current.name {
        return Err(AppError::Core(CoreError::Conflict(
            "No changes made".to_string(),
        )));
    }

    if BucketlistRepo::name_exists_for_owner(&state.pool, user.user_id, &name, Some(current.id))
        .await?
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "You already have a bucketlist named {name}"
        ))));
    }

    let updated = BucketlistRepo::rename(&state.pool, bucketlist_id, user.user_id, &name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bucketlist",
            id: bucketlist_id,
        }))?;

    tracing::info!(
        bucketlist_id,
        user_id = user.user_id,
        name = %updated.name,
        "Bucketlist renamed",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/bucketlists/{id}
///
/// Delete one of the caller's bucketlists; its items cascade away with it.
pub async fn delete_bucketlist(
    user: AuthUser,
    State(state): State<AppState>,
    Path(bucketlist_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted =
        BucketlistRepo::delete_for_owner(&state.pool, bucketlist_id, user.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Bucketlist",
            id: bucketlist_id,
        }));
    }

    tracing::info!(bucketlist_id, user_id = user.user_id, "Bucketlist deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a bucketlist id within the caller's scope, or 404.
pub(crate) async fn find_owned(
    state: &AppState,
    bucketlist_id: DbId,
    user: &AuthUser,
) -> Result<Bucketlist, AppError> {
    BucketlistRepo::find_by_id_for_owner(&state.pool, bucketlist_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bucketlist",
            id: bucketlist_id,
        }))
}

/// Validate and normalize a bucketlist name from a request body.
fn require_name(name: Option<String>) -> Result<String, AppError> {
    let name = name.unwrap_or_default();
    validate_resource_name("Bucketlist", &name)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    Ok(name.trim().to_string())
}

/// Attach items to a page of bucketlists in one query.
async fn with_items(
    state: &AppState,
    bucketlists: Vec<Bucketlist>,
) -> Result<Vec<BucketlistDetail>, AppError> {
    if bucketlists.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<DbId> = bucketlists.iter().map(|b| b.id).collect();

    let mut by_list: HashMap<DbId, Vec<Item>> = HashMap::new();
    for item in ItemRepo::list_for_bucketlists(&state.pool, &ids).await? {
        by_list.entry(item.bucketlist_id).or_default().push(item);
    }

    Ok(bucketlists
        .into_iter()
        .map(|b| {
            let items = by_list.remove(&b.id).unwrap_or_default();
            BucketlistDetail::new(b, items)
        })
        .collect())
}
