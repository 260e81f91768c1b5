pub mod auth;
pub mod bucketlists;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
///
/// /bucketlists                            list, create (requires auth)
/// /bucketlists/{id}                       get, rename, delete
/// /bucketlists/{id}/items                 create item
/// /bucketlists/{id}/items/{item_id}       get, update, delete item
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/bucketlists", bucketlists::router())
}
