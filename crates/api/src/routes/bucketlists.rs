//! Route definitions for bucketlists and their nested items.

use axum::routing::get;
use axum::Router;

use crate::handlers::{bucketlists, items};
use crate::state::AppState;

/// Routes mounted at `/bucketlists`. All require authentication via the
/// [`AuthUser`](crate::middleware::auth::AuthUser) extractor on every
/// handler.
///
/// ```text
/// GET    /                        -> list_bucketlists
/// POST   /                        -> create_bucketlist
/// GET    /{id}                    -> get_bucketlist
/// PUT    /{id}                    -> update_bucketlist
/// DELETE /{id}                    -> delete_bucketlist
/// POST   /{id}/items              -> create_item
/// GET    /{id}/items/{item_id}    -> get_item
/// PUT    /{id}/items/{item_id}    -> update_item
/// DELETE /{id}/items/{item_id}    -> delete_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(bucketlists::list_bucketlists).post(bucketlists::create_bucketlist),
        )
        .route(
            "/{id}",
            get(bucketlists::get_bucketlist)
                .put(bucketlists::update_bucketlist)
                .delete(bucketlists::delete_bucketlist),
        )
        .route("/{id}/items", axum::routing::post(items::create_item))
        .route(
            "/{id}/items/{item_id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
}
