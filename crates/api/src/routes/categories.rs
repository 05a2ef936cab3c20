//! Route definitions for recipe categories.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route(
            "/{id}",
            get(categories::get_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
}
