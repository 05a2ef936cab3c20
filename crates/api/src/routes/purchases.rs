//! Route definitions for the purchase log.

use axum::routing::get;
use axum::Router;

use crate::handlers::purchases;
use crate::state::AppState;

/// Routes mounted at `/purchases`.
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
        .route("/", get(purchases::list).post(purchases::create))
        .route(
            "/{id}",
            get(purchases::get_by_id)
                .put(purchases::update)
                .delete(purchases::delete),
        )
}
