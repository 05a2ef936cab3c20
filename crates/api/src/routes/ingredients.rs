//! Route definitions for ingredients and their stock.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::ingredients;
use crate::state::AppState;

/// Routes mounted at `/ingredients`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// PUT    /{id}/stock    -> set_stock
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ingredients::list).post(ingredients::create))
        .route(
            "/{id}",
            get(ingredients::get_by_id)
                .put(ingredients::update)
                .delete(ingredients::delete),
        )
        .route("/{id}/stock", put(ingredients::set_stock))
}
