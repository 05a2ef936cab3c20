pub mod categories;
pub mod dashboard;
pub mod health;
pub mod ingredients;
pub mod purchases;
pub mod recipes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ingredients                     list (?search=), create
/// /ingredients/{id}                get, update, delete
/// /ingredients/{id}/stock          set stock (PUT)
///
/// /categories                      list, create
/// /categories/{id}                 get, update, delete
///
/// /recipes                         list (?search=&category=), create
/// /recipes/possible                feasibility (?ingredients=&category=)
/// /recipes/{id}                    get, update, delete
///
/// /purchases                       list (?ingredient_id=&from=&to=), create
/// /purchases/{id}                  get, update, delete
///
/// /dashboard                       catalog counts and cookable summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/ingredients", ingredients::router())
        .nest("/categories", categories::router())
        .nest("/recipes", recipes::router())
        .nest("/purchases", purchases::router())
        .nest("/dashboard", dashboard::router())
}
