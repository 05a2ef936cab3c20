//! Handlers for the `/ingredients` resource.
//!
//! Ingredients carry their current stock; stock is changed only through
//! `PUT /ingredients/{id}/stock`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::error::CoreError;
use pantry_core::types::DbId;
use pantry_db::models::ingredient::{CreateIngredient, SetStock, UpdateIngredient};
use pantry_db::repositories::IngredientRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Ingredient",
        id,
    })
}

/// GET /api/v1/ingredients?search=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let ingredients = IngredientRepo::list(&state.pool, params.search.as_deref()).await?;
    Ok(Json(DataResponse { data: ingredients }))
}

/// GET /api/v1/ingredients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ingredient = IngredientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: ingredient }))
}

/// POST /api/v1/ingredients
///
/// Create an ingredient with an optional starting stock.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateIngredient>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let ingredient = IngredientRepo::create(&state.pool, &input).await?;

    tracing::info!(ingredient_id = ingredient.id, name = %ingredient.name, "Ingredient created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: ingredient }),
    ))
}

/// PUT /api/v1/ingredients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIngredient>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let ingredient = IngredientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(ingredient_id = id, "Ingredient updated");

    Ok(Json(DataResponse { data: ingredient }))
}

/// PUT /api/v1/ingredients/{id}/stock
///
/// Overwrite the current stock and stamp `last_updated`.
pub async fn set_stock(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetStock>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let ingredient = IngredientRepo::set_stock(&state.pool, id, input.quantity)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(ingredient_id = id, stock = input.quantity, "Ingredient stock set");

    Ok(Json(DataResponse { data: ingredient }))
}

/// DELETE /api/v1/ingredients/{id}
///
/// Refused with 409 while any recipe still uses the ingredient.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = IngredientRepo::delete(&state.pool, id)
        .await
        .map_err(|err| match err.as_database_error() {
            Some(db_err) if db_err.is_foreign_key_violation() => AppError::Core(
                CoreError::Conflict(format!("Ingredient {id} is used by at least one recipe")),
            ),
            _ => AppError::Database(err),
        })?;

    if deleted {
        tracing::info!(ingredient_id = id, "Ingredient deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
