//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::error::CoreError;
use pantry_core::types::DbId;
use pantry_db::models::category::{CreateCategory, UpdateCategory};
use pantry_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category_id = category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Recipes in the category are kept and left uncategorized.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
