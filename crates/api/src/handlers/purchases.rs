//! Handlers for the `/purchases` resource.
//!
//! Purchases are a history log; they never change ingredient stock.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::error::CoreError;
use pantry_core::types::DbId;
use pantry_db::models::purchase::{PurchaseListParams, SavePurchase};
use pantry_db::repositories::{IngredientRepo, PurchaseRepo};
use pantry_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Purchase",
        id,
    })
}

async fn check_purchase_input(pool: &DbPool, input: &SavePurchase) -> AppResult<()> {
    input.validate()?;
    if IngredientRepo::find_by_id(pool, input.ingredient_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(format!(
            "Ingredient {} does not exist",
            input.ingredient_id
        )));
    }
    Ok(())
}

/// GET /api/v1/purchases?ingredient_id=&from=&to=
///
/// Newest first. `from` and `to` are inclusive `YYYY-MM-DD` bounds.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PurchaseListParams>,
) -> AppResult<impl IntoResponse> {
    if let (Some(from), Some(to)) = (params.from, params.to) {
        if from > to {
            return Err(AppError::BadRequest(format!(
                "`from` ({from}) must not be after `to` ({to})"
            )));
        }
    }
    let purchases = PurchaseRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: purchases }))
}

/// GET /api/v1/purchases/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let purchase = PurchaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: purchase }))
}

/// POST /api/v1/purchases
///
/// `purchase_date` defaults to today (UTC).
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<SavePurchase>,
) -> AppResult<impl IntoResponse> {
    check_purchase_input(&state.pool, &input).await?;
    let purchase = PurchaseRepo::create(&state.pool, &input).await?;

    tracing::info!(
        purchase_id = purchase.id,
        ingredient_id = purchase.ingredient_id,
        "Purchase recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: purchase })))
}

/// PUT /api/v1/purchases/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SavePurchase>,
) -> AppResult<impl IntoResponse> {
    check_purchase_input(&state.pool, &input).await?;
    let purchase = PurchaseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(purchase_id = id, "Purchase updated");

    Ok(Json(DataResponse { data: purchase }))
}

/// DELETE /api/v1/purchases/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PurchaseRepo::delete(&state.pool, id).await? {
        tracing::info!(purchase_id = id, "Purchase deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
