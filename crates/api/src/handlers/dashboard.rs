//! Handler for the dashboard summary.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::catalog::summarize_cookable;
use pantry_core::feasibility::FeasibilitySummary;
use pantry_db::repositories::{CategoryRepo, IngredientRepo, PurchaseRepo, RecipeRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Catalog totals plus how many recipes current stock can cover.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_recipes: i64,
    pub total_ingredients: i64,
    pub total_categories: i64,
    pub total_purchases: i64,
    /// Every recipe evaluated with every ingredient selected.
    pub cookable: FeasibilitySummary,
}

/// GET /api/v1/dashboard
pub async fn summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let (total_recipes, total_ingredients, total_categories, total_purchases) = tokio::try_join!(
        RecipeRepo::count(pool),
        IngredientRepo::count(pool),
        CategoryRepo::count(pool),
        PurchaseRepo::count(pool),
    )?;
    let cookable = summarize_cookable(&state.catalog()).await?;

    Ok(Json(DataResponse {
        data: DashboardSummary {
            total_recipes,
            total_ingredients,
            total_categories,
            total_purchases,
            cookable,
        },
    }))
}
