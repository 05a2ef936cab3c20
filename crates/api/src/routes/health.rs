use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use pantry_db::repositories::{IngredientRepo, RecipeRepo};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, `empty` (database answers but holds no recipes) or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Catalog sizes; absent when the database cannot be queried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogCounts>,
}

#[derive(Serialize)]
pub struct CatalogCounts {
    pub recipes: i64,
    pub ingredients: i64,
}

/// GET /health
///
/// Answers 503 when the database is unreachable so load balancers stop
/// routing here. An empty catalog is still healthy: the possible-recipes
/// endpoint simply has nothing to offer yet.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let counts = async {
        pantry_db::health_check(&state.pool).await?;
        let (recipes, ingredients) = tokio::try_join!(
            RecipeRepo::count(&state.pool),
            IngredientRepo::count(&state.pool),
        )?;
        Ok::<_, sqlx::Error>(CatalogCounts {
            recipes,
            ingredients,
        })
    }
    .await;

    let (code, status, catalog) = match counts {
        Ok(c) if c.recipes == 0 => (StatusCode::OK, "empty", Some(c)),
        Ok(c) => (StatusCode::OK, "ok", Some(c)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", None)
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy: catalog.is_some(),
            catalog,
        }),
    )
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
