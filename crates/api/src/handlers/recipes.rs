//! Handlers for the `/recipes` resource and the "what can I cook" query.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::catalog::{
    find_possible_recipes, resolve_category_filter, PossibleRecipesQuery, RecipeFilter,
};
use pantry_core::error::CoreError;
use pantry_core::types::DbId;
use pantry_core::validation::{parse_ingredient_tokens, validate_distinct_ingredients};
use pantry_db::models::recipe::SaveRecipe;
use pantry_db::repositories::{CategoryRepo, IngredientRepo, RecipeRepo};
use pantry_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::{PossibleRecipesParams, RecipeListParams};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Recipe",
        id,
    })
}

/// Validate a recipe body, including the rows it points at.
///
/// The category (when given) and every line's ingredient must exist.
async fn check_recipe_input(pool: &DbPool, input: &SaveRecipe) -> AppResult<()> {
    input.validate()?;

    let ingredient_ids = input.ingredient_ids();
    validate_distinct_ingredients(&ingredient_ids).map_err(CoreError::Validation)?;

    if let Some(category_id) = input.category_id {
        if CategoryRepo::find_by_id(pool, category_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Category {category_id} does not exist"
            )));
        }
    }

    let existing = IngredientRepo::existing_ids(pool, &ingredient_ids).await?;
    let unknown: Vec<String> = ingredient_ids
        .iter()
        .filter(|id| !existing.contains(*id))
        .map(|id| id.to_string())
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Unknown ingredient ids: {}",
            unknown.join(", ")
        )));
    }

    Ok(())
}

/// GET /api/v1/recipes?search=&category=
///
/// `category` is an id or a name; an unmatched name does not filter.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RecipeListParams>,
) -> AppResult<impl IntoResponse> {
    let category_id = resolve_category_filter(&state.catalog(), params.category.as_deref()).await?;
    let filter = RecipeFilter {
        search: params.search,
        category_id,
    };
    let recipes = RecipeRepo::list_with_ingredients(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: recipes }))
}

/// GET /api/v1/recipes/possible?ingredients=limon,3&category=Entradas
///
/// Completeness of every recipe given the selected ingredients and current stock.
pub async fn possible(
    State(state): State<AppState>,
    Query(params): Query<PossibleRecipesParams>,
) -> AppResult<impl IntoResponse> {
    let query = PossibleRecipesQuery {
        ingredient_tokens: parse_ingredient_tokens(params.ingredients.as_deref()),
        category: params.category,
    };
    let results = find_possible_recipes(&state.catalog(), &query).await?;
    Ok(Json(DataResponse { data: results }))
}

/// GET /api/v1/recipes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = RecipeRepo::find_by_id_with_ingredients(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: recipe }))
}

/// POST /api/v1/recipes
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<SaveRecipe>,
) -> AppResult<impl IntoResponse> {
    check_recipe_input(&state.pool, &input).await?;
    let recipe = RecipeRepo::create(&state.pool, &input).await?;

    tracing::info!(
        recipe_id = recipe.recipe.id,
        lines = recipe.ingredients.len(),
        "Recipe created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: recipe })))
}

/// PUT /api/v1/recipes/{id}
///
/// Replaces the recipe, including its full set of ingredient lines.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveRecipe>,
) -> AppResult<impl IntoResponse> {
    check_recipe_input(&state.pool, &input).await?;
    let recipe = RecipeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(recipe_id = id, lines = recipe.ingredients.len(), "Recipe updated");

    Ok(Json(DataResponse { data: recipe }))
}

/// DELETE /api/v1/recipes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RecipeRepo::delete(&state.pool, id).await? {
        tracing::info!(recipe_id = id, "Recipe deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
