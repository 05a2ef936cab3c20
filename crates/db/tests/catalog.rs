//! Integration tests for `SqliteCatalog` and the demo seed.
//!
//! Runs the feasibility flow from `pantry-core` over the seeded catalog.

use assert_matches::assert_matches;
use pantry_core::catalog::{find_possible_recipes, summarize_cookable, PossibleRecipesQuery};
use pantry_core::feasibility::Completeness;
use pantry_db::catalog::SqliteCatalog;
use pantry_db::repositories::{IngredientRepo, RecipeRepo};
use pantry_db::seed_demo_data_if_empty;
use sqlx::SqlitePool;

async fn seeded(pool: &SqlitePool) -> SqliteCatalog {
    assert!(seed_demo_data_if_empty(pool).await.unwrap());
    SqliteCatalog::new(pool.clone())
}

fn query(tokens: &[&str], category: Option<&str>) -> PossibleRecipesQuery {
    PossibleRecipesQuery {
        ingredient_tokens: tokens.iter().map(|t| t.to_string()).collect(),
        category: category.map(String::from),
    }
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn seed_runs_once(pool: SqlitePool) {
    assert!(seed_demo_data_if_empty(&pool).await.unwrap());
    assert!(!seed_demo_data_if_empty(&pool).await.unwrap());
    assert_eq!(RecipeRepo::count(&pool).await.unwrap(), 3);
    assert_eq!(IngredientRepo::count(&pool).await.unwrap(), 17);
}

// ---------------------------------------------------------------------------
// Possible recipes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn ceviche_is_complete_with_its_ingredients(pool: SqlitePool) {
    let catalog = seeded(&pool).await;
    let tokens = [
        "filete de pescado fresco",
        "LIMON",
        "Cebolla roja",
        "aji limo",
        "culantro",
        "camote",
        "7",
        "8",
    ];

    let results = find_possible_recipes(&catalog, &query(&tokens, None))
        .await
        .unwrap();
    let ceviche = results
        .iter()
        .find(|r| r.recipe.name == "Ceviche clásico")
        .unwrap();

    assert_eq!(ceviche.completeness, Completeness::Complete);
    assert_eq!(ceviche.completeness_pct, 100);
    assert!(ceviche.missing_ingredients.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insufficient_stock_is_missing_even_when_selected(pool: SqlitePool) {
    let catalog = seeded(&pool).await;

    // Papa amarilla (400 g in stock, 1000 g needed) and Atún en lata (0 in stock).
    let results = find_possible_recipes(
        &catalog,
        &query(&["papa amarilla", "atun en lata", "aji amarillo", "limon", "palta", "mayonesa"], None),
    )
    .await
    .unwrap();
    let causa = results
        .iter()
        .find(|r| r.recipe.name == "Causa limeña")
        .unwrap();

    assert_eq!(causa.ingredients_available, 4);
    assert_eq!(causa.ingredients_missing, 2);
    assert_eq!(causa.completeness_pct, 67);
    assert_eq!(causa.missing_ingredients, vec!["Atún en lata", "Papa amarilla"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_filter_by_name_and_id(pool: SqlitePool) {
    let catalog = seeded(&pool).await;

    let by_name = find_possible_recipes(&catalog, &query(&[], Some("postres")))
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].recipe.name, "Arroz con leche");

    let by_id = find_possible_recipes(&catalog, &query(&[], Some("1")))
        .await
        .unwrap();
    assert_eq!(by_id.len(), 2);

    let unknown = find_possible_recipes(&catalog, &query(&[], Some("Sopas")))
        .await
        .unwrap();
    assert_eq!(unknown.len(), 3);

    let zero = find_possible_recipes(&catalog, &query(&[], Some("0")))
        .await
        .unwrap();
    assert!(zero.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn results_follow_recipe_name_order(pool: SqlitePool) {
    let catalog = seeded(&pool).await;
    let results = find_possible_recipes(&catalog, &query(&[], None))
        .await
        .unwrap();

    let names: Vec<_> = results.iter().map(|r| r.recipe.name.as_str()).collect();
    assert_eq!(names, vec!["Arroz con leche", "Causa limeña", "Ceviche clásico"]);
    assert!(results.iter().all(|r| r.ingredients_available == 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cookable_summary_over_seed(pool: SqlitePool) {
    let catalog = seeded(&pool).await;
    let summary = summarize_cookable(&catalog).await.unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.complete, 1);
    assert_eq!(summary.incomplete, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_catalog_yields_no_results(pool: SqlitePool) {
    let catalog = SqliteCatalog::new(pool.clone());
    let results = find_possible_recipes(&catalog, &query(&["sal"], None)).await;

    assert_matches!(results, Ok(ref r) if r.is_empty());
}
