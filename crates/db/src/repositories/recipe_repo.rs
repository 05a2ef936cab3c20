//! Repository for the `recipes` and `recipe_ingredients` tables.

use std::collections::HashMap;

use pantry_core::catalog::RecipeFilter;
use pantry_core::naming::{normalize_name, search_pattern};
use pantry_core::types::DbId;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::models::recipe::{
    Recipe, RecipeIngredient, RecipeLineInput, RecipeWithIngredients, SaveRecipe,
};

/// Column list for a recipe joined with its category (`r` / `c`).
const COLUMNS: &str = "r.id, r.name, r.description, r.category_id, c.name AS category_name, \
    r.created_at, r.updated_at";

const FROM: &str = "recipes r LEFT JOIN categories c ON c.id = r.category_id";

/// Column list for an ingredient line joined with its ingredient (`ri` / `i`).
const LINE_COLUMNS: &str = "ri.recipe_id, ri.ingredient_id, i.name, i.unit, ri.quantity";

/// Provides CRUD operations for recipes and their ingredient lines.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a recipe and its ingredient lines in one transaction.
    pub async fn create(
        pool: &SqlitePool,
        input: &SaveRecipe,
    ) -> Result<RecipeWithIngredients, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO recipes (name, name_key, description, category_id) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING id",
        )
        .bind(input.name.trim())
        .bind(normalize_name(&input.name))
        .bind(&input.description)
        .bind(input.category_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_lines_inner(&mut tx, id, &input.ingredients).await?;
        tx.commit().await?;

        Self::find_by_id_with_ingredients(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a recipe by its ID (without lines).
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE r.id = ?1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a recipe by ID, enriched with its ingredient lines.
    pub async fn find_by_id_with_ingredients(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<RecipeWithIngredients>, sqlx::Error> {
        let Some(recipe) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let ingredients = Self::list_lines(pool, recipe.id).await?;
        Ok(Some(RecipeWithIngredients {
            recipe,
            ingredients,
        }))
    }

    /// List recipes ordered by name.
    ///
    /// `filter.search` is an accent-insensitive substring of the name;
    /// `filter.category_id` restricts to one category.
    pub async fn list(pool: &SqlitePool, filter: &RecipeFilter) -> Result<Vec<Recipe>, sqlx::Error> {
        let pattern = filter.search.as_deref().and_then(search_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM} \
             WHERE (?1 IS NULL OR r.name_key LIKE ?1 ESCAPE '\\') \
               AND (?2 IS NULL OR r.category_id = ?2) \
             ORDER BY r.name_key, r.id"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(pattern)
            .bind(filter.category_id)
            .fetch_all(pool)
            .await
    }

    /// List recipes with their ingredient lines.
    ///
    /// Lines for all recipes are loaded with a single query.
    pub async fn list_with_ingredients(
        pool: &SqlitePool,
        filter: &RecipeFilter,
    ) -> Result<Vec<RecipeWithIngredients>, sqlx::Error> {
        let recipes = Self::list(pool, filter).await?;
        let ids: Vec<DbId> = recipes.iter().map(|r| r.id).collect();
        let mut lines = Self::lines_for_recipes(pool, &ids).await?;

        Ok(recipes
            .into_iter()
            .map(|recipe| {
                let ingredients = lines.remove(&recipe.id).unwrap_or_default();
                RecipeWithIngredients {
                    recipe,
                    ingredients,
                }
            })
            .collect())
    }

    /// Ingredient lines of one recipe, ordered by ingredient name.
    pub async fn list_lines(
        pool: &SqlitePool,
        recipe_id: DbId,
    ) -> Result<Vec<RecipeIngredient>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_COLUMNS} \
             FROM recipe_ingredients ri \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             WHERE ri.recipe_id = ?1 \
             ORDER BY i.name_key, i.id"
        );
        sqlx::query_as::<_, RecipeIngredient>(&query)
            .bind(recipe_id)
            .fetch_all(pool)
            .await
    }

    async fn lines_for_recipes(
        pool: &SqlitePool,
        recipe_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<RecipeIngredient>>, sqlx::Error> {
        let mut grouped: HashMap<DbId, Vec<RecipeIngredient>> = HashMap::new();
        if recipe_ids.is_empty() {
            return Ok(grouped);
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {LINE_COLUMNS} \
             FROM recipe_ingredients ri \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             WHERE ri.recipe_id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in recipe_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY i.name_key, i.id");

        let rows = builder
            .build_query_as::<RecipeIngredient>()
            .fetch_all(pool)
            .await?;
        for row in rows {
            grouped.entry(row.recipe_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Replace a recipe's header and its full set of ingredient lines.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &SaveRecipe,
    ) -> Result<Option<RecipeWithIngredients>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE recipes SET \
                name = ?2, \
                name_key = ?3, \
                description = ?4, \
                category_id = ?5, \
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(normalize_name(&input.name))
        .bind(&input.description)
        .bind(input.category_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::insert_lines_inner(&mut tx, id, &input.ingredients).await?;
        tx.commit().await?;

        Self::find_by_id_with_ingredients(pool, id).await
    }

    async fn insert_lines_inner(
        conn: &mut SqliteConnection,
        recipe_id: DbId,
        lines: &[RecipeLineInput],
    ) -> Result<(), sqlx::Error> {
        if lines.is_empty() {
            return Ok(());
        }
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity) ",
        );
        builder.push_values(lines, |mut row, line| {
            row.push_bind(recipe_id)
                .push_bind(line.ingredient_id)
                .push_bind(line.quantity);
        });
        builder.build().execute(conn).await?;
        Ok(())
    }

    /// Delete a recipe; its lines go with it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of recipes.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(pool)
            .await
    }
}
