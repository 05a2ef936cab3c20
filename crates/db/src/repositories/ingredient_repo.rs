//! Repository for the `ingredients` and `ingredient_stock` tables.
//!
//! Every ingredient owns exactly one stock row; it is created in the same
//! transaction as the ingredient and removed with it by cascade.

use std::collections::BTreeSet;

use pantry_core::naming::{normalize_name, search_pattern};
use pantry_core::types::{DbId, Quantity};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::models::ingredient::{CreateIngredient, Ingredient, UpdateIngredient};

/// Column list for an ingredient joined with its stock row (`i` / `s`).
const COLUMNS: &str = "i.id, i.name, i.unit, COALESCE(s.stock_total, 0.0) AS stock, \
    s.last_updated, i.created_at, i.updated_at";

/// FROM clause shared by every read.
const FROM: &str = "ingredients i LEFT JOIN ingredient_stock s ON s.ingredient_id = i.id";

/// Provides CRUD and stock operations for ingredients.
pub struct IngredientRepo;

impl IngredientRepo {
    /// Insert a new ingredient together with its stock row.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateIngredient,
    ) -> Result<Ingredient, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO ingredients (name, name_key, unit) VALUES (?1, ?2, ?3) RETURNING id",
        )
        .bind(input.name.trim())
        .bind(normalize_name(&input.name))
        .bind(input.unit.trim())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO ingredient_stock (ingredient_id, stock_total, last_updated) \
             VALUES (?1, ?2, CASE WHEN ?3 THEN strftime('%Y-%m-%dT%H:%M:%fZ', 'now') END)",
        )
        .bind(id)
        .bind(input.initial_stock.unwrap_or(0.0))
        .bind(input.initial_stock.is_some())
        .execute(&mut *tx)
        .await?;

        let ingredient = Self::find_by_id_inner(&mut tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        Ok(ingredient)
    }

    /// Find an ingredient by its ID.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE i.id = ?1");
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    async fn find_by_id_inner(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE i.id = ?1");
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List ingredients ordered by name, optionally filtered by an
    /// accent-insensitive substring of the name.
    pub async fn list(
        pool: &SqlitePool,
        search: Option<&str>,
    ) -> Result<Vec<Ingredient>, sqlx::Error> {
        let pattern = search.and_then(search_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM} \
             WHERE (?1 IS NULL OR i.name_key LIKE ?1 ESCAPE '\\') \
             ORDER BY i.name_key, i.id"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Return the subset of `ids` that exist.
    pub async fn existing_ids(
        pool: &SqlitePool,
        ids: &[DbId],
    ) -> Result<BTreeSet<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(BTreeSet::new());
        }
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id FROM ingredients WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let found = builder.build_query_scalar::<DbId>().fetch_all(pool).await?;
        Ok(found.into_iter().collect())
    }

    /// Update an ingredient's name or unit. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateIngredient,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE ingredients SET \
                name = COALESCE(?2, name), \
                name_key = COALESCE(?3, name_key), \
                unit = COALESCE(?4, unit), \
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(input.name.as_deref().map(str::trim))
        .bind(input.name.as_deref().map(normalize_name))
        .bind(input.unit.as_deref().map(str::trim))
        .execute(pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Set the current stock of an ingredient and stamp `last_updated`.
    ///
    /// Returns `None` if no ingredient with the given `id` exists.
    pub async fn set_stock(
        pool: &SqlitePool,
        id: DbId,
        quantity: Quantity,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        let written = sqlx::query(
            "INSERT INTO ingredient_stock (ingredient_id, stock_total, last_updated) \
             SELECT id, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now') FROM ingredients WHERE id = ?1 \
             ON CONFLICT (ingredient_id) DO UPDATE SET \
                stock_total = excluded.stock_total, \
                last_updated = excluded.last_updated",
        )
        .bind(id)
        .bind(quantity)
        .execute(pool)
        .await?;

        if written.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Delete an ingredient and its stock row and purchases.
    ///
    /// Fails with a foreign key violation while a recipe still uses it.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of ingredients.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(pool)
            .await
    }
}
