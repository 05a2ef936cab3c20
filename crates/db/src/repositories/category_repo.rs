//! Repository for the `categories` table.

use pantry_core::naming::normalize_name;
use pantry_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list for the `categories` table.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for recipe categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    ///
    /// Fails with a unique violation when the normalized name is taken.
    pub async fn create(pool: &SqlitePool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, name_key, description) \
             VALUES (?1, ?2, ?3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(input.name.trim())
            .bind(normalize_name(&input.name))
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ?1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by name, ignoring case and accents.
    pub async fn find_by_name(
        pool: &SqlitePool,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name_key = ?1");
        sqlx::query_as::<_, Category>(&query)
            .bind(normalize_name(name))
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by name.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name_key, id");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Update a category. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                name = COALESCE(?2, name), \
                name_key = COALESCE(?3, name_key), \
                description = COALESCE(?4, description), \
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.name.as_deref().map(normalize_name))
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Recipes in it are detached (`category_id` set to NULL).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of categories.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await
    }
}
