//! Repository for the `purchases` table.

use pantry_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::purchase::{Purchase, PurchaseListParams, SavePurchase};

/// Column list for a purchase joined with its ingredient (`p` / `i`).
const COLUMNS: &str = "p.id, p.ingredient_id, i.name AS ingredient_name, i.unit, \
    p.purchase_date, p.quantity, p.created_at";

const FROM: &str = "purchases p JOIN ingredients i ON i.id = p.ingredient_id";

/// Provides CRUD operations for the purchase log.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Record a purchase. Stock is not changed.
    pub async fn create(pool: &SqlitePool, input: &SavePurchase) -> Result<Purchase, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO purchases (ingredient_id, purchase_date, quantity) \
             VALUES (?1, ?2, ?3) \
             RETURNING id",
        )
        .bind(input.ingredient_id)
        .bind(input.effective_date())
        .bind(input.quantity)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a purchase by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE p.id = ?1");
        sqlx::query_as::<_, Purchase>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List purchases, newest first.
    ///
    /// All filters are optional; the date range is inclusive on both ends.
    pub async fn list(
        pool: &SqlitePool,
        params: &PurchaseListParams,
    ) -> Result<Vec<Purchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM} \
             WHERE (?1 IS NULL OR p.ingredient_id = ?1) \
               AND (?2 IS NULL OR p.purchase_date >= ?2) \
               AND (?3 IS NULL OR p.purchase_date <= ?3) \
             ORDER BY p.purchase_date DESC, p.id DESC"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(params.ingredient_id)
            .bind(params.from)
            .bind(params.to)
            .fetch_all(pool)
            .await
    }

    /// Replace a purchase in full.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &SavePurchase,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE purchases SET ingredient_id = ?2, purchase_date = ?3, quantity = ?4 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(input.ingredient_id)
        .bind(input.effective_date())
        .bind(input.quantity)
        .execute(pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Delete a purchase. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM purchases WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of purchases.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM purchases")
            .fetch_one(pool)
            .await
    }
}
