//! Purchase history model and DTOs.
//!
//! Purchases are an immutable log; recording one does not change stock.

use chrono::NaiveDate;
use pantry_core::types::{DbId, Quantity, Timestamp};
use pantry_core::validation::positive_quantity;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A `purchases` row with the ingredient's name and unit joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Purchase {
    pub id: DbId,
    pub ingredient_id: DbId,
    pub ingredient_name: String,
    pub unit: String,
    pub purchase_date: NaiveDate,
    pub quantity: Quantity,
    pub created_at: Timestamp,
}

/// DTO for recording or replacing a purchase.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavePurchase {
    #[validate(range(min = 1))]
    pub ingredient_id: DbId,
    /// `YYYY-MM-DD`; defaults to today (UTC).
    pub purchase_date: Option<NaiveDate>,
    #[validate(custom(function = "positive_quantity"))]
    pub quantity: Quantity,
}

impl SavePurchase {
    /// The purchase date to store.
    pub fn effective_date(&self) -> NaiveDate {
        self.purchase_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// Query parameters for listing purchases. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseListParams {
    pub ingredient_id: Option<DbId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
