//! Ingredient model (with its current stock) and DTOs.

use pantry_core::feasibility::CatalogIngredient;
use pantry_core::types::{DbId, Quantity, Timestamp};
use pantry_core::validation::{non_negative_quantity, not_blank};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An `ingredients` row joined with its `ingredient_stock` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ingredient {
    pub id: DbId,
    pub name: String,
    pub unit: String,
    pub stock: Quantity,
    /// When the stock was last set; `None` if it never was.
    pub last_updated: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Ingredient> for CatalogIngredient {
    fn from(row: Ingredient) -> Self {
        CatalogIngredient {
            id: row.id,
            name: row.name,
            unit: row.unit,
            stock: row.stock,
        }
    }
}

/// DTO for creating an ingredient.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIngredient {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 30), custom(function = "not_blank"))]
    pub unit: String,
    /// Starting stock; defaults to 0.
    #[validate(custom(function = "non_negative_quantity"))]
    pub initial_stock: Option<Quantity>,
}

/// DTO for updating an ingredient. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateIngredient {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 30), custom(function = "not_blank"))]
    pub unit: Option<String>,
}

/// DTO for setting an ingredient's stock.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetStock {
    #[validate(custom(function = "non_negative_quantity"))]
    pub quantity: Quantity,
}

