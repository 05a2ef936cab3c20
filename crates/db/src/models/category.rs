//! Recipe category model and DTOs.

use pantry_core::feasibility::CatalogCategory;
use pantry_core::types::{DbId, Timestamp};
use pantry_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Category> for CatalogCategory {
    fn from(row: Category) -> Self {
        CatalogCategory {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// DTO for updating a category. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}
