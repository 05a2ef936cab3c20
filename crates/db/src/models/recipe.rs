//! Recipe model, its ingredient lines, and DTOs.

use pantry_core::feasibility::{CatalogRecipe, RecipeLine};
use pantry_core::types::{DbId, Quantity, Timestamp};
use pantry_core::validation::{not_blank, positive_quantity};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A `recipes` row with the category name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A `recipe_ingredients` row with the ingredient's name and unit joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeIngredient {
    #[serde(skip)]
    pub recipe_id: DbId,
    pub ingredient_id: DbId,
    pub name: String,
    pub unit: String,
    pub quantity: Quantity,
}

/// A recipe enriched with its ingredient lines.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeWithIngredients {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
}

impl From<RecipeWithIngredients> for CatalogRecipe {
    fn from(value: RecipeWithIngredients) -> Self {
        let RecipeWithIngredients { recipe, ingredients } = value;
        CatalogRecipe {
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            category_id: recipe.category_id,
            category_name: recipe.category_name,
            ingredients: ingredients
                .into_iter()
                .map(|line| RecipeLine {
                    ingredient_id: line.ingredient_id,
                    name: line.name,
                    unit: line.unit,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// One ingredient line of a recipe request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeLineInput {
    #[validate(range(min = 1))]
    pub ingredient_id: DbId,
    #[validate(custom(function = "positive_quantity"))]
    pub quantity: Quantity,
}

/// DTO for creating a recipe or replacing one in full.
///
/// On update the ingredient lines are replaced as a set.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveRecipe {
    #[validate(length(min = 1, max = 150), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub category_id: Option<DbId>,
    #[validate(length(min = 1, message = "at least one ingredient is required"), nested)]
    pub ingredients: Vec<RecipeLineInput>,
}

impl SaveRecipe {
    pub fn ingredient_ids(&self) -> Vec<DbId> {
        self.ingredients.iter().map(|l| l.ingredient_id).collect()
    }
}

