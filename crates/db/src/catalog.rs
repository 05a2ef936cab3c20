//! [`CatalogProvider`] over SQLite.

use async_trait::async_trait;
use pantry_core::catalog::{CatalogProvider, RecipeFilter};
use pantry_core::feasibility::{CatalogCategory, CatalogIngredient, CatalogRecipe};

use crate::repositories::{CategoryRepo, IngredientRepo, RecipeRepo};
use crate::DbPool;

/// Catalog reads backed by the repositories.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    pool: DbPool,
}

impl SqliteCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogProvider for SqliteCatalog {
    type Error = sqlx::Error;

    async fn list_recipes(&self, filter: &RecipeFilter) -> Result<Vec<CatalogRecipe>, sqlx::Error> {
        let recipes = RecipeRepo::list_with_ingredients(&self.pool, filter).await?;
        Ok(recipes.into_iter().map(CatalogRecipe::from).collect())
    }

    async fn list_ingredients_with_stock(&self) -> Result<Vec<CatalogIngredient>, sqlx::Error> {
        let ingredients = IngredientRepo::list(&self.pool, None).await?;
        Ok(ingredients.into_iter().map(CatalogIngredient::from).collect())
    }

    async fn resolve_category_by_name(
        &self,
        name: &str,
    ) -> Result<Option<CatalogCategory>, sqlx::Error> {
        let category = CategoryRepo::find_by_name(&self.pool, name).await?;
        Ok(category.map(CatalogCategory::from))
    }
}
