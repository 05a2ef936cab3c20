//! Catalog access seam and the "what can I cook" request flow.
//!
//! [`CatalogProvider`] is the read-only capability set the feasibility flow
//! needs from storage. `pantry-db` implements it over SQLite; tests use
//! in-memory fakes.

use async_trait::async_trait;

use crate::feasibility::{
    compute_feasibility, resolve_selection, summarize, CatalogCategory, CatalogIngredient,
    CatalogRecipe, CategoryFilter, FeasibilityResult, FeasibilitySummary, StockLevels,
};
use crate::types::DbId;

/// Filters applied when listing recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Accent-insensitive substring match on the recipe name.
    pub search: Option<String>,
    pub category_id: Option<DbId>,
}

/// Read operations the feasibility flow depends on.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    type Error: Send;

    /// Recipes matching `filter`, each with resolved lines and category name.
    async fn list_recipes(&self, filter: &RecipeFilter) -> Result<Vec<CatalogRecipe>, Self::Error>;

    /// Every ingredient with its current stock.
    async fn list_ingredients_with_stock(&self) -> Result<Vec<CatalogIngredient>, Self::Error>;

    /// Case- and accent-insensitive exact name lookup.
    async fn resolve_category_by_name(
        &self,
        name: &str,
    ) -> Result<Option<CatalogCategory>, Self::Error>;
}

/// Input of the possible-recipes query.
#[derive(Debug, Clone, Default)]
pub struct PossibleRecipesQuery {
    /// Ids or names of the ingredients the caller has.
    pub ingredient_tokens: Vec<String>,
    /// Category id or name; unmatched names are ignored.
    pub category: Option<String>,
}

/// Turn a raw category token into a category id.
///
/// Integers are used as ids directly. Names go through the provider; an
/// unmatched name yields `None` so the listing is left unfiltered.
pub async fn resolve_category_filter<P: CatalogProvider + ?Sized>(
    provider: &P,
    token: Option<&str>,
) -> Result<Option<DbId>, P::Error> {
    let Some(filter) = token.and_then(CategoryFilter::parse) else {
        return Ok(None);
    };
    match filter {
        CategoryFilter::Id(id) => Ok(Some(id)),
        CategoryFilter::Name(name) => {
            let category = provider.resolve_category_by_name(&name).await?;
            if category.is_none() {
                tracing::debug!(category = %name, "Category filter did not match, ignoring");
            }
            Ok(category.map(|c| c.id))
        }
    }
}

/// Load the catalog and compute feasibility for every matching recipe.
///
/// Selection tokens are resolved once per call. Results keep the order the
/// provider returned the recipes in.
pub async fn find_possible_recipes<P: CatalogProvider + ?Sized>(
    provider: &P,
    query: &PossibleRecipesQuery,
) -> Result<Vec<FeasibilityResult>, P::Error> {
    let category_id = resolve_category_filter(provider, query.category.as_deref()).await?;

    let recipes = provider
        .list_recipes(&RecipeFilter {
            search: None,
            category_id,
        })
        .await?;
    let ingredients = provider.list_ingredients_with_stock().await?;

    let stock = StockLevels::from_ingredients(&ingredients);
    let selected = resolve_selection(&query.ingredient_tokens, &ingredients);
    let results = compute_feasibility(&recipes, &stock, &selected);

    tracing::debug!(
        recipes = results.len(),
        selected = selected.len(),
        category_id = ?category_id,
        "Computed recipe feasibility"
    );

    Ok(results)
}

/// Completeness counts when every catalog ingredient counts as selected.
///
/// Answers "how many recipes could be cooked from current stock".
pub async fn summarize_cookable<P: CatalogProvider + ?Sized>(
    provider: &P,
) -> Result<FeasibilitySummary, P::Error> {
    let recipes = provider.list_recipes(&RecipeFilter::default()).await?;
    let ingredients = provider.list_ingredients_with_stock().await?;

    let stock = StockLevels::from_ingredients(&ingredients);
    let selected = ingredients.iter().map(|i| i.id).collect();
    Ok(summarize(&compute_feasibility(&recipes, &stock, &selected)))
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::feasibility::{Completeness, RecipeLine};
    use crate::naming::normalize_name;

    struct FakeCatalog {
        recipes: Vec<CatalogRecipe>,
        ingredients: Vec<CatalogIngredient>,
        categories: Vec<CatalogCategory>,
    }

    #[async_trait]
    impl CatalogProvider for FakeCatalog {
        type Error = Infallible;

        async fn list_recipes(
            &self,
            filter: &RecipeFilter,
        ) -> Result<Vec<CatalogRecipe>, Infallible> {
            Ok(self
                .recipes
                .iter()
                .filter(|r| filter.category_id.is_none() || r.category_id == filter.category_id)
                .cloned()
                .collect())
        }

        async fn list_ingredients_with_stock(&self) -> Result<Vec<CatalogIngredient>, Infallible> {
            Ok(self.ingredients.clone())
        }

        async fn resolve_category_by_name(
            &self,
            name: &str,
        ) -> Result<Option<CatalogCategory>, Infallible> {
            let key = normalize_name(name);
            Ok(self
                .categories
                .iter()
                .find(|c| normalize_name(&c.name) == key)
                .cloned())
        }
    }

    fn fixture() -> FakeCatalog {
        let ingredients = vec![
            CatalogIngredient {
                id: 1,
                name: "Pescado".to_string(),
                unit: "g".to_string(),
                stock: 500.0,
            },
            CatalogIngredient {
                id: 2,
                name: "Limón".to_string(),
                unit: "unidad".to_string(),
                stock: 10.0,
            },
            CatalogIngredient {
                id: 3,
                name: "Papa amarilla".to_string(),
                unit: "g".to_string(),
                stock: 0.0,
            },
        ];
        let line = |id: DbId, name: &str, quantity: f64| RecipeLine {
            ingredient_id: id,
            name: name.to_string(),
            unit: "g".to_string(),
            quantity,
        };
        let recipes = vec![
            CatalogRecipe {
                id: 100,
                name: "Ceviche".to_string(),
                description: None,
                category_id: Some(10),
                category_name: Some("Entradas".to_string()),
                ingredients: vec![line(2, "Limón", 8.0), line(1, "Pescado", 400.0)],
            },
            CatalogRecipe {
                id: 101,
                name: "Causa".to_string(),
                description: None,
                category_id: Some(11),
                category_name: Some("Fondos".to_string()),
                ingredients: vec![line(2, "Limón", 2.0), line(3, "Papa amarilla", 500.0)],
            },
        ];
        let categories = vec![
            CatalogCategory {
                id: 10,
                name: "Entradas".to_string(),
                description: None,
            },
            CatalogCategory {
                id: 11,
                name: "Fondos".to_string(),
                description: None,
            },
        ];
        FakeCatalog {
            recipes,
            ingredients,
            categories,
        }
    }

    fn query(tokens: &[&str], category: Option<&str>) -> PossibleRecipesQuery {
        PossibleRecipesQuery {
            ingredient_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            category: category.map(String::from),
        }
    }

    #[tokio::test]
    async fn names_and_ids_select_ingredients() {
        let catalog = fixture();
        let results = find_possible_recipes(&catalog, &query(&["limon", "1"], None))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].recipe.name, "Ceviche");
        assert_eq!(results[0].completeness, Completeness::Complete);
        assert_eq!(results[1].completeness, Completeness::Incomplete);
        assert_eq!(results[1].missing_ingredients, vec!["Papa amarilla"]);
    }

    #[tokio::test]
    async fn no_selection_means_nothing_available() {
        let catalog = fixture();
        let results = find_possible_recipes(&catalog, &query(&[], None))
            .await
            .unwrap();

        assert!(results.iter().all(|r| r.ingredients_available == 0));
    }

    #[tokio::test]
    async fn category_name_filters_recipes() {
        let catalog = fixture();
        let results = find_possible_recipes(&catalog, &query(&[], Some("fondos")))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.id, 101);
    }

    #[tokio::test]
    async fn category_id_filters_recipes() {
        let catalog = fixture();
        let results = find_possible_recipes(&catalog, &query(&[], Some("10")))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.id, 100);
    }

    #[tokio::test]
    async fn unknown_category_name_is_no_filter() {
        let catalog = fixture();
        let filtered = find_possible_recipes(&catalog, &query(&["limon"], Some("NoSuchCategory")))
            .await
            .unwrap();
        let unfiltered = find_possible_recipes(&catalog, &query(&["limon"], None))
            .await
            .unwrap();

        assert_eq!(filtered, unfiltered);
    }

    #[tokio::test]
    async fn non_positive_category_id_matches_nothing() {
        let catalog = fixture();
        for token in ["0", "-3"] {
            let results = find_possible_recipes(&catalog, &query(&["limon"], Some(token)))
                .await
                .unwrap();
            assert!(results.is_empty(), "category {token} should filter everything out");
        }
    }

    #[tokio::test]
    async fn blank_category_is_no_filter() {
        let catalog = fixture();
        assert_eq!(
            resolve_category_filter(&catalog, Some("  ")).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn cookable_summary_uses_all_stock() {
        let catalog = fixture();
        let summary = summarize_cookable(&catalog).await.unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.complete, 1);
        assert_eq!(summary.incomplete, 1);
    }
}
