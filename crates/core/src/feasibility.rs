//! Recipe feasibility computation.
//!
//! Answers "which recipes can I cook?" from pre-loaded catalog data: the
//! recipes with their resolved ingredient lines, the current stock of every
//! ingredient, and the set of ingredients the caller says they have. All
//! functions here are pure; loading is done by a [`crate::catalog::CatalogProvider`].

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::naming::normalize_name;
use crate::types::{DbId, Quantity};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Serialized completeness values.
pub const COMPLETENESS_COMPLETE: &str = "complete";
pub const COMPLETENESS_INCOMPLETE: &str = "incomplete";

// ---------------------------------------------------------------------------
// Catalog inputs
// ---------------------------------------------------------------------------

/// An ingredient together with its current stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogIngredient {
    pub id: DbId,
    pub name: String,
    pub unit: String,
    pub stock: Quantity,
}

/// A recipe category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// One ingredient line of a recipe, with the ingredient's name and unit joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub ingredient_id: DbId,
    pub name: String,
    pub unit: String,
    pub quantity: Quantity,
}

/// A recipe with its resolved category name and ingredient lines.
///
/// `ingredients` is in the recipe's stored order; missing-ingredient names
/// are reported in that same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecipe {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub ingredients: Vec<RecipeLine>,
}

/// Stock lookup by ingredient id.
///
/// Unknown ids read as zero. Negative or NaN values coming from upstream
/// also read as zero; the stored value itself is left untouched.
#[derive(Debug, Clone, Default)]
pub struct StockLevels {
    by_id: HashMap<DbId, Quantity>,
}

impl StockLevels {
    pub fn new(by_id: HashMap<DbId, Quantity>) -> Self {
        Self { by_id }
    }

    /// Build from an ingredient catalog.
    pub fn from_ingredients(ingredients: &[CatalogIngredient]) -> Self {
        Self {
            by_id: ingredients.iter().map(|i| (i.id, i.stock)).collect(),
        }
    }

    /// Effective stock for an ingredient.
    pub fn get(&self, ingredient_id: DbId) -> Quantity {
        match self.by_id.get(&ingredient_id) {
            Some(&stock) if stock.is_finite() && stock > 0.0 => stock,
            _ => 0.0,
        }
    }
}

impl FromIterator<(DbId, Quantity)> for StockLevels {
    fn from_iter<T: IntoIterator<Item = (DbId, Quantity)>>(iter: T) -> Self {
        Self {
            by_id: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Whether every ingredient line of a recipe is covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completeness {
    Complete,
    Incomplete,
}

impl Completeness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => COMPLETENESS_COMPLETE,
            Self::Incomplete => COMPLETENESS_INCOMPLETE,
        }
    }
}

/// Feasibility of a single recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeasibilityResult {
    #[serde(flatten)]
    pub recipe: CatalogRecipe,
    pub ingredients_available: usize,
    pub ingredients_missing: usize,
    pub completeness_pct: u8,
    pub completeness: Completeness,
    pub missing_ingredients: Vec<String>,
}

/// Completeness counts across a set of recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeasibilitySummary {
    pub total: usize,
    pub complete: usize,
    pub incomplete: usize,
}

// ---------------------------------------------------------------------------
// Selection and category resolution
// ---------------------------------------------------------------------------

/// Parse a token as an explicit id. Only whole positive integers qualify.
fn parse_positive_id(token: &str) -> Option<DbId> {
    token.parse::<DbId>().ok().filter(|id| *id > 0)
}

/// Resolve caller-supplied tokens into the set of selected ingredient ids.
///
/// Each trimmed, non-blank token contributes:
/// - its value as an id, when it parses as a positive integer, and
/// - the id of the catalog ingredient whose normalized name equals the
///   normalized token.
///
/// Both lookups run for every token and the results are unioned. Tokens
/// that match nothing are ignored.
pub fn resolve_selection<S: AsRef<str>>(
    tokens: &[S],
    catalog: &[CatalogIngredient],
) -> BTreeSet<DbId> {
    let by_name: HashMap<String, DbId> = catalog
        .iter()
        .map(|ingredient| (normalize_name(&ingredient.name), ingredient.id))
        .collect();

    let mut selected = BTreeSet::new();
    for token in tokens {
        let token = token.as_ref().trim();
        if token.is_empty() {
            continue;
        }
        if let Some(id) = parse_positive_id(token) {
            selected.insert(id);
        }
        if let Some(&id) = by_name.get(&normalize_name(token)) {
            selected.insert(id);
        }
    }
    selected
}

/// A category filter as supplied by the caller, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// The token parsed as an integer and is used as an id directly, even
    /// when it is zero or negative.
    Id(DbId),
    /// Any other token; resolved by normalized name.
    Name(String),
}

impl CategoryFilter {
    /// Classify a raw filter token. Blank tokens mean "no filter".
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(match token.parse::<DbId>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Name(token.to_string()),
        })
    }
}

/// Resolve a category filter against an in-memory category list.
///
/// An unmatched name resolves to `None`, which callers treat as "no
/// category filter" rather than "no recipes".
pub fn resolve_category(filter: &CategoryFilter, categories: &[CatalogCategory]) -> Option<DbId> {
    match filter {
        CategoryFilter::Id(id) => Some(*id),
        CategoryFilter::Name(name) => {
            let key = normalize_name(name);
            categories
                .iter()
                .find(|c| normalize_name(&c.name) == key)
                .map(|c| c.id)
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Completeness percentage, rounded to the nearest integer.
///
/// Returns 0 if `total` is 0.
pub fn compute_completeness_pct(total: usize, available: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (available as f64 / total as f64 * 100.0).round() as u8;
    pct.min(100)
}

/// Evaluate one recipe.
///
/// A line is available only when the ingredient is selected *and* its stock
/// covers the required quantity (equal stock is enough). Stock is read, not
/// reserved: two recipes needing the same ingredient both see the full stock.
pub fn evaluate_recipe(
    recipe: &CatalogRecipe,
    stock: &StockLevels,
    selected: &BTreeSet<DbId>,
) -> FeasibilityResult {
    let mut available = 0usize;
    let mut missing = Vec::new();

    for line in &recipe.ingredients {
        let has_enough_stock = stock.get(line.ingredient_id) >= line.quantity;
        let is_selected = selected.contains(&line.ingredient_id);

        if is_selected && has_enough_stock {
            available += 1;
        } else {
            missing.push(line.name.clone());
        }
    }

    let total = recipe.ingredients.len();
    let completeness = if total > 0 && available == total {
        Completeness::Complete
    } else {
        Completeness::Incomplete
    };

    FeasibilityResult {
        recipe: recipe.clone(),
        ingredients_available: available,
        ingredients_missing: total - available,
        completeness_pct: compute_completeness_pct(total, available),
        completeness,
        missing_ingredients: missing,
    }
}

/// Evaluate every recipe, preserving input order.
pub fn compute_feasibility(
    recipes: &[CatalogRecipe],
    stock: &StockLevels,
    selected: &BTreeSet<DbId>,
) -> Vec<FeasibilityResult> {
    recipes
        .iter()
        .map(|recipe| evaluate_recipe(recipe, stock, selected))
        .collect()
}

/// Count complete and incomplete recipes.
pub fn summarize(results: &[FeasibilityResult]) -> FeasibilitySummary {
    let complete = results
        .iter()
        .filter(|r| r.completeness == Completeness::Complete)
        .count();
    FeasibilitySummary {
        total: results.len(),
        complete,
        incomplete: results.len() - complete,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
