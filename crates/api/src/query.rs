//! Query parameter types for the list endpoints.
//!
//! Purchase filters live with the purchase model in `pantry-db` because the
//! repository consumes them directly.

use serde::Deserialize;

/// `?search=` on list endpoints that support name search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Accent-insensitive substring match on the name.
    pub search: Option<String>,
}

/// `GET /recipes?search=&category=`
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    pub search: Option<String>,
    /// Category id or name.
    pub category: Option<String>,
}

/// `GET /recipes/possible?ingredients=&category=`
#[derive(Debug, Default, Deserialize)]
pub struct PossibleRecipesParams {
    /// Comma-separated ingredient ids or names.
    pub ingredients: Option<String>,
    /// Category id or name.
    pub category: Option<String>,
}
