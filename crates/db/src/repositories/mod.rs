//! Repository layer: one zero-sized struct per table family.
//!
//! Every method takes the pool (or a transaction) as its first argument and
//! returns `sqlx::Error`; mapping to HTTP status happens in the API crate.

pub mod category_repo;
pub mod ingredient_repo;
pub mod purchase_repo;
pub mod recipe_repo;

pub use category_repo::CategoryRepo;
pub use ingredient_repo::IngredientRepo;
pub use purchase_repo::PurchaseRepo;
pub use recipe_repo::RecipeRepo;
