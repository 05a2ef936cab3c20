pub mod categories;
pub mod dashboard;
pub mod ingredients;
pub mod purchases;
pub mod recipes;
