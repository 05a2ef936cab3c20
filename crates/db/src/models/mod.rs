//! Row models and request DTOs.
//!
//! Row structs derive `FromRow` + `Serialize`; request DTOs derive
//! `Deserialize` + `Validate` and are checked by the handlers before they
//! reach a repository.

pub mod category;
pub mod ingredient;
pub mod purchase;
pub mod recipe;
