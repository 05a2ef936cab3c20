//! Domain types and pure logic for the pantry service.
//!
//! Nothing in this crate touches the database. Repositories in `pantry-db`
//! load rows and hand them to the functions here as plain values.

pub mod catalog;
pub mod error;
pub mod feasibility;
pub mod naming;
pub mod types;
pub mod validation;
