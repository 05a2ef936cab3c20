//! Field validation helpers shared by the repository DTOs and handlers.
//!
//! Structural checks on request bodies go through `validator` derives in
//! `pantry-db`; the functions here cover rules those derives cannot express.

use std::collections::HashSet;

use validator::ValidationError;

use crate::types::DbId;

/// A recipe may reference each ingredient at most once.
pub fn validate_distinct_ingredients(ids: &[DbId]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(format!("Ingredient {id} is listed more than once"));
        }
    }
    Ok(())
}

/// `validator` custom hook: finite and strictly positive.
pub fn positive_quantity(value: &f64) -> Result<(), ValidationError> {
    if value.is_finite() && *value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("positive_quantity").with_message("must be greater than 0".into()))
    }
}

/// `validator` custom hook: finite and not negative.
pub fn non_negative_quantity(value: &f64) -> Result<(), ValidationError> {
    if value.is_finite() && *value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("non_negative_quantity")
            .with_message("must not be negative".into()))
    }
}

/// `validator` custom hook: not blank after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("not_blank").with_message("must not be blank".into()))
    } else {
        Ok(())
    }
}

/// Split a comma-separated query value into trimmed, non-empty tokens.
pub fn parse_ingredient_tokens(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ingredients_rejected() {
        assert!(validate_distinct_ingredients(&[1, 2, 3]).is_ok());
        let err = validate_distinct_ingredients(&[1, 2, 1]).unwrap_err();
        assert!(err.contains("Ingredient 1"));
    }

    #[test]
    fn positive_quantity_rejects_zero_negative_and_nan() {
        assert!(positive_quantity(&0.25).is_ok());
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(positive_quantity(&value).is_err());
        }
    }

    #[test]
    fn validator_hooks() {
        assert!(non_negative_quantity(&0.0).is_ok());
        assert!(non_negative_quantity(&-0.5).is_err());
        assert!(non_negative_quantity(&f64::NAN).is_err());
        assert!(not_blank("  ").is_err());
        assert!(not_blank("sal").is_ok());
    }

    #[test]
    fn tokens_split_on_commas() {
        assert_eq!(
            parse_ingredient_tokens(Some(" limon, 3 ,,sal ")),
            vec!["limon", "3", "sal"]
        );
        assert!(parse_ingredient_tokens(None).is_empty());
        assert!(parse_ingredient_tokens(Some(" , ")).is_empty());
    }
}
