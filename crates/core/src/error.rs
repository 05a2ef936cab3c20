use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(flatten_validation_errors(&errors))
    }
}

/// Render `validator` output as `field: message` pairs joined by `; `.
///
/// Nested list errors (recipe lines) are prefixed with their index,
/// e.g. `ingredients[1].quantity: must be greater than 0`.
pub fn flatten_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut out = Vec::new();
    collect_messages("", errors, &mut out);
    out.sort();
    out.join("; ")
}

fn collect_messages(prefix: &str, errors: &validator::ValidationErrors, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}
