//! Request validation
//!
//! Request types derive [`validator::Validate`]; this module turns the
//! nested `validator` report into a flat list of [`FieldError`]s.

use crate::core::error::{FieldError, OrderError};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Validate a request, mapping failures to [`OrderError::Validation`]
pub fn validate<T: Validate>(value: &T) -> Result<(), OrderError> {
    value
        .validate()
        .map_err(|errors| OrderError::Validation(flatten(&errors)))
}

/// Flatten nested validation errors into `path: message` pairs
///
/// Paths look like `customer_name` or `lines[2].quantity`.
pub fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect("", errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(&path, nested, out),
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    collect(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}
