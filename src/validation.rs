//!
//! # Request Validation
//!
//! The payload structs (`RegisterRequest`, `LoginRequest`, `TaskPayload`)
//! declare their rules with `validator` derive attributes, and every rule
//! carries its own stable error code (`REQUIRED`, `INVALID_LENGTH`,
//! `INVALID_FORMAT`, `INVALID_VALUE`) and human message. This module turns a
//! `ValidationErrors` into the wire-level field error report: an ordered list
//! of `{field, code, message}` covering every failing field at once.

use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::models::task::TaskStatus;

/// One failing field in a 400 response body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

// Report ordering follows the order fields appear in the request payloads.
// Fields outside this list (none today) sort last, alphabetically.
const FIELD_ORDER: [&str; 5] = ["login", "password", "title", "description", "status"];

fn field_rank(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|f| *f == field)
        .unwrap_or(FIELD_ORDER.len())
}

/// Flattens `ValidationErrors` into a deterministic, ordered field report.
pub fn report(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<(&str, &Vec<ValidationError>)> = errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(list) => Some((*field, list)),
            // Nested and list payloads are not used by this API.
            _ => None,
        })
        .collect();

    fields.sort_by(|(a, _), (b, _)| field_rank(a).cmp(&field_rank(b)).then(a.cmp(b)));

    fields
        .into_iter()
        .flat_map(|(field, list)| {
            list.iter().map(move |error| FieldError {
                field: field.to_string(),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            })
        })
        .collect()
}

/// Membership rule for the task status field; the returned error carries the
/// `INVALID_VALUE` code directly.
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if TaskStatus::from_name(status).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("INVALID_VALUE");
    error.message = Some("Invalid task status".into());
    Err(error)
}
