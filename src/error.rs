//!
//! # Error Handling
//!
//! Defines the application-wide error type `ApiError` used by every handler.
//! Each variant maps to one HTTP status, and `ResponseError` turns the error
//! into a JSON response at the boundary. Validation failures carry the full
//! list of failing fields and render the structured `fieldErrors` body;
//! everything else renders `{"error": <message>}`.
//!
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` let handlers
//! propagate with `?`. Internal detail (database text, hashing errors) is
//! logged and never included in a response body.

use actix_web::{error::ResponseError, HttpResponse};
use chrono::Utc;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::validation::{report, FieldError};

/// Every failure a handler can produce, by HTTP outcome.
#[derive(Debug)]
pub enum ApiError {
    /// Input failed the declarative validation rules (HTTP 400).
    /// Carries all failing fields, not just the first.
    Validation(Vec<FieldError>),
    /// A unique key (the login) is already taken (HTTP 409).
    Conflict(String),
    /// No credential was presented, or credentials did not match (HTTP 401).
    Unauthenticated(String),
    /// A credential was presented but is invalid or expired (HTTP 403).
    Forbidden(String),
    /// The resource does not exist, or is not owned by the caller (HTTP 404).
    NotFound(String),
    /// Unexpected persistence/hashing/signing failure (HTTP 500).
    /// The message is logged, never sent to the client.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => write!(f, "Validation failed: {} field(s)", errors.len()),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(errors) => HttpResponse::BadRequest().json(json!({
                "timestamp": Utc::now(),
                "status": 400,
                "error": "Bad Request",
                "fieldErrors": errors,
            })),
            ApiError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            ApiError::Unauthenticated(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            ApiError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "error": msg
            })),
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            ApiError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

/// `RowNotFound` becomes 404; a unique-index violation (Postgres code 23505)
/// becomes 409 so a registration race still reports a conflict. Everything
/// else is an internal error.
impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        match &error {
            sqlx::Error::RowNotFound => ApiError::NotFound("Record not found".into()),
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::Conflict("Login is already taken".into())
            }
            _ => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> ApiError {
        ApiError::Validation(report(&errors))
    }
}

/// Token failures are deliberately collapsed into one generic 403: callers
/// must not be able to tell malformed, bad-signature, and expired apart.
impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(_: jsonwebtoken::errors::Error) -> ApiError {
        ApiError::Forbidden("Invalid token".into())
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(error: bcrypt::BcryptError) -> ApiError {
        ApiError::Internal(format!("bcrypt failure: {}", error))
    }
}
