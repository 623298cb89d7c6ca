pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;

// Re-export necessary items
pub use extractors::AuthUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

lazy_static! {
    // Logins are letters, digits, and underscores only.
    static ref LOGIN_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

/// Payload for a new account registration.
///
/// Fields are optional so that missing values surface as `REQUIRED` field
/// errors rather than a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(code = "REQUIRED", message = "Login is required"),
        length(
            min = 3,
            max = 50,
            code = "INVALID_LENGTH",
            message = "Login must be between 3 and 50 characters"
        ),
        regex(
            path = "LOGIN_REGEX",
            code = "INVALID_FORMAT",
            message = "Login may only contain letters, digits, and underscores"
        )
    )]
    pub login: Option<String>,

    #[validate(
        required(code = "REQUIRED", message = "Password is required"),
        length(
            min = 6,
            code = "INVALID_LENGTH",
            message = "Password must have at least 6 characters"
        )
    )]
    pub password: Option<String>,
}

/// Payload for a login attempt. Only presence is checked here; anything
/// beyond that is answered by the credential comparison itself.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(code = "REQUIRED", message = "Login is required"))]
    pub login: Option<String>,

    #[validate(required(code = "REQUIRED", message = "Password is required"))]
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Runs the declarative rules and returns the credential pair.
    pub fn validated(&self) -> Result<(&str, &str), ApiError> {
        self.validate()?;
        credentials(self.login.as_deref(), self.password.as_deref())
    }
}

impl LoginRequest {
    /// Runs the presence rules and returns the credential pair.
    pub fn validated(&self) -> Result<(&str, &str), ApiError> {
        self.validate()?;
        credentials(self.login.as_deref(), self.password.as_deref())
    }
}

// The `required` rules guarantee both fields; this keeps the handlers free
// of unwraps without weakening the error path.
fn credentials<'a>(
    login: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), ApiError> {
    match (login, password) {
        (Some(login), Some(password)) => Ok((login, password)),
        _ => Err(ApiError::Internal(
            "credential fields missing after validation".into(),
        )),
    }
}
