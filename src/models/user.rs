use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full account row as stored in the database.
///
/// Deliberately not `Serialize`: the password hash must never reach a
/// response body. Handlers return [`PublicUser`] or an inline projection.
#[derive(Debug, FromRow)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of an account, returned from registration.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: i32,
    pub login: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
