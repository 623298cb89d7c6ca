use crate::{
    auth::{hash_password, verify_password, LoginRequest, RegisterRequest, TokenService},
    error::ApiError,
    models::{PublicUser, User},
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

/// Register a new user
///
/// Validates the credentials, enforces login uniqueness, and stores the
/// bcrypt hash. The response carries the public account projection, never
/// the hash.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, ApiError> {
    let (login_input, password) = payload.validated()?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE login = $1")
        .bind(login_input)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_some() {
        return Err(ApiError::Conflict("Login is already taken".into()));
    }

    let password_hash = hash_password(password)?;

    // A concurrent registration slipping past the probe still ends up as a
    // 409 through the unique index (sqlx error 23505 maps to Conflict).
    let user = sqlx::query_as::<_, PublicUser>(
        "INSERT INTO users (login, password_hash, role) VALUES ($1, $2, 'USER') \
         RETURNING id, login, role, created_at",
    )
    .bind(login_input)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "user": user
    })))
}

/// Login user
///
/// An unknown login and a wrong password produce the identical 401 response
/// so callers cannot probe which logins exist.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, ApiError> {
    let (login_input, password) = payload.validated()?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, login, password_hash, role, created_at FROM users WHERE login = $1",
    )
    .bind(login_input)
    .fetch_optional(&**pool)
    .await?;

    let user = match user {
        Some(user) => user,
        None => return Err(ApiError::Unauthenticated("Invalid login or password".into())),
    };

    if !verify_password(password, &user.password_hash)? {
        return Err(ApiError::Unauthenticated("Invalid login or password".into()));
    }

    let token = tokens.issue(user.id, &user.login, &user.role)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful",
        "token": token,
        "user": {
            "id": user.id,
            "login": user.login,
            "role": user.role
        }
    })))
}
