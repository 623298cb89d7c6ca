use crate::error::ApiError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a password with bcrypt. The salt is generated per call and baked
/// into the output, so equal inputs produce different hashes.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Checks a password against a stored hash. Errors fail closed: a broken
/// hash never authenticates.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, ApiError> {
    Ok(verify(password, hashed_password)?)
}
