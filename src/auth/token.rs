use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Token lifetime from issuance.
const TOKEN_TTL_HOURS: i64 = 24;

/// Identity assertions encoded within a token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the account's unique identifier.
    pub sub: i32,
    /// The account's login.
    pub login: String,
    /// The account's role tag.
    pub role: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and verifies signed identity tokens.
///
/// Built once at startup from the configured secret and shared read-only
/// across requests; no code path reads the environment after construction.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs a token asserting the given identity, expiring in 24 hours.
    pub fn issue(&self, id: i32, login: &str, role: &str) -> Result<String, ApiError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .ok_or_else(|| ApiError::Internal("token expiry overflow".into()))?
            .timestamp() as usize;

        let claims = Claims {
            sub: id,
            login: login.to_string(),
            role: role.to_string(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a token and decodes its claims.
    ///
    /// Malformed, bad-signature, and expired tokens all collapse into the
    /// same `Forbidden` error so callers cannot probe which check failed;
    /// the collapse lives in the `From<jsonwebtoken::errors::Error>` impl.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}
