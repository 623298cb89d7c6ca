use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::ApiError;

/// Extracts the verified identity of the requesting user.
///
/// Intended for routes behind [`crate::auth::AuthMiddleware`], which verifies
/// the bearer token and inserts the claims into request extensions. If the
/// claims are absent the extractor rejects with 401; this only happens when
/// the middleware was not applied to the route.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The authenticated account's identifier.
    pub fn id(&self) -> i32 {
        self.0.sub
    }
}

impl FromRequest for AuthUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthUser(claims))),
            None => {
                let err = ApiError::Unauthenticated("Access token required".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
