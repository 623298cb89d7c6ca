use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenService;
use crate::error::ApiError;

/// Guards a scope with bearer-token authentication.
///
/// A missing `Authorization: Bearer <token>` header is answered with 401; a
/// header that is present but fails verification with 403. On success the
/// verified [`crate::auth::Claims`] are placed in the request extensions for
/// the [`crate::auth::AuthUser`] extractor.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let token = match token {
            Some(token) => token,
            None => {
                let err = ApiError::Unauthenticated("Access token required".into());
                return Box::pin(async move { Err(err.into()) });
            }
        };

        // The token service is installed as app data at startup.
        let verified = match req.app_data::<web::Data<TokenService>>() {
            Some(tokens) => tokens.verify(token),
            None => Err(ApiError::Internal("token service not configured".into())),
        };

        match verified {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(err) => Box::pin(async move { Err(err.into()) }),
        }
    }
}
