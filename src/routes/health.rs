use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::config::Config;

/// API index
///
/// Describes the service for unauthenticated callers.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Welcome to the task management system!",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "A task management application with user authentication"
    }))
}

/// Health check endpoint
///
/// Returns the current status of the API, a timestamp, and the environment.
#[get("/health")]
pub async fn health(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": Utc::now(),
        "environment": config.environment
    }))
}
